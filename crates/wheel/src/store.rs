//! File-backed roster store and wheel output files.
//!
//! Everything lives under one directory (`io/` by default): the roster in
//! `config.json`, plus the two generated outputs consumed externally: the
//! wheel population text file and the odds display map.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use hero_core::{Error, Participant, Result, Roster, Snapshot};
use tempfile::NamedTempFile;

/// Default directory for the store and generated files.
pub const DEFAULT_DIR: &str = "io";

const CONFIG_FILE: &str = "config.json";
const TUNING_FILE: &str = "tuning.toml";
const WHEEL_INPUT_FILE: &str = "wheelOfNamesInput.txt";
const ODDS_DISPLAY_FILE: &str = "oddsDisplay.json";

/// Roster persistence rooted at a single directory.
#[derive(Debug, Clone)]
pub struct Store {
    dir: PathBuf,
}

impl Store {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn open_default() -> Self {
        Self::new(DEFAULT_DIR)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn config_path(&self) -> PathBuf {
        self.dir.join(CONFIG_FILE)
    }

    pub fn tuning_path(&self) -> PathBuf {
        self.dir.join(TUNING_FILE)
    }

    pub fn wheel_input_path(&self) -> PathBuf {
        self.dir.join(WHEEL_INPUT_FILE)
    }

    pub fn odds_display_path(&self) -> PathBuf {
        self.dir.join(ODDS_DISPLAY_FILE)
    }

    /// Whether a roster has been set up yet.
    pub fn exists(&self) -> bool {
        self.config_path().exists()
    }

    fn ensure_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        Ok(())
    }

    /// Read the stored roster, preserving participant order.
    pub fn load(&self) -> Result<Roster> {
        let text = fs::read_to_string(self.config_path())?;
        let members: Vec<Participant> = serde_json::from_str(&text)?;
        Roster::new(members)
    }

    /// Replace the stored roster in one step.
    ///
    /// The new contents go to a temporary file in the same directory which
    /// is then renamed over `config.json`, so a crash mid-write leaves
    /// either the old roster or the new one, never a mix.
    pub fn commit(&self, roster: &Roster) -> Result<()> {
        self.ensure_dir()?;
        let json = serde_json::to_string_pretty(roster)?;

        let mut tmp = NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(self.config_path())
            .map_err(|e| Error::Store(e.error))?;
        Ok(())
    }

    /// Write the shuffled wheel population, one label per line.
    pub fn write_wheel_input(&self, population: &[String]) -> Result<()> {
        self.ensure_dir()?;
        fs::write(self.wheel_input_path(), population.join("\n"))?;
        Ok(())
    }

    /// Write the `name -> "52.00%"` odds map for external display.
    pub fn write_odds_display(&self, snapshot: &Snapshot) -> Result<()> {
        self.ensure_dir()?;
        let map: serde_json::Map<String, serde_json::Value> = snapshot
            .entries()
            .iter()
            .map(|entry| {
                (
                    entry.name.clone(),
                    serde_json::Value::String(entry.percent()),
                )
            })
            .collect();
        let json = serde_json::to_string_pretty(&map)?;
        fs::write(self.odds_display_path(), json)?;
        Ok(())
    }
}
