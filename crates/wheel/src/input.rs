//! Synchronous prompt/answer seam between the orchestrator and the user.
//!
//! Interactive mode reads from the terminal; tests and scripted runs feed
//! canned answers through the same trait, so both share one orchestration
//! path.

use std::collections::VecDeque;
use std::io::{self, BufRead, Write};

/// Blocking question-and-answer source.
pub trait InputSource {
    /// Show `prompt` and return the answer with surrounding whitespace
    /// trimmed.
    fn ask(&mut self, prompt: &str) -> io::Result<String>;
}

/// Reads answers from stdin.
pub struct StdinInput;

impl InputSource for StdinInput {
    fn ask(&mut self, prompt: &str) -> io::Result<String> {
        print!("{}", prompt);
        io::stdout().flush()?;

        let mut line = String::new();
        io::stdin().lock().read_line(&mut line)?;
        Ok(line.trim().to_string())
    }
}

/// Canned answers, consumed front to back.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    answers: VecDeque<String>,
}

impl ScriptedInput {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            answers: answers.into_iter().map(Into::into).collect(),
        }
    }
}

impl InputSource for ScriptedInput {
    fn ask(&mut self, _prompt: &str) -> io::Result<String> {
        self.answers.pop_front().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "no scripted answer left")
        })
    }
}
