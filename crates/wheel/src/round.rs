//! One prediction round: collect guesses, take the winner, rewrite weights.

use std::collections::HashMap;

use hero_core::{
    apply_adjustment, compute_adjustment, derive_snapshot, Error, Result, Roster, Tuning,
};
use serde::Deserialize;

use crate::input::InputSource;
use crate::store::Store;

/// What actually happened in a round: the winner plus everyone's guesses.
///
/// Ephemeral: built per round, never persisted. Participants absent from
/// `predictions` made no guess.
#[derive(Debug, Clone, Default)]
pub struct RoundOutcome {
    pub winner: String,
    pub predictions: HashMap<String, String>,
}

/// One `{"person": ..., "guess": ...}` entry from a batch update.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BatchPrediction {
    pub person: String,
    pub guess: String,
}

/// Weight change for one participant, for reporting.
#[derive(Debug, Clone)]
pub struct WeightChange {
    pub name: String,
    pub old_weight: f64,
    pub new_weight: f64,
    pub delta: f64,
    pub prediction: Option<String>,
    pub is_winner: bool,
    /// `None` when no guess was made.
    pub correct: Option<bool>,
}

/// Drives rounds against a store, computing every adjustment from the same
/// frozen pre-round roster.
pub struct Orchestrator<'a> {
    tuning: &'a Tuning,
    store: &'a Store,
    /// Compute and display, but never commit.
    preview: bool,
}

impl<'a> Orchestrator<'a> {
    pub fn new(tuning: &'a Tuning, store: &'a Store, preview: bool) -> Self {
        Self {
            tuning,
            store,
            preview,
        }
    }

    /// Apply a full round outcome to every roster member.
    ///
    /// All names are validated before anything is computed, and the store
    /// is rewritten in a single atomic commit at the end, so a failed round
    /// never leaves a partially updated roster behind.
    pub fn apply_outcome(&self, outcome: &RoundOutcome) -> Result<Vec<WeightChange>> {
        let reference = self.store.load()?;
        self.validate_outcome(outcome, &reference)?;

        let mut updated = reference.clone();
        let mut changes = Vec::with_capacity(reference.len());
        for member in reference.members() {
            let guess = outcome.predictions.get(&member.name).map(String::as_str);
            let delta = compute_adjustment(
                self.tuning,
                &member.name,
                &outcome.winner,
                guess,
                &reference,
            )?;
            let new_weight = apply_adjustment(self.tuning, member.weight, delta);
            updated.set_weight(&member.name, new_weight)?;

            changes.push(WeightChange {
                name: member.name.clone(),
                old_weight: member.weight,
                new_weight,
                delta,
                prediction: guess.map(String::from),
                is_winner: member.name == outcome.winner,
                correct: guess.map(|g| g == outcome.winner),
            });
        }

        if !self.preview {
            self.store.commit(&updated)?;
        }
        Ok(changes)
    }

    /// Update exactly one participant with the same adjustment formula.
    pub fn apply_single(
        &self,
        person: &str,
        winner: &str,
        guess: Option<&str>,
    ) -> Result<WeightChange> {
        let reference = self.store.load()?;

        let member = reference.get(person).ok_or_else(|| Error::UnknownParticipant {
            name: person.to_string(),
        })?;
        if !reference.contains(winner) {
            return Err(Error::UnknownParticipant {
                name: winner.to_string(),
            });
        }

        let delta = compute_adjustment(self.tuning, person, winner, guess, &reference)?;
        let new_weight = apply_adjustment(self.tuning, member.weight, delta);

        let change = WeightChange {
            name: member.name.clone(),
            old_weight: member.weight,
            new_weight,
            delta,
            prediction: guess.map(String::from),
            is_winner: person == winner,
            correct: guess.map(|g| g == winner),
        };

        let mut updated = reference;
        updated.set_weight(person, new_weight)?;
        if !self.preview {
            self.store.commit(&updated)?;
        }
        Ok(change)
    }

    /// Apply an explicit prediction list plus winner to the whole team.
    ///
    /// People not in `predictions` are processed as "no prediction". Any
    /// unknown name fails the whole batch before a single weight changes.
    pub fn apply_batch(
        &self,
        predictions: &[BatchPrediction],
        winner: &str,
    ) -> Result<Vec<WeightChange>> {
        let mut map = HashMap::new();
        for prediction in predictions {
            map.insert(prediction.person.clone(), prediction.guess.clone());
        }
        self.apply_outcome(&RoundOutcome {
            winner: winner.to_string(),
            predictions: map,
        })
    }

    /// Run the interactive flow: collect each member's optional guess,
    /// pause for the wheel spin, take the winner, then apply the outcome.
    pub fn run_interactive(&self, input: &mut dyn InputSource) -> Result<Vec<WeightChange>> {
        let roster = self.store.load()?;
        let names: Vec<String> = roster.names().map(String::from).collect();

        println!("=== Interactive Superhero Round ===");
        if self.preview {
            println!("Preview mode - no changes will be saved");
        }
        println!();
        print_odds(self.tuning, &roster)?;

        // CollectingPredictions
        let mut predictions = HashMap::new();
        println!("Collecting predictions...");
        println!();
        for name in &names {
            let answer = input.ask(&format!("Did {} make a guess? (y/n): ", name))?;
            if !matches!(answer.to_lowercase().as_str(), "y" | "yes") {
                println!("{} made no guess", name);
                println!();
                continue;
            }

            println!("Available options: {}", names.join(", "));
            let guess = input.ask(&format!("Who did {} guess would win? ", name))?;
            if roster.contains(&guess) {
                println!("{} guessed {}", name, guess);
                predictions.insert(name.clone(), guess);
            } else {
                // Recoverable: an unknown guess just becomes "no prediction"
                println!("Invalid guess \"{}\". Skipping {}.", guess, name);
            }
            println!();
        }

        // AwaitingWinner
        println!("Time to spin the wheel!");
        input.ask("Press Enter when you're ready to enter the winner. ")?;
        println!("Available options: {}", names.join(", "));
        let winner = input.ask("Who actually won the superhero selection? ")?;
        if !roster.contains(&winner) {
            return Err(Error::UnknownParticipant { name: winner });
        }
        println!();
        println!("{} is the new superhero!", winner);
        println!();

        println!("=== Prediction Summary ===");
        for (person, guess) in &predictions {
            let mark = if guess == &winner { "correct" } else { "wrong" };
            println!("  {}: {} ({})", person, guess, mark);
        }
        let no_guessers: Vec<&str> = names
            .iter()
            .filter(|name| !predictions.contains_key(*name))
            .map(String::as_str)
            .collect();
        if !no_guessers.is_empty() {
            println!("  No guesses: {}", no_guessers.join(", "));
        }
        println!();

        // Computing + Finalizing
        let outcome = RoundOutcome {
            winner,
            predictions,
        };
        let changes = self.apply_outcome(&outcome)?;
        print_changes(&changes);

        println!("Updated probabilities after weight changes:");
        print_odds(self.tuning, &self.store.load()?)?;

        if self.preview {
            println!("This was a preview. Run without --dry-run to apply changes.");
        } else {
            println!("All weights updated and saved. Run 'wheel spin' to generate the next wheel.");
        }
        Ok(changes)
    }

    /// Every name a round outcome mentions must already be in the roster.
    fn validate_outcome(&self, outcome: &RoundOutcome, roster: &Roster) -> Result<()> {
        if !roster.contains(&outcome.winner) {
            return Err(Error::UnknownParticipant {
                name: outcome.winner.clone(),
            });
        }
        for (person, guess) in &outcome.predictions {
            if !roster.contains(person) {
                return Err(Error::UnknownParticipant {
                    name: person.clone(),
                });
            }
            if !roster.contains(guess) {
                return Err(Error::UnknownParticipant {
                    name: guess.clone(),
                });
            }
        }
        Ok(())
    }
}

/// Parse the CLI batch JSON (`[{"person":"Johan","guess":"Sam"}, ...]`).
pub fn parse_batch(json: &str) -> Result<Vec<BatchPrediction>> {
    serde_json::from_str(json).map_err(|e| Error::MalformedBatch {
        reason: e.to_string(),
    })
}

/// Per-participant report in the style the team is used to.
pub fn print_changes(changes: &[WeightChange]) {
    for change in changes {
        let result = match change.correct {
            Some(true) => "CORRECT",
            Some(false) => "INCORRECT",
            None => "NO GUESS",
        };
        println!("{}:", change.name);
        println!("  Superhero: {}", if change.is_winner { "YES" } else { "NO" });
        println!(
            "  Predicted: {}",
            change.prediction.as_deref().unwrap_or("No prediction")
        );
        println!("  Result: {}", result);
        println!(
            "  Weight change: {:.4} -> {:.4} ({}{:.4})",
            change.old_weight,
            change.new_weight,
            if change.delta >= 0.0 { "+" } else { "" },
            change.delta
        );
        println!();
    }
}

/// Print the current odds, highest share first.
pub fn print_odds(tuning: &Tuning, roster: &Roster) -> Result<()> {
    let snapshot = derive_snapshot(tuning, roster)?;
    println!("=== Current Probabilities ===");
    for entry in snapshot.ranked() {
        println!(
            "  {}: {:.2}% (weight: {:.4})",
            entry.name, entry.percentage, entry.weight
        );
    }
    println!();
    Ok(())
}
