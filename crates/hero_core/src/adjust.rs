//! Weight adjustment rules for a single round outcome.

use crate::error::{Error, Result};
use crate::roster::Roster;
use crate::tuning::{ProbabilityMode, Tuning};

/// Round a weight to the 4-decimal precision used by the store. Keeps
/// repeated rounds from accumulating float drift.
pub fn round_weight(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// Win probability of `guess` as seen in `reference`.
///
/// The default `Mixed` mode divides the unrounded guessed weight by the
/// sum of rounded weights; see `ProbabilityMode` for the alternatives.
fn guessed_probability(tuning: &Tuning, guess: &str, reference: &Roster) -> Result<f64> {
    let guessed = reference
        .get(guess)
        .ok_or_else(|| Error::UnknownParticipant {
            name: guess.to_string(),
        })?;

    let numerator = match tuning.probability_mode {
        ProbabilityMode::Rounded => guessed.weight.round(),
        ProbabilityMode::Mixed | ProbabilityMode::Unrounded => guessed.weight,
    };
    let total: f64 = match tuning.probability_mode {
        ProbabilityMode::Unrounded => reference.members().iter().map(|m| m.weight).sum(),
        ProbabilityMode::Mixed | ProbabilityMode::Rounded => {
            reference.members().iter().map(|m| m.weight.round()).sum()
        }
    };

    if total <= 0.0 {
        return Err(Error::EmptyPopulation);
    }
    Ok(numerator / total)
}

/// Total weight adjustment for one participant given the round's outcome.
///
/// `reference` supplies every probability lookup and must stay the frozen
/// pre-round roster for the whole round, even while weights are already
/// being rewritten participant by participant.
///
/// Returns a signed delta of unbounded magnitude; bounds are enforced by
/// [`apply_adjustment`].
pub fn compute_adjustment(
    tuning: &Tuning,
    person: &str,
    winner: &str,
    guess: Option<&str>,
    reference: &Roster,
) -> Result<f64> {
    let is_winner = person == winner;

    let base = if is_winner {
        -tuning.superhero_reduction
    } else {
        tuning.non_superhero_increase
    };

    let guess = match guess {
        Some(guess) => guess,
        None => return Ok(base),
    };

    let probability = guessed_probability(tuning, guess, reference)?;

    if guess == winner {
        // Calling a long shot pays out more than calling the favorite.
        let bonus = tuning.correct_guess_bonus_rate / probability;
        if is_winner {
            Ok(base - bonus)
        } else {
            // The reward replaces the consolation increase outright.
            Ok(-bonus)
        }
    } else {
        // Backing the favorite and losing hurts more than backing a long
        // shot. Applies on top of the base term even for the winner.
        let penalty =
            tuning.wrong_guess_base_penalty + probability * tuning.wrong_guess_penalty_scaling;
        Ok(base + penalty)
    }
}

/// Apply a computed delta to a weight, clamped to the configured bounds and
/// rounded to storage precision.
pub fn apply_adjustment(tuning: &Tuning, old_weight: f64, delta: f64) -> f64 {
    round_weight((old_weight + delta).clamp(tuning.min_weight, tuning.max_weight))
}
