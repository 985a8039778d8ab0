//! Error types shared by the engine and the wheel driver.

use thiserror::Error;

/// Everything that can go wrong while running the selection system.
#[derive(Debug, Error)]
pub enum Error {
    /// A referenced name does not exist in the roster.
    ///
    /// Recoverable when it is a guess collected interactively (the guess is
    /// dropped); fatal when it is the winner, a batch entry, or an update
    /// target.
    #[error("participant \"{name}\" not found in the roster")]
    UnknownParticipant { name: String },

    /// The same name appears more than once in a roster.
    #[error("participant \"{name}\" appears more than once in the roster")]
    DuplicateParticipant { name: String },

    /// Every participant was filtered out, or all weights round to zero.
    #[error("no eligible participants: every weight is zero or excluded")]
    EmptyPopulation,

    /// Batch predictions could not be parsed; nothing was processed.
    #[error("malformed batch predictions: {reason}")]
    MalformedBatch { reason: String },

    /// Reading or writing the roster store failed. The stored roster is
    /// left exactly as it was.
    #[error("roster store I/O failed: {0}")]
    Store(#[from] std::io::Error),

    /// The roster store did not contain valid JSON.
    #[error("roster store contains invalid data: {0}")]
    StoreFormat(#[from] serde_json::Error),

    /// The tuning file exists but could not be parsed.
    #[error("invalid tuning file: {0}")]
    Tuning(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
