// error.rs — Error types for goal records and snapshot storage.

use thiserror::Error;

/// Errors that can occur while working with goals and their snapshot.
///
/// Unknown goal ids are deliberately absent: updating or deleting a goal
/// that does not exist is a no-op, not an error.
#[derive(Debug, Error)]
pub enum GoalError {
    /// A status label did not match any known status.
    #[error("`{0}` is not a valid status")]
    InvalidStatus(String),

    /// A file I/O operation on the snapshot failed.
    #[error("I/O error at {path}: {source}")]
    IoError {
        path: String,
        source: std::io::Error,
    },

    /// Failed to serialize/deserialize the snapshot document.
    #[error("serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// The snapshot parsed, but its indexes disagree with its goal table.
    #[error("inconsistent snapshot: {reason}")]
    InconsistentSnapshot { reason: String },
}
