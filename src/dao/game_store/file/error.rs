//! Error types shared by the file storage implementation.

use std::{io, path::PathBuf};

use thiserror::Error;
use validator::ValidationErrors;

/// Convenient result alias returning [`FileDaoError`] failures.
pub type FileResult<T> = Result<T, FileDaoError>;

/// Failures that can occur while reading or writing game files.
#[derive(Debug, Error)]
pub enum FileDaoError {
    /// The store root could not be created.
    #[error("failed to create store directory `{}`", .path.display())]
    CreateDirectory {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// The store root is missing or not a directory.
    #[error("store directory `{}` is not accessible", .path.display())]
    Inaccessible {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A document could not be read from disk.
    #[error("failed to read `{}`", .path.display())]
    Read {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// A document could not be written to disk.
    #[error("failed to write `{}`", .path.display())]
    Write {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// Listing the player files of a game failed.
    #[error("failed to list players in `{}`", .path.display())]
    ListPlayers {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: io::Error,
    },
    /// File contents are not the expected JSON document.
    #[error("failed to decode `{}`", .path.display())]
    Decode {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// Serializing a document to JSON failed.
    #[error("failed to encode `{}`", .path.display())]
    Encode {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: serde_json::Error,
    },
    /// A decoded document breaks the model invariants.
    #[error("invalid document `{}`", .path.display())]
    InvalidDocument {
        /// Path involved.
        path: PathBuf,
        /// Underlying failure.
        #[source]
        source: ValidationErrors,
    },
}
