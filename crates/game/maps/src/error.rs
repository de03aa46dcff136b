//! Error types raised while loading the maps document.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a whole load pass.
///
/// When one of these is returned the database is left exactly as it was
/// before the call.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("maps database path is empty")]
    EmptyPath,

    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("document at {} is not an object", .path.display())]
    NotAnObject { path: PathBuf },

    #[error("document at {} has no \"maps\" member", .path.display())]
    MissingMaps { path: PathBuf },

    #[error("\"maps\" member of {} is not an object", .path.display())]
    MapsNotAnObject { path: PathBuf },
}

/// Reasons a single map entry is skipped.
#[derive(Debug, Error)]
pub enum EntryError {
    #[error("key {key:?} is not an integer map id")]
    InvalidId { key: String },

    #[error("entry is not an object")]
    NotAnObject,

    #[error("missing required field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("invalid entry: {0}")]
    Invalid(#[source] serde_json::Error),
}

/// Reasons a single floor entry is dropped from its map record.
#[derive(Debug, Error)]
pub enum FloorError {
    #[error("floor is not an object")]
    NotAnObject,

    #[error("missing required field(s): {}", .fields.join(", "))]
    MissingFields { fields: Vec<&'static str> },

    #[error("invalid floor: {0}")]
    Invalid(#[source] serde_json::Error),
}

pub type LoadResult<T> = std::result::Result<T, LoadError>;
