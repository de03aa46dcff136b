//! Static map definitions and their loader.
//!
//! This crate reads the `maps.json` content document into owned records:
//! - Map records (tile path, wall and spawn markers)
//! - Floor records (layer names grouped by level)
//! - A database keyed by map id with lookup
//!
//! Loading is tolerant: a malformed map entry or floor entry is skipped and
//! reported, while a malformed document aborts the whole load.

pub mod config;
pub mod database;
pub mod error;
pub mod record;

mod schema;

pub use config::{DuplicatePolicy, MapsConfig};
pub use database::{LoadReport, MapsDatabase, SkippedEntry, SkippedFloor};
pub use error::{EntryError, FloorError, LoadError, LoadResult};
pub use record::{FloorRecord, MapId, MapRecord};
