//! Utility functions for xtask commands

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use game_maps::{DuplicatePolicy, LoadReport, MapsConfig, MapsDatabase};

/// Resolve the maps document path from the command line or the environment.
pub fn resolve_config(file: Option<PathBuf>) -> Result<MapsConfig> {
    let mut config = MapsConfig::from_env();
    if let Some(file) = file {
        config.path = file;
    }

    if config.path.as_os_str().is_empty() {
        return Err(anyhow!(
            "No maps document given.\n\
             Pass --file or set MAPS_DATABASE_PATH (or CONTENT_DATA_DIR)."
        ));
    }

    Ok(config)
}

/// Build a database from `config` and load its document.
pub fn load_database(config: &MapsConfig) -> Result<(MapsDatabase, LoadReport)> {
    let mut db = MapsDatabase::from_config(config);
    let report = db
        .load_file()
        .with_context(|| format!("Failed to load maps from {}", config.path.display()))?;
    Ok((db, report))
}

/// Human-readable name of a duplicate policy outcome.
pub fn duplicate_outcome(policy: DuplicatePolicy) -> &'static str {
    match policy {
        DuplicatePolicy::KeepFirst => "kept existing",
        DuplicatePolicy::Replace => "replaced",
    }
}
