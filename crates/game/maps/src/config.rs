//! Maps database configuration.

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

/// Environment variable naming the maps document directly.
pub const MAPS_DATABASE_PATH_ENV: &str = "MAPS_DATABASE_PATH";
/// Content data directory; `maps.json` is looked up inside it.
pub const CONTENT_DATA_DIR_ENV: &str = "CONTENT_DATA_DIR";
/// Duplicate-id policy, `keep-first` or `replace`.
pub const MAPS_DUPLICATE_POLICY_ENV: &str = "MAPS_DUPLICATE_POLICY";

/// File name of the maps document inside a content data directory.
pub const MAPS_FILE_NAME: &str = "maps.json";

/// How an incoming record is treated when its id is already present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// The record already in the database wins.
    #[default]
    KeepFirst,
    /// The incoming record overwrites the existing one.
    Replace,
}

impl FromStr for DuplicatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "keep-first" | "keep_first" | "first" => Ok(Self::KeepFirst),
            "replace" | "overwrite" => Ok(Self::Replace),
            other => Err(format!("unknown duplicate policy: {other}")),
        }
    }
}

impl fmt::Display for DuplicatePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::KeepFirst => f.write_str("keep-first"),
            Self::Replace => f.write_str("replace"),
        }
    }
}

/// Configuration required to build a [`MapsDatabase`](crate::MapsDatabase).
#[derive(Clone, Debug, Default)]
pub struct MapsConfig {
    pub path: PathBuf,
    pub duplicate_policy: DuplicatePolicy,
}

impl MapsConfig {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            duplicate_policy: DuplicatePolicy::default(),
        }
    }

    pub fn with_duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.duplicate_policy = policy;
        self
    }

    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `MAPS_DATABASE_PATH` - Path of the maps document
    /// - `CONTENT_DATA_DIR` - Data directory holding `maps.json` (used when the above is unset)
    /// - `MAPS_DUPLICATE_POLICY` - `keep-first` or `replace` (default: keep-first)
    ///
    /// With neither path variable set the path stays empty and loading fails.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Some(path) = read_env::<PathBuf>(MAPS_DATABASE_PATH_ENV) {
            config.path = path;
        } else if let Some(dir) = read_env::<PathBuf>(CONTENT_DATA_DIR_ENV) {
            config.path = dir.join(MAPS_FILE_NAME);
        }

        if let Some(policy) = read_env::<DuplicatePolicy>(MAPS_DUPLICATE_POLICY_ENV) {
            config.duplicate_policy = policy;
        }

        config
    }
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: FromStr,
{
    let value = env::var(key).ok()?;
    if value.is_empty() {
        return None;
    }
    value.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_policy_parsing() {
        assert_eq!("keep-first".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::KeepFirst));
        assert_eq!(" Replace ".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Replace));
        assert_eq!("overwrite".parse::<DuplicatePolicy>(), Ok(DuplicatePolicy::Replace));
        assert!("newest".parse::<DuplicatePolicy>().is_err());
    }

    #[test]
    fn test_policy_display_round_trips() {
        for policy in [DuplicatePolicy::KeepFirst, DuplicatePolicy::Replace] {
            assert_eq!(policy.to_string().parse::<DuplicatePolicy>(), Ok(policy));
        }
    }

    #[test]
    fn test_config_builder() {
        let config =
            MapsConfig::new("data/maps.json").with_duplicate_policy(DuplicatePolicy::Replace);
        assert_eq!(config.path, PathBuf::from("data/maps.json"));
        assert_eq!(config.duplicate_policy, DuplicatePolicy::Replace);

        let config = MapsConfig::default();
        assert!(config.path.as_os_str().is_empty());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepFirst);
    }

    fn set_env(key: &str, value: &str) {
        // SAFETY: only `test_config_from_env` touches these variables.
        unsafe { env::set_var(key, value) }
    }

    fn clear_env() {
        for key in [
            MAPS_DATABASE_PATH_ENV,
            CONTENT_DATA_DIR_ENV,
            MAPS_DUPLICATE_POLICY_ENV,
        ] {
            // SAFETY: only `test_config_from_env` touches these variables.
            unsafe { env::remove_var(key) }
        }
    }

    // All branches live in one test since the environment is process-global.
    #[test]
    fn test_config_from_env() {
        clear_env();
        let config = MapsConfig::from_env();
        assert!(config.path.as_os_str().is_empty());
        assert_eq!(config.duplicate_policy, DuplicatePolicy::KeepFirst);

        set_env(CONTENT_DATA_DIR_ENV, "/srv/content");
        let config = MapsConfig::from_env();
        assert_eq!(config.path, PathBuf::from("/srv/content").join(MAPS_FILE_NAME));

        set_env(MAPS_DATABASE_PATH_ENV, "/srv/override/maps.json");
        let config = MapsConfig::from_env();
        assert_eq!(config.path, PathBuf::from("/srv/override/maps.json"));

        set_env(MAPS_DATABASE_PATH_ENV, "");
        let config = MapsConfig::from_env();
        assert_eq!(config.path, PathBuf::from("/srv/content").join(MAPS_FILE_NAME));

        set_env(MAPS_DUPLICATE_POLICY_ENV, "replace");
        assert_eq!(MapsConfig::from_env().duplicate_policy, DuplicatePolicy::Replace);

        set_env(MAPS_DUPLICATE_POLICY_ENV, "newest");
        assert_eq!(MapsConfig::from_env().duplicate_policy, DuplicatePolicy::KeepFirst);

        clear_env();
    }
}
