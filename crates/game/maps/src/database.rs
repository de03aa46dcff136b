//! In-memory maps database.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::config::{DuplicatePolicy, MapsConfig};
use crate::error::{EntryError, FloorError, LoadError, LoadResult};
use crate::record::{MapId, MapRecord};
use crate::schema::{BuiltMap, RawDocument, build_map};

/// A map entry that was left out of the database.
#[derive(Debug)]
pub struct SkippedEntry {
    /// Raw key of the entry in the `"maps"` object.
    pub key: String,
    pub error: EntryError,
}

/// A floor entry that was left out of its map record.
#[derive(Debug)]
pub struct SkippedFloor {
    pub map: MapId,
    /// Position of the floor in the map's `"floors"` array.
    pub index: usize,
    pub error: FloorError,
}

/// Outcome of one load pass.
#[derive(Debug, Default)]
pub struct LoadReport {
    /// Ids whose record was stored by this pass, in document order.
    pub loaded: Vec<MapId>,
    /// Ids that collided with a record already present.
    pub duplicates: Vec<MapId>,
    pub skipped: Vec<SkippedEntry>,
    pub skipped_floors: Vec<SkippedFloor>,
}

impl LoadReport {
    /// Returns true if nothing was skipped or collided.
    pub fn is_clean(&self) -> bool {
        self.duplicates.is_empty() && self.skipped.is_empty() && self.skipped_floors.is_empty()
    }
}

/// Owns every loaded map record, keyed by id.
#[derive(Debug, Default)]
pub struct MapsDatabase {
    path: PathBuf,
    policy: DuplicatePolicy,
    maps: HashMap<MapId, MapRecord>,
}

impl MapsDatabase {
    /// Creates an empty database reading from `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            policy: DuplicatePolicy::default(),
            maps: HashMap::new(),
        }
    }

    pub fn from_config(config: &MapsConfig) -> Self {
        Self::new(config.path.clone()).with_policy(config.duplicate_policy)
    }

    pub fn with_policy(mut self, policy: DuplicatePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn set_path(&mut self, path: impl Into<PathBuf>) {
        self.path = path.into();
    }

    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Reads the configured path and loads its contents.
    pub fn load_file(&mut self) -> LoadResult<LoadReport> {
        self.ensure_path()?;

        let content = std::fs::read_to_string(&self.path).map_err(|source| {
            let err = LoadError::Io {
                path: self.path.clone(),
                source,
            };
            tracing::error!("maps database load failed: {}", err);
            err
        })?;

        self.load_str(&content)
    }

    /// Parses `content` as JSON and loads it.
    ///
    /// Members of `"maps"` are visited in document order, and a key repeated
    /// in the text reaches the duplicate policy like any other colliding id.
    pub fn load_str(&mut self, content: &str) -> LoadResult<LoadReport> {
        self.ensure_path()?;

        let json: Value =
            serde_json::from_str(content).map_err(|source| self.parse_error(source))?;

        self.maps_object(&json).inspect_err(|err| {
            tracing::error!("maps database load failed: {}", err);
        })?;

        let document: RawDocument =
            serde_json::from_str(content).map_err(|source| self.parse_error(source))?;

        Ok(self.load_members(
            document
                .maps
                .iter()
                .map(|(key, value)| (key.as_str(), value)),
        ))
    }

    /// Loads every well-formed entry of the `"maps"` object.
    ///
    /// Document-level problems abort the pass and leave the database
    /// untouched. Entry-level and floor-level problems are skipped, logged and
    /// listed in the returned report.
    pub fn load(&mut self, json: &Value) -> LoadResult<LoadReport> {
        self.ensure_path()?;

        let maps = self.maps_object(json).inspect_err(|err| {
            tracing::error!("maps database load failed: {}", err);
        })?;

        Ok(self.load_members(maps.iter().map(|(key, value)| (key.as_str(), value))))
    }

    /// Returns the record with the given id, if loaded.
    pub fn get(&self, id: MapId) -> Option<&MapRecord> {
        self.maps.get(&id)
    }

    pub fn contains(&self, id: MapId) -> bool {
        self.maps.contains_key(&id)
    }

    pub fn len(&self) -> usize {
        self.maps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.maps.is_empty()
    }

    /// Loaded ids in ascending order.
    pub fn ids(&self) -> Vec<MapId> {
        let mut ids: Vec<MapId> = self.maps.keys().copied().collect();
        ids.sort_unstable();
        ids
    }

    /// Loaded records in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &MapRecord> {
        self.ids().into_iter().filter_map(move |id| self.maps.get(&id))
    }

    fn load_members<'a>(
        &mut self,
        members: impl Iterator<Item = (&'a str, &'a Value)>,
    ) -> LoadReport {
        let mut report = LoadReport::default();

        for (key, value) in members {
            let id = match key.parse::<MapId>() {
                Ok(id) => id,
                Err(_) => {
                    let error = EntryError::InvalidId {
                        key: key.to_string(),
                    };
                    self.skip(&mut report, key, error);
                    continue;
                }
            };

            let BuiltMap {
                record,
                skipped_floors,
            } = match build_map(id, value) {
                Ok(built) => built,
                Err(err) => {
                    self.skip(&mut report, key, err);
                    continue;
                }
            };

            for (index, error) in skipped_floors {
                tracing::warn!(
                    path = %self.path.display(),
                    map = %id,
                    index,
                    "skipping floor: {}",
                    error
                );
                report.skipped_floors.push(SkippedFloor {
                    map: id,
                    index,
                    error,
                });
            }

            self.insert(record, &mut report);
        }

        tracing::info!(
            path = %self.path.display(),
            loaded = report.loaded.len(),
            duplicates = report.duplicates.len(),
            skipped = report.skipped.len(),
            skipped_floors = report.skipped_floors.len(),
            total = self.maps.len(),
            "maps database loaded"
        );

        report
    }

    fn parse_error(&self, source: serde_json::Error) -> LoadError {
        let err = LoadError::Parse {
            path: self.path.clone(),
            source,
        };
        tracing::error!("maps database load failed: {}", err);
        err
    }

    fn ensure_path(&self) -> LoadResult<()> {
        if self.path.as_os_str().is_empty() {
            tracing::error!("maps database load failed: path is empty");
            return Err(LoadError::EmptyPath);
        }
        Ok(())
    }

    fn maps_object<'a>(&self, json: &'a Value) -> LoadResult<&'a serde_json::Map<String, Value>> {
        let root = json.as_object().ok_or_else(|| LoadError::NotAnObject {
            path: self.path.clone(),
        })?;

        root.get("maps")
            .ok_or_else(|| LoadError::MissingMaps {
                path: self.path.clone(),
            })?
            .as_object()
            .ok_or_else(|| LoadError::MapsNotAnObject {
                path: self.path.clone(),
            })
    }

    fn skip(&self, report: &mut LoadReport, key: &str, error: EntryError) {
        tracing::warn!(
            path = %self.path.display(),
            key,
            "skipping map entry: {}",
            error
        );
        report.skipped.push(SkippedEntry {
            key: key.to_string(),
            error,
        });
    }

    fn insert(&mut self, record: MapRecord, report: &mut LoadReport) {
        let id = record.id;
        match self.maps.entry(id) {
            Entry::Vacant(slot) => {
                tracing::debug!(map = %id, floors = record.floors.len(), "loaded map");
                slot.insert(record);
                report.loaded.push(id);
            }
            Entry::Occupied(mut slot) => {
                report.duplicates.push(id);
                match self.policy {
                    DuplicatePolicy::KeepFirst => {
                        tracing::warn!(map = %id, "duplicate map id, keeping existing record");
                    }
                    DuplicatePolicy::Replace => {
                        tracing::warn!(map = %id, "duplicate map id, replacing existing record");
                        slot.insert(record);
                        report.loaded.push(id);
                    }
                }
            }
        }
    }
}
