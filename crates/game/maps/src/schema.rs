//! Typed schema of the maps document and conversion into records.
//!
//! Map and floor entries are deserialized independently, so one malformed
//! floor never poisons its parent map and one malformed map never poisons
//! the document.

use std::fmt;

use serde::Deserialize;
use serde::de::{Deserializer, MapAccess, Visitor};
use serde_json::{Map, Value};

use crate::error::{EntryError, FloorError};
use crate::record::{FloorRecord, MapId, MapRecord};

/// Top-level document as read from text.
#[derive(Debug, Deserialize)]
pub(crate) struct RawDocument {
    pub maps: MapMembers,
}

/// Members of the `"maps"` object in document order.
///
/// Unlike [`Map`], a key repeated in the text is kept once per occurrence.
#[derive(Debug, Default)]
pub(crate) struct MapMembers(Vec<(String, Value)>);

impl MapMembers {
    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.0.iter()
    }
}

impl<'de> Deserialize<'de> for MapMembers {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct MembersVisitor;

        impl<'de> Visitor<'de> for MembersVisitor {
            type Value = MapMembers;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("an object of map entries")
            }

            fn visit_map<A>(self, mut access: A) -> Result<MapMembers, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut members = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, value)) = access.next_entry::<String, serde_json::Value>()? {
                    members.push((key, value));
                }
                Ok(MapMembers(members))
            }
        }

        deserializer.deserialize_map(MembersVisitor)
    }
}

/// One member of the `"maps"` object.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MapEntry {
    map_path: String,
    wall_property: String,
    spawn_player_property: String,
    spawn_enemy_property: String,
    // Elements are validated one by one when building floors.
    floors: Vec<Value>,
}

impl MapEntry {
    const REQUIRED: &'static [&'static str] = &[
        "mapPath",
        "wallProperty",
        "spawnPlayerProperty",
        "spawnEnemyProperty",
        "floors",
    ];
}

/// One element of a map entry's `"floors"` array.
#[derive(Debug, Deserialize)]
struct FloorEntry {
    level: i32,
    layers: Vec<String>,
}

impl FloorEntry {
    const REQUIRED: &'static [&'static str] = &["level", "layers"];
}

/// A map record together with the floors that were dropped while building it.
#[derive(Debug)]
pub(crate) struct BuiltMap {
    pub record: MapRecord,
    pub skipped_floors: Vec<(usize, FloorError)>,
}

fn missing_fields(object: &Map<String, Value>, required: &[&'static str]) -> Vec<&'static str> {
    required
        .iter()
        .copied()
        .filter(|field| !object.contains_key(*field))
        .collect()
}

/// Builds a map record from one `"maps"` member value.
///
/// Required fields are all-or-nothing: any missing or mistyped field fails the
/// whole record. Floors are built independently and failures are collected.
pub(crate) fn build_map(id: MapId, value: &Value) -> Result<BuiltMap, EntryError> {
    let object = value.as_object().ok_or(EntryError::NotAnObject)?;

    let fields = missing_fields(object, MapEntry::REQUIRED);
    if !fields.is_empty() {
        return Err(EntryError::MissingFields { fields });
    }

    let entry = MapEntry::deserialize(value).map_err(EntryError::Invalid)?;

    let mut floors = Vec::with_capacity(entry.floors.len());
    let mut skipped_floors = Vec::new();
    for (index, floor) in entry.floors.iter().enumerate() {
        match build_floor(floor) {
            Ok(record) => floors.push(record),
            Err(err) => skipped_floors.push((index, err)),
        }
    }

    let record = MapRecord {
        id,
        map_path: entry.map_path,
        wall_property: entry.wall_property,
        spawn_player_property: entry.spawn_player_property,
        spawn_enemy_property: entry.spawn_enemy_property,
        floors,
    };

    Ok(BuiltMap {
        record,
        skipped_floors,
    })
}

fn build_floor(value: &Value) -> Result<FloorRecord, FloorError> {
    let object = value.as_object().ok_or(FloorError::NotAnObject)?;

    let fields = missing_fields(object, FloorEntry::REQUIRED);
    if !fields.is_empty() {
        return Err(FloorError::MissingFields { fields });
    }

    let entry = FloorEntry::deserialize(value).map_err(FloorError::Invalid)?;
    Ok(FloorRecord::new(entry.level, entry.layers))
}
