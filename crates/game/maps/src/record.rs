//! Owned map and floor records.

use std::fmt;
use std::num::ParseIntError;
use std::str::FromStr;

use serde::Serialize;

/// Identifier of a map, taken from the keys of the `"maps"` object.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct MapId(pub i32);

impl fmt::Display for MapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl FromStr for MapId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Self)
    }
}

impl From<i32> for MapId {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

/// Static configuration of one playable map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MapRecord {
    pub id: MapId,
    /// Path of the tile map file.
    pub map_path: String,
    /// Layer property marking wall tiles.
    pub wall_property: String,
    /// Object property marking player spawn points.
    pub spawn_player_property: String,
    /// Object property marking enemy spawn points.
    pub spawn_enemy_property: String,
    /// Floors in document order.
    pub floors: Vec<FloorRecord>,
}

impl MapRecord {
    /// Returns the first floor declared with the given level.
    pub fn floor(&self, level: i32) -> Option<&FloorRecord> {
        self.floors.iter().find(|floor| floor.level == level)
    }

    /// Distinct floor levels in ascending order.
    pub fn levels(&self) -> Vec<i32> {
        let mut levels: Vec<i32> = self.floors.iter().map(|floor| floor.level).collect();
        levels.sort_unstable();
        levels.dedup();
        levels
    }
}

/// Rendering layers of one floor of a map.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FloorRecord {
    pub level: i32,
    /// Layer names in document order.
    pub layers: Vec<String>,
}

impl FloorRecord {
    pub fn new(level: i32, layers: Vec<String>) -> Self {
        Self { level, layers }
    }
}
