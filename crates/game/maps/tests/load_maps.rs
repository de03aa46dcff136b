use std::fs;

use game_maps::{DuplicatePolicy, EntryError, LoadError, MapId, MapsConfig, MapsDatabase};
use tempfile::TempDir;

const SAMPLE: &str = include_str!("../data/maps.json");

fn write_document(dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = dir.path().join("maps.json");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn test_load_sample_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, SAMPLE);

    let mut db = MapsDatabase::from_config(&MapsConfig::new(&path));
    let report = db.load_file().unwrap();

    assert!(report.is_clean());
    assert_eq!(db.len(), 3);
    assert_eq!(db.ids(), vec![MapId(1), MapId(2), MapId(3)]);

    let crypt = db.get(MapId(2)).unwrap();
    assert_eq!(crypt.map_path, "maps/crypt.tmx");
    assert_eq!(crypt.levels(), vec![-1, 0]);
    assert_eq!(
        crypt.floor(0).unwrap().layers,
        vec!["floor".to_string(), "bones".to_string()]
    );

    let arena = db.get(MapId(3)).unwrap();
    assert_eq!(arena.spawn_enemy_property, "spawn_boss");

    assert!(db.get(MapId(4)).is_none());
}

#[test]
fn test_load_missing_file() {
    let temp_dir = TempDir::new().unwrap();
    let mut db = MapsDatabase::new(temp_dir.path().join("absent.json"));

    match db.load_file() {
        Err(LoadError::Io { path, .. }) => assert!(path.ends_with("absent.json")),
        other => panic!("expected I/O error, got {other:?}"),
    }
    assert!(db.is_empty());
}

#[test]
fn test_load_file_with_empty_path() {
    let mut db = MapsDatabase::from_config(&MapsConfig::default());

    assert!(matches!(db.load_file(), Err(LoadError::EmptyPath)));
    assert!(matches!(db.load_str(SAMPLE), Err(LoadError::EmptyPath)));
    assert!(db.is_empty());
}

#[test]
fn test_load_malformed_json_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "{ \"maps\": { \"1\": ");

    let mut db = MapsDatabase::new(&path);
    assert!(matches!(db.load_file(), Err(LoadError::Parse { .. })));
    assert!(db.is_empty());
}

#[test]
fn test_non_object_document() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, "[\"maps\"]");

    let mut db = MapsDatabase::new(&path);
    assert!(matches!(db.load_file(), Err(LoadError::NotAnObject { .. })));
    assert!(db.is_empty());
}

#[test]
fn test_partial_document_keeps_good_entries() {
    let document = r#"{
        "maps": {
            "1": {
                "mapPath": "maps/village.tmx",
                "wallProperty": "collision",
                "spawnPlayerProperty": "spawn_player",
                "spawnEnemyProperty": "spawn_enemy",
                "floors": [
                    { "level": 0, "layers": ["ground"] },
                    { "level": 1 }
                ]
            },
            "2": {
                "mapPath": "maps/crypt.tmx",
                "wallProperty": "collision",
                "floors": []
            }
        }
    }"#;

    let mut db = MapsDatabase::new("inline.json");
    let report = db.load_str(document).unwrap();

    assert_eq!(db.ids(), vec![MapId(1)]);
    assert_eq!(db.get(MapId(1)).unwrap().floors.len(), 1);

    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].key, "2");
    match &report.skipped[0].error {
        EntryError::MissingFields { fields } => {
            assert_eq!(fields, &vec!["spawnPlayerProperty", "spawnEnemyProperty"])
        }
        other => panic!("unexpected error {other:?}"),
    }

    assert_eq!(report.skipped_floors.len(), 1);
    assert_eq!(report.skipped_floors[0].map, MapId(1));
    assert_eq!(report.skipped_floors[0].index, 1);
}

#[test]
fn test_reload_from_disk_with_policies() {
    let temp_dir = TempDir::new().unwrap();
    let path = write_document(&temp_dir, SAMPLE);

    let changed = SAMPLE.replace("maps/village.tmx", "maps/village_winter.tmx");

    let mut keep = MapsDatabase::new(&path);
    keep.load_file().unwrap();
    let report = keep.load_str(&changed).unwrap();
    assert_eq!(report.duplicates.len(), 3);
    assert!(report.loaded.is_empty());
    assert_eq!(keep.get(MapId(1)).unwrap().map_path, "maps/village.tmx");

    let mut replace = MapsDatabase::new(&path).with_policy(DuplicatePolicy::Replace);
    replace.load_file().unwrap();
    let report = replace.load_str(&changed).unwrap();
    assert_eq!(report.duplicates.len(), 3);
    assert_eq!(report.loaded.len(), 3);
    assert_eq!(
        replace.get(MapId(1)).unwrap().map_path,
        "maps/village_winter.tmx"
    );
    assert_eq!(replace.len(), 3);
}
