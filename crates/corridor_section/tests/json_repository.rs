//! Integration tests for the JSON directory repository

use corridor_math::Vec3;
use corridor_section::prelude::*;
use std::fs;

fn write(root: &std::path::Path, relative: &str, json: &str) {
    let path = root.join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, json).unwrap();
}

const DEFAULT_SECTION: &str = r#"{
    "sectionId": "default",
    "entities": [
        {
            "id": "floor",
            "position": { "x": 0, "y": -0.5, "z": 5 },
            "size": { "width": 4, "height": 1, "depth": 10 },
            "type": "corridor",
            "mesh": "Primitive:Cube"
        }
    ],
    "triggerBoxes": [
        {
            "position": { "x": 0, "y": 1, "z": 10 },
            "size": { "width": 4, "height": 2, "depth": 1 },
            "valid": true,
            "newOrigin": { "x": 0, "y": 0, "z": 10 },
            "newRotation": { "x": 0, "y": 0, "z": 0 }
        }
    ]
}"#;

#[test]
fn test_fetch_section_from_directory() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "default.json", DEFAULT_SECTION);

    let repo = JsonDirRepository::new(dir.path());
    let section = repo.fetch("default").expect("default section should load");

    assert_eq!(section.id, "default");
    assert_eq!(section.entities.len(), 1);
    assert_eq!(section.entities[0].size, Vec3::new(4.0, 1.0, 10.0));
    assert_eq!(section.triggers.len(), 1);
    assert!(repo.contains("default"));
}

#[test]
fn test_missing_section_is_not_found() {
    let dir = tempfile::tempdir().unwrap();
    let repo = JsonDirRepository::new(dir.path());

    let err = repo.fetch("nowhere").unwrap_err();
    assert!(err.is_not_found());
    assert!(!repo.contains("nowhere"));

    let err = repo.fetch("../escape").unwrap_err();
    assert!(err.is_not_found());
}

#[test]
fn test_broken_file_is_parse_error() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "broken.json", "{ \"entities\": [ ");

    let repo = JsonDirRepository::new(dir.path());
    let err = repo.fetch("broken").unwrap_err();
    assert!(matches!(err, RepositoryError::Parse { .. }));
}

#[test]
fn test_enumerate_anomaly_folder() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "default.json", DEFAULT_SECTION);
    write(dir.path(), "anomaly/Section_2.json", r#"{ "sectionId": "Section_2" }"#);
    write(dir.path(), "anomaly/Section_1.json", r#"{ "sectionId": "Section_1" }"#);
    write(dir.path(), "anomaly/notes.txt", "not a section");

    let repo = JsonDirRepository::new(dir.path());
    let pool = repo.enumerate("anomaly").unwrap();
    assert_eq!(pool, vec!["anomaly/Section_1", "anomaly/Section_2"]);

    for id in &pool {
        assert_eq!(repo.fetch(id).unwrap().id, *id);
    }

    assert_eq!(repo.enumerate("").unwrap(), vec!["default"]);
    assert!(repo.enumerate("missing").unwrap_err().is_not_found());
}
