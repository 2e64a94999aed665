use corridor_math::Vec3;
use corridor_runtime::prelude::*;
use corridor_section::JsonDirRepository;
use corridor_triggers::ActionRecorder;
use std::fs;
use std::path::Path;

fn section_json(id: &str, valid: bool) -> String {
    format!(
        r#"{{
            "sectionId": "{id}",
            "entities": [{{
                "id": "door",
                "position": {{ "x": 0, "y": 1, "z": 10 }},
                "size": {{ "width": 2, "height": 2, "depth": 1 }},
                "events": [{{
                    "trigger": "onPlayerEnter",
                    "actions": [
                        {{ "type": "playAnimation", "animationName": "Open" }},
                        {{ "type": "teleport" }}
                    ]
                }}]
            }}],
            "triggerBoxes": [{{
                "position": {{ "x": 0, "y": 1, "z": 19 }},
                "size": {{ "width": 4, "height": 3, "depth": 1 }},
                "valid": {valid},
                "newOrigin": {{ "x": 0, "y": 0, "z": 20 }},
                "newRotation": {{ "x": 0, "y": 0, "z": 0 }}
            }}]
        }}"#
    )
}

fn write_sections(root: &Path) {
    fs::create_dir_all(root.join("anomaly")).unwrap();
    fs::write(root.join("default.json"), section_json("default", true)).unwrap();
    fs::write(root.join("anomaly/Section_1.json"), section_json("anomaly/Section_1", false)).unwrap();
    fs::write(root.join("anomaly/Section_2.json"), section_json("anomaly/Section_2", false)).unwrap();
}

#[test]
fn config_file_drives_a_session() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path().join("sections");
    write_sections(&root);

    let config_path = dir.path().join("corridor.toml");
    fs::write(
        &config_path,
        format!(
            r#"
            [streaming]
            anomaly_chance_percent = 0
            initial_section_id = "default"
            seed = 9

            [sections]
            root = "{}"
            anomaly_dir = "anomaly"

            [agent]
            waypoints = [{{ x = 0.0, y = 1.0, z = 0.0 }}, {{ x = 0.0, y = 1.0, z = 25.0 }}]
            speed = 10.0

            [session]
            tick_rate = 20
            "#,
            root.display().to_string().replace('\\', "/")
        ),
    )
    .unwrap();

    let mut config = RuntimeConfig::from_file(&config_path).unwrap();
    assert_eq!(config.config_path.as_deref(), Some(config_path.as_path()));

    let repository = JsonDirRepository::new(&config.sections.root);
    config.resolve_anomaly_pool(&repository).unwrap();
    assert_eq!(config.streaming.anomaly_pool, vec!["anomaly/Section_1", "anomaly/Section_2"]);

    let mut session = Session::new(config.streaming.clone(), repository).unwrap();
    session.start().unwrap();

    let mut agent = WaypointAgent::new(config.agent.waypoints.clone(), config.agent.speed);
    let mut sink = ActionRecorder::new();
    let mut transitions = Vec::new();
    while !agent.is_finished() {
        agent.advance(config.session.tick_interval());
        let report = session.tick(&agent, &mut sink).unwrap();
        assert!(report.failures.is_empty());
        transitions.extend(report.transitions);
    }

    assert_eq!(transitions.len(), 1);
    assert!(transitions[0].section_id.starts_with("anomaly/Section_"));
    assert_eq!(transitions[0].pass_counter, 1);
    assert!(transitions[0].frame.origin.approx_eq(Vec3::new(0.0, 0.0, 20.0), 1e-5));

    // The unknown "teleport" action was dropped while loading; only the animation ran
    assert_eq!(sink.len(), 1);
    assert_eq!(sink.executed[0].0, "door");
}

#[test]
fn missing_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let err = RuntimeConfig::from_file(&dir.path().join("nope.toml")).unwrap_err();
    assert!(matches!(err, RuntimeError::ConfigIo { .. }));
}

#[test]
fn malformed_config_file_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    fs::write(&path, "[streaming\nanomaly_chance_percent = ").unwrap();
    let err = RuntimeConfig::from_file(&path).unwrap_err();
    assert!(matches!(err, RuntimeError::ConfigParse { .. }));
}

#[test]
fn missing_anomaly_folder_leaves_pool_empty() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("default.json"), section_json("default", true)).unwrap();

    let mut config = RuntimeConfig::default();
    config.sections.root = dir.path().to_path_buf();
    config.streaming.anomaly_chance_percent = 0;

    let repository = JsonDirRepository::new(&config.sections.root);
    config.resolve_anomaly_pool(&repository).unwrap();
    assert!(config.streaming.anomaly_pool.is_empty());

    // Every valid pass degrades to the default section
    let mut session = Session::new(config.streaming.clone(), repository).unwrap();
    session.start().unwrap();
    let mut sink = ActionRecorder::new();
    let report = session.tick(&Vec3::new(0.0, 1.0, 19.0), &mut sink).unwrap();
    assert_eq!(report.transitions.len(), 1);
    assert_eq!(report.transitions[0].section_id, "default");
    assert_eq!(report.transitions[0].pass_counter, 1);
}
