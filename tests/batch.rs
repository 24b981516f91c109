use figschema::{run_avatar_groups, run_batch, run_checkboxes, BatchCommand, BatchConfig};
use figschema_common::{ComponentKind, SchemaError};
use figschema_core::{ColorTable, SourceDocument};
use figschema_projector::{RandomIdSource, SequentialIdSource};
use serde_json::{json, Value};
use std::path::Path;

fn sample_document() -> Value {
    json!({
        "Result": {
            "nodes": {
                "20:1": {
                    "document": {
                        "type": "INSTANCE",
                        "name": "Newsletter",
                        "componentProperties": {
                            "Checked": { "value": "False" },
                            "Type": { "value": "Checkbox" },
                            "Size": { "value": "md" }
                        },
                        "children": [{
                            "name": "Text and supporting text",
                            "children": [
                                {
                                    "name": "Text",
                                    "characters": "Subscribe",
                                    "style": { "fontSize": 16, "fontWeight": 500 },
                                    "fills": [{ "type": "SOLID", "color": { "r": 0.0627, "g": 0.0941, "b": 0.1569 } }]
                                },
                                {
                                    "name": "Supporting text",
                                    "characters": "Once a week",
                                    "style": { "fontSize": 14, "fontWeight": 400 }
                                }
                            ]
                        }]
                    }
                },
                "20:2": {
                    "document": {
                        "type": "INSTANCE",
                        "name": "Avatar group",
                        "children": [{
                            "name": "Avatars",
                            "children": [
                                { "name": "Avatar" }, { "name": "Avatar" }, { "name": "Avatar" },
                                { "name": "Avatar" }, { "name": "Avatar" }, { "name": "Avatar" }
                            ]
                        }]
                    }
                },
                "20:3": {
                    "document": {
                        "type": "INSTANCE",
                        "name": "Terms",
                        "componentProperties": { "Type": { "value": "Checkbox" } }
                    }
                }
            },
            "styles": {}
        }
    })
}

fn write_input(dir: &Path, value: &Value) -> BatchConfig {
    let input = dir.join("figmaResponse.json");
    std::fs::write(&input, serde_json::to_string_pretty(value).unwrap()).unwrap();
    BatchConfig {
        input,
        output_dir: dir.join("out"),
        tokens: None,
    }
}

fn read_json(path: &Path) -> Value {
    serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_checkbox_batch_writes_output() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());
    let doc = config.load_document().unwrap();

    let report = run_checkboxes(&doc, &ColorTable::design_system(), &config).unwrap();

    assert_eq!(report.kind, ComponentKind::Checkbox);
    assert_eq!(report.count, 2);
    let path = report.written.unwrap();
    assert_eq!(path, dir.path().join("out").join("transformedCheckboxes.json"));

    let output = read_json(&path);
    let schema = &output["b_20:1"];
    assert_eq!(schema["id"], "b_20:1");
    assert_eq!(schema["component"]["content"]["defaultValue"], "false");
    assert_eq!(schema["component"]["content"]["label"], "Subscribe");
    assert_eq!(schema["component"]["content"]["description"], "Once a week");
    assert_eq!(schema["component"]["content"]["addOns"]["label"]["color"], "Primary");
    assert_eq!(schema["component"]["content"]["addOns"]["description"]["color"], "Tertiary");
    assert_eq!(schema["component"]["appearance"]["size"], "md");
    assert_eq!(output["b_20:3"]["component"]["content"]["defaultValue"], "");
}

#[test]
fn test_output_is_pretty_printed_in_document_order() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());
    let doc = config.load_document().unwrap();

    let report = run_checkboxes(&doc, &ColorTable::design_system(), &config).unwrap();
    let raw = std::fs::read_to_string(report.written.unwrap()).unwrap();

    assert!(raw.starts_with("{\n  \"b_20:1\": {\n    \"component\": {"));
    let first = raw.find("\"b_20:1\"").unwrap();
    let second = raw.find("\"b_20:3\"").unwrap();
    assert!(first < second);
}

#[test]
fn test_rerun_is_byte_identical() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());
    let colors = ColorTable::design_system();

    let doc = config.load_document().unwrap();
    let checkbox_path = run_checkboxes(&doc, &colors, &config).unwrap().written.unwrap();
    let avatar_path = run_avatar_groups(&doc, SequentialIdSource::new(), &config)
        .unwrap()
        .written
        .unwrap();
    let first = (
        std::fs::read(&checkbox_path).unwrap(),
        std::fs::read(&avatar_path).unwrap(),
    );

    let doc = config.load_document().unwrap();
    run_checkboxes(&doc, &colors, &config).unwrap();
    run_avatar_groups(&doc, SequentialIdSource::new(), &config).unwrap();
    let second = (
        std::fs::read(&checkbox_path).unwrap(),
        std::fs::read(&avatar_path).unwrap(),
    );

    assert_eq!(first, second);
}

#[test]
fn test_avatar_batch_with_random_ids() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());
    let doc = config.load_document().unwrap();

    let report = run_avatar_groups(&doc, RandomIdSource::new(), &config).unwrap();

    assert_eq!(report.count, 1);
    let output = read_json(&report.written.unwrap());
    let items = output["b_20:2"]["component"]["content"]["avatarGroupItems"]
        .as_array()
        .unwrap();
    assert_eq!(items.len(), 6);
    assert_eq!(items[4]["value"], "avatarAvatar5");
    let overflow_id = items[5]["id"].as_str().unwrap();
    assert!(overflow_id.starts_with("avatarGroup_"));
    assert_eq!(items[5]["value"], overflow_id);
    assert_eq!(items[5]["blockId"], "__PLACEHOLDER__");
}

#[test]
fn test_no_matches_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        &json!({ "Result": { "nodes": { "1:1": { "document": { "type": "FRAME", "name": "Page" } } } } }),
    );
    let doc = config.load_document().unwrap();

    let checkboxes = run_checkboxes(&doc, &ColorTable::design_system(), &config).unwrap();
    let avatars = run_avatar_groups(&doc, SequentialIdSource::new(), &config).unwrap();

    assert_eq!(checkboxes.count, 0);
    assert!(checkboxes.written.is_none());
    assert!(avatars.written.is_none());
    assert!(!config.output_path(ComponentKind::Checkbox).exists());
    assert!(!config.output_path(ComponentKind::AvatarGroup).exists());
}

#[test]
fn test_structural_and_io_errors() {
    let dir = tempfile::tempdir().unwrap();

    let config = write_input(dir.path(), &json!({ "Result": { "styles": {} } }));
    assert!(matches!(config.load_document(), Err(SchemaError::MissingNodes)));

    let missing = BatchConfig {
        input: dir.path().join("absent.json"),
        ..Default::default()
    };
    assert!(matches!(missing.load_document(), Err(SchemaError::Io(_))));

    std::fs::write(dir.path().join("broken.json"), "{\"Result\": ").unwrap();
    let broken = BatchConfig {
        input: dir.path().join("broken.json"),
        ..Default::default()
    };
    assert!(matches!(broken.load_document(), Err(SchemaError::Json(_))));
}

#[test]
fn test_custom_token_table() {
    let dir = tempfile::tempdir().unwrap();
    let tokens = dir.path().join("tokens.json");
    std::fs::write(&tokens, r##"{"Ink": {"value": "#101828"}}"##).unwrap();

    let mut config = write_input(dir.path(), &sample_document());
    config.tokens = Some(tokens);
    let colors = config.load_colors().unwrap();
    let doc: SourceDocument = config.load_document().unwrap();

    let report = run_checkboxes(&doc, &colors, &config).unwrap();
    let output = read_json(&report.written.unwrap());
    assert_eq!(
        output["b_20:1"]["component"]["content"]["addOns"]["label"]["color"],
        "Ink"
    );
}

#[test]
fn test_all_runs_both_projectors() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());

    let reports = run_batch(BatchCommand::All, &config, SequentialIdSource::new()).unwrap();

    let kinds: Vec<ComponentKind> = reports.iter().map(|r| r.kind).collect();
    assert_eq!(kinds, vec![ComponentKind::Checkbox, ComponentKind::AvatarGroup]);
    assert_eq!(reports[0].count, 2);
    assert_eq!(reports[1].count, 1);
    assert!(config.output_path(ComponentKind::Checkbox).exists());
    assert!(config.output_path(ComponentKind::AvatarGroup).exists());
}

#[test]
fn test_single_command_runs_one_projector() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &sample_document());

    let reports = run_batch(BatchCommand::AvatarGroup, &config, SequentialIdSource::new()).unwrap();

    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].kind, ComponentKind::AvatarGroup);
    assert!(!config.output_path(ComponentKind::Checkbox).exists());
}

#[test]
fn test_missing_nodes_fails_every_command() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(dir.path(), &json!({ "Result": { "styles": {} } }));

    for command in [BatchCommand::Checkbox, BatchCommand::AvatarGroup, BatchCommand::All] {
        let result = run_batch(command, &config, SequentialIdSource::new());
        assert!(matches!(result, Err(SchemaError::MissingNodes)), "{:?}", command);
    }
}

#[test]
fn test_no_matches_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        &json!({ "Result": { "nodes": { "1:1": { "document": { "type": "FRAME" } } } } }),
    );

    let reports = run_batch(BatchCommand::All, &config, SequentialIdSource::new()).unwrap();

    assert_eq!(reports.len(), 2);
    assert!(reports.iter().all(|r| r.count == 0 && r.written.is_none()));
}

#[test]
fn test_malformed_descendant_keeps_checkbox() {
    let dir = tempfile::tempdir().unwrap();
    let config = write_input(
        dir.path(),
        &json!({
            "Result": {
                "nodes": {
                    "7:1": {
                        "document": {
                            "type": "INSTANCE",
                            "name": "Remember me",
                            "componentProperties": { "Type": { "value": "Checkbox" } },
                            "children": [
                                { "type": "VECTOR", "strokeWeight": "mixed" },
                                { "type": null, "name": "Check" }
                            ]
                        }
                    }
                }
            }
        }),
    );

    let reports = run_batch(BatchCommand::Checkbox, &config, SequentialIdSource::new()).unwrap();

    assert_eq!(reports[0].count, 1);
    let output = read_json(reports[0].written.as_ref().unwrap());
    assert_eq!(output["b_7:1"]["displayName"], "Remember me");
}
