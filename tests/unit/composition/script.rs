use super::*;
use crate::foundation::core::FrameIndex;

const TREE_SCENE: &str = r##"{
  "canvas": { "width": 640, "height": 360 },
  "fps": { "num": 10, "den": 1 },
  "background": "#101010",
  "components": {
    "bst": { "kind": "binary_tree", "tree": [5, 3, 8], "fill": "#ffffff", "color": "#000000" }
  },
  "script": [
    { "op": "tree_create", "target": "bst", "secs": 0.5 },
    { "op": "wait", "secs": 1 },
    { "op": "tree_fade_fill", "target": "bst", "key": 3, "color": "#e06c75", "secs": 0.5 }
  ]
}"##;

#[test]
fn tree_scene_compiles_to_expected_duration() {
    let comp = SceneFile::from_json_str(TREE_SCENE)
        .unwrap()
        .compile()
        .unwrap();
    // 5 reveal steps of 0.5s, 1s wait, 0.5s fade = 4s = 40 frames, plus the hold frame
    assert_eq!(comp.duration, FrameIndex(41));
    assert_eq!(comp.background, Rgba8::rgb(0x10, 0x10, 0x10));
    assert_eq!(comp.canvas.width, 640);
    // group + 3 circles + 3 labels + 2 edges
    assert_eq!(comp.scene.len(), 9);
}

#[test]
fn nested_tree_and_total_timing() {
    let json = r#"{
      "components": {
        "t": { "kind": "binary_tree", "tree": { "key": 2, "left": { "key": 1 } } }
      },
      "script": [ { "op": "tree_create", "target": "t", "total": 3.0 } ]
    }"#;
    let comp = SceneFile::from_json_str(json).unwrap().compile().unwrap();
    assert_eq!(comp.fps, Fps::default());
    assert_eq!(comp.duration, FrameIndex(181));
}

#[test]
fn tree_create_needs_one_timing() {
    let json = r#"{
      "components": { "t": { "kind": "binary_tree", "tree": [1] } },
      "script": [ { "op": "tree_create", "target": "t", "secs": 1, "total": 2 } ]
    }"#;
    let err = SceneFile::from_json_str(json).unwrap().compile().unwrap_err();
    assert!(err.to_string().contains("exactly one of"));
}

#[test]
fn every_component_kind_mounts_and_animates() {
    let json = r##"{
      "fps": { "num": 10, "den": 1 },
      "components": {
        "bars": { "kind": "composite", "powers": [0, 2, 1], "position": [0, 200] },
        "list": { "kind": "list", "values": ["1", "2"], "background": "#303030" },
        "title": { "kind": "letters", "text": "hello", "font_size": 48 }
      },
      "script": [
        { "op": "all", "cues": [
          { "op": "letters_show", "target": "title", "secs": 1 },
          { "op": "composite_create", "target": "bars", "secs": 1 }
        ] },
        { "op": "list_push", "target": "list", "value": "3", "secs": 1 },
        { "op": "list_place", "target": "list", "value": "0", "index": 0, "secs": 1 },
        { "op": "list_delete", "target": "list", "index": 1, "secs": 1 },
        { "op": "list_set", "target": "list", "value": "9", "index": 0, "secs": 1 },
        { "op": "list_highlight", "target": "list", "index": 1, "secs": 0.5 },
        { "op": "list_unhighlight", "target": "list", "secs": 0.5 },
        { "op": "list_turn", "target": "list", "degrees": 90, "secs": 0.5 },
        { "op": "list_pop", "target": "list", "secs": 1 },
        { "op": "composite_change", "target": "bars", "powers": [1, 1], "secs": 1 },
        { "op": "composite_shade", "target": "bars", "colors": ["#ff0000", "#00ff00"], "secs": 1 },
        { "op": "composite_shade", "target": "bars", "secs": 1 },
        { "op": "composite_hide", "target": "bars" },
        { "op": "composite_show", "target": "bars" },
        { "op": "delay", "secs": 0.5, "cue": { "op": "letters_hide", "target": "title", "secs": 1 } },
        { "op": "letters_edit", "target": "title", "text": "bye" },
        { "op": "chain", "cues": [ { "op": "composite_destroy", "target": "bars" } ] }
      ]
    }"##;
    let comp = SceneFile::from_json_str(json).unwrap().compile().unwrap();
    // Letter reveals finish just before their nominal time, so the script ends at ~11.996s.
    assert_eq!(comp.duration, FrameIndex(121));
}

#[test]
fn unknown_component_is_rejected() {
    let json = r#"{ "script": [ { "op": "list_pop", "target": "nope", "secs": 1 } ] }"#;
    let err = SceneFile::from_json_str(json).unwrap().compile().unwrap_err();
    assert!(err.to_string().contains("unknown component 'nope'"));
}

#[test]
fn wrong_component_kind_is_rejected() {
    let json = r#"{
      "components": { "t": { "kind": "binary_tree", "tree": [1] } },
      "script": [ { "op": "list_pop", "target": "t", "secs": 1 } ]
    }"#;
    let err = SceneFile::from_json_str(json).unwrap().compile().unwrap_err();
    assert_eq!(
        err.to_string(),
        "validation error: component 't' is a binary_tree, not a list"
    );
}

#[test]
fn fade_fill_on_missing_key_is_a_lookup_error() {
    let json = r##"{
      "components": { "t": { "kind": "binary_tree", "tree": [1, 2] } },
      "script": [ { "op": "tree_fade_fill", "target": "t", "key": 7, "color": "#ff0000", "secs": 1 } ]
    }"##;
    let err = SceneFile::from_json_str(json).unwrap().compile().unwrap_err();
    assert!(matches!(err, SaplingError::Lookup(_)));
}

#[test]
fn bad_config_is_rejected() {
    let bad_fps = r#"{ "fps": { "num": 0, "den": 1 } }"#;
    assert!(SceneFile::from_json_str(bad_fps).unwrap().compile().is_err());

    let bad_canvas = r#"{ "canvas": { "width": 0, "height": 10 } }"#;
    assert!(SceneFile::from_json_str(bad_canvas).unwrap().compile().is_err());

    let unknown_field = r##"{ "colour": "#ffffff" }"##;
    let err = SceneFile::from_json_str(unknown_field).unwrap_err();
    assert!(err.to_string().starts_with("serialization error:"));

    let bad_color = r##"{ "background": "#12" }"##;
    assert!(SceneFile::from_json_str(bad_color).is_err());

    let empty_tree = r#"{ "components": { "t": { "kind": "binary_tree", "tree": [] } } }"#;
    assert!(SceneFile::from_json_str(empty_tree).unwrap().compile().is_err());
}
