use std::path::Path;

use approx::assert_relative_eq;
use kurbo::Point;

use super::*;
use crate::parser::DocumentParser;

const DOC: &str = r#"{
  "fr": 10, "ip": 10, "op": 30, "w": 100, "h": 100,
  "layers": [
    {"nm": "top", "ty": 4, "ip": 10, "op": 20,
     "ks": {"p": {"a": 0, "k": [50, 50]}, "a": {"a": 0, "k": [5, 5]},
            "o": {"a": 1, "k": [{"t": 10, "s": [0]}, {"t": 20, "s": [100]}]}}},
    {"nm": "spin", "ty": 4,
     "ks": {"r": {"a": 0, "k": 0, "ix": 10, "x": "frame * speed"},
            "s": {"a": 0, "k": [200, 50], "sid": "size"}}},
    {"nm": "ctrl", "ty": 3}
  ]
}"#;

fn document(builder: &LottieBuilder) -> Document {
    DocumentParser::new(DOC.as_bytes(), Path::new(""), builder.expressions())
        .parse()
        .unwrap()
        .document
}

#[test]
fn build_evaluates_the_in_point() {
    let mut builder = LottieBuilder::new();
    let mut doc = document(&builder);
    builder.build(&mut doc).unwrap();

    assert_eq!(doc.root.frame, 10.0);
    // Painter's order: bottom layer first, null layers skipped.
    let names: Vec<&str> = doc.root.nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, ["spin", "top"]);

    let top = doc.root.node("top").unwrap();
    assert_eq!(top.opacity, 0.0);
    assert_eq!(top.transform * Point::new(5.0, 5.0), Point::new(50.0, 50.0));
}

#[test]
fn update_samples_keyframes_and_visibility() {
    let mut builder = LottieBuilder::new();
    let mut doc = document(&builder);

    builder.update(&mut doc, 5.0).unwrap();
    assert_relative_eq!(doc.root.node("top").unwrap().opacity, 0.5);

    builder.update(&mut doc, 10.0).unwrap();
    assert!(doc.root.node("top").is_none());
    assert!(doc.root.node("spin").is_some());
}

#[test]
fn slots_replace_bound_values() {
    let mut builder = LottieBuilder::new();
    let mut doc = document(&builder);
    builder.update(&mut doc, 0.0).unwrap();
    let p = doc.root.node("spin").unwrap().transform * Point::new(1.0, 1.0);
    assert_relative_eq!(p.x, 2.0);
    assert_relative_eq!(p.y, 0.5);

    let slot = doc.slots.iter_mut().find(|s| s.sid() == "size").unwrap();
    assert!(slot.set(SlotValue::Vector(Animated::Static(Vec2::new(100.0, 100.0))), false));
    builder.update(&mut doc, 0.0).unwrap();
    let p = doc.root.node("spin").unwrap().transform * Point::new(1.0, 1.0);
    assert_relative_eq!(p.x, 1.0);
    assert_relative_eq!(p.y, 1.0);
}

#[test]
fn expressions_read_assigned_variables() {
    let mut builder = LottieBuilder::new();
    let mut doc = document(&builder);
    assert!(doc.expressions);

    // `speed` unresolved: the keyframed value (0 degrees) is kept.
    builder.update(&mut doc, 0.0).unwrap();
    let p = doc.root.node("spin").unwrap().transform * Point::new(1.0, 0.0);
    assert_relative_eq!(p.x, 2.0);

    // frame 10 * 9 = 90 degrees.
    doc.layer_mut("spin").unwrap().assign(10, "speed", 9.0);
    builder.update(&mut doc, 0.0).unwrap();
    let p = doc.root.node("spin").unwrap().transform * Point::new(1.0, 0.0);
    assert_relative_eq!(p.x, 0.0, epsilon = 1e-9);
    assert_relative_eq!(p.y, 2.0, epsilon = 1e-9);
}

#[test]
fn builders_without_engine_ignore_expressions() {
    let mut builder = LottieBuilder::without_expressions();
    assert!(builder.expressions().is_none());
    let mut doc = document(&builder);
    assert!(!doc.expressions);
    doc.layer_mut("spin").unwrap().assign(10, "speed", 9.0);
    builder.update(&mut doc, 0.0).unwrap();
    let p = doc.root.node("spin").unwrap().transform * Point::new(1.0, 0.0);
    assert_relative_eq!(p.x, 2.0);
}

#[test]
fn tween_blends_towards_the_target() {
    let mut builder = LottieBuilder::new();
    let mut doc = document(&builder);
    assert!(!builder.tweening());

    builder.on_tween(8.0, 0.5);
    assert!(builder.tweening());
    builder.update(&mut doc, 2.0).unwrap();
    // Opacity 20% at frame 2, 80% at frame 8.
    assert_relative_eq!(doc.root.node("top").unwrap().opacity, 0.5, epsilon = 1e-6);
    assert_eq!(doc.root.frame, 12.0);

    builder.off_tween();
    assert!(!builder.tweening());
    builder.update(&mut doc, 2.0).unwrap();
    assert_relative_eq!(doc.root.node("top").unwrap().opacity, 0.2, epsilon = 1e-6);
}
