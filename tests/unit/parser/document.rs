use super::*;
use crate::model::property::Animated;

const DOC: &str = r##"{
  "v": "5.7.4", "nm": "demo", "fr": 30, "ip": 0, "op": 60, "w": 200, "h": 100,
  "markers": [{"cm": "intro", "tm": 0, "dr": 20}, {"cm": "outro", "tm": 40, "dr": 20}],
  "slots": {"bg": {"p": {"a": 0, "k": [0, 0, 1, 1]}}},
  "layers": [
    {"nm": "title", "ty": 5, "ind": 1, "ip": 10,
     "ks": {"o": {"a": 0, "k": 80, "ix": 11}},
     "t": {"d": {"k": [{"t": 0, "s": {"t": "Hello", "s": 24}}], "sid": "title"}}},
    {"nm": "shape", "ty": 4, "ind": 2, "hd": false,
     "ks": {"p": {"a": 1, "k": [{"t": 0, "s": [0, 0]}, {"t": 60, "s": [100, 50]}]}},
     "shapes": [{"ty": "gr", "it": [
        {"ty": "rc"},
        {"ty": "fl", "c": {"a": 0, "k": [1, 0, 0, 1], "sid": "bg"}}
     ]}]},
    {"nm": "bg", "ty": 1, "sc": "#00ff00"},
    {"nm": "ctrl", "ty": 3, "ks": {"p": {"s": true, "x": {"k": 1}, "y": {"k": 2}}}}
  ]
}"##;

fn parse(src: &str) -> LoaderResult<ParsedDocument> {
    DocumentParser::new(src.as_bytes(), Path::new("assets"), None).parse()
}

#[test]
fn header_and_markers() {
    let doc = parse(DOC).unwrap().document;
    assert_eq!(doc.version.as_deref(), Some("5.7.4"));
    assert_eq!(doc.name.as_deref(), Some("demo"));
    assert_eq!(doc.width, 200.0);
    assert_eq!(doc.frame_count(), 60.0);
    assert_eq!(doc.resource_dir, Path::new("assets"));
    assert_eq!(doc.markers.len(), 2);
    assert_eq!(doc.markers[1].name, "outro");
    assert_eq!(doc.markers[1].time, 40.0);
    assert_eq!(doc.root.clip.as_ref().unwrap().rect.width(), 200.0);
    assert!(!doc.expressions);
}

#[test]
fn layers_carry_kind_fill_and_text() {
    let doc = parse(DOC).unwrap().document;
    assert_eq!(doc.layers.len(), 4);

    let title = &doc.layers[0];
    assert_eq!(title.kind, LayerKind::Text);
    assert_eq!(title.in_point, 10.0);
    assert_eq!(title.out_point, 60.0);
    assert_eq!(title.transform.opacity.ix, Some(11));
    let text = title.text.as_ref().unwrap();
    assert_eq!(text.value.sample(0.0), "Hello");
    assert_eq!(text.sid.as_deref(), Some("title"));

    let shape = &doc.layers[1];
    assert!(shape.transform.position.value.is_animated());
    let fill = shape.fill.as_ref().unwrap();
    assert_eq!(fill.sid.as_deref(), Some("bg"));

    let bg = &doc.layers[2];
    assert_eq!(bg.kind, LayerKind::Solid);
    assert_eq!(
        bg.fill.as_ref().unwrap().value,
        Animated::Static(Rgba::rgb(0.0, 1.0, 0.0))
    );

    // Split positions are not modelled and fall back to the default.
    let ctrl = &doc.layers[3];
    assert_eq!(ctrl.kind, LayerKind::Null);
    assert_eq!(ctrl.transform.position, LayerTransform::default().position);
}

#[test]
fn slots_and_defaults_are_collected() {
    let parsed = parse(DOC).unwrap();
    let sids: Vec<&str> = parsed.document.slots.iter().map(|s| s.sid()).collect();
    assert_eq!(sids, ["title", "bg"]);

    let mut defaults = parsed.default_slots.unwrap();
    assert_eq!(defaults.next_sid().as_deref(), Some("bg"));
    assert_eq!(defaults.next_sid(), None);
}

#[test]
fn expressions_need_an_engine() {
    let src = r#"{"fr": 30, "op": 10, "w": 10, "h": 10, "layers": [
        {"nm": "a", "ty": 4, "ks": {"r": {"a": 0, "k": 0, "x": "frame * 2"}}}]}"#;
    assert!(!parse(src).unwrap().document.expressions);

    let engine = ExpressionEngine::new();
    let doc = DocumentParser::new(src.as_bytes(), Path::new(""), Some(&engine))
        .parse()
        .unwrap()
        .document;
    assert!(doc.expressions);
    assert!(doc.layers[0].transform.rotation.expression.is_some());
}

#[test]
fn nul_terminated_content_is_accepted() {
    let mut bytes = br#"{"fr": 24, "op": 48}"#.to_vec();
    bytes.push(0);
    bytes.extend_from_slice(b"garbage");
    let doc = DocumentParser::new(&bytes, Path::new(""), None)
        .parse()
        .unwrap()
        .document;
    assert_eq!(doc.frame_rate, 24.0);
    assert!(doc.layers.is_empty());
}

#[test]
fn rejects_malformed_documents() {
    assert!(matches!(parse("{"), Err(LoaderError::Parse(_))));
    assert!(matches!(parse(r#"{"op": 10}"#), Err(LoaderError::Parse(_))));
    assert!(matches!(parse(r#"{"fr": 0, "op": 10}"#), Err(LoaderError::Parse(_))));
    assert!(matches!(
        parse(r#"{"fr": 30, "ip": 20, "op": 10}"#),
        Err(LoaderError::Parse(_))
    ));
}

#[test]
fn hidden_fills_are_skipped() {
    let shapes = serde_json::json!([
        {"ty": "fl", "hd": true, "c": {"k": [1, 1, 1]}},
        {"ty": "gr", "it": [{"ty": "fl", "c": {"k": [0, 0, 0]}}]}
    ]);
    let found = first_fill(shapes.as_array().unwrap()).unwrap();
    assert_eq!(found["k"], serde_json::json!([0, 0, 0]));
}
