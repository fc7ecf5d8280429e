use super::*;
use crate::foundation::core::Rgba;
use crate::loader::tests::{DOC, loaded, pooled};

const GREEN: &str = r#"{"bg": {"p": {"a": 0, "k": [0, 1, 0, 1]}}}"#;

fn fill(loader: &mut Loader) -> Option<Rgba> {
    loader.paint().unwrap().node("box").unwrap().fill
}

fn rebuild_pending(loader: &mut Loader) -> bool {
    loader.done().unwrap().rebuild
}

#[test]
fn overrides_apply_lazily_on_sync() {
    let (mut loader, counters) = loaded(pooled());
    assert!(loader.override_slots(Some(GREEN)));
    assert!(rebuild_pending(&mut loader));
    assert_eq!(fill(&mut loader), Some(Rgba::rgb(0.0, 0.0, 1.0)));

    loader.sync();
    assert_eq!(counters.updates(), 1);
    assert!(!rebuild_pending(&mut loader));
    assert_eq!(fill(&mut loader), Some(Rgba::rgb(0.0, 1.0, 0.0)));
}

#[test]
fn reset_restores_document_defaults() {
    let (mut loader, _) = loaded(pooled());
    assert!(loader.override_slots(Some(GREEN)));
    loader.sync();

    assert!(loader.override_slots(None));
    assert!(rebuild_pending(&mut loader));
    loader.sync();
    assert_eq!(fill(&mut loader), Some(Rgba::rgb(0.0, 0.0, 1.0)));
    assert!(!loader.document().unwrap().is_overridden());
}

#[test]
fn reset_without_overrides_changes_nothing() {
    let (mut loader, _) = loaded(pooled());
    assert!(loader.override_slots(None));
    assert!(!rebuild_pending(&mut loader));
}

#[test]
fn unknown_ids_and_mismatched_values_do_not_apply() {
    let (mut loader, _) = loaded(pooled());
    assert!(!loader.override_slots(Some(r#"{"nope": {"p": {"k": [1, 1, 1]}}}"#)));
    assert!(!loader.override_slots(Some(r#"{"bg": {"p": {"k": "red"}}}"#)));
    assert!(!loader.override_slots(Some(r#"{"title": {"p": {"k": 5}}}"#)));
    assert!(!rebuild_pending(&mut loader));
    assert!(!loader.document().unwrap().is_overridden());
}

#[test]
fn mixed_payloads_apply_what_matches() {
    let (mut loader, _) = loaded(pooled());
    let payload = r#"{"bg": {"p": {"k": [1, 1, 1]}}, "nope": {"p": {"k": 1}}}"#;
    assert!(loader.override_slots(Some(payload)));
    loader.sync();
    assert_eq!(fill(&mut loader), Some(Rgba::rgb(1.0, 1.0, 1.0)));
}

#[test]
fn a_failed_override_keeps_a_pending_rebuild() {
    let (mut loader, _) = loaded(pooled());
    assert!(loader.override_slots(Some(GREEN)));
    assert!(!loader.override_slots(Some(r#"{"nope": {"p": {"k": 1}}}"#)));
    assert!(rebuild_pending(&mut loader));
}

#[test]
fn malformed_payloads_are_rejected() {
    let (mut loader, _) = loaded(pooled());
    assert!(!loader.override_slots(Some("{\"bg\":")));
    assert!(!loader.override_slots(Some("[]")));
    assert!(!rebuild_pending(&mut loader));
}

#[test]
fn text_slots_take_text() {
    let (mut loader, _) = loaded(pooled());
    let payload = r#"{"title": {"p": {"k": [{"t": 0, "s": {"t": "Bye"}}]}}}"#;
    assert!(loader.override_slots(Some(payload)));
    loader.sync();
    let text = loader.paint().unwrap().node("label").unwrap().text.clone();
    assert_eq!(text.as_deref(), Some("Bye"));
}

#[test]
fn needs_a_document_with_slots() {
    let mut empty = Loader::new(pooled());
    assert!(!empty.override_slots(None));
    assert!(!empty.override_slots(Some(GREEN)));

    let mut plain = Loader::new(pooled());
    plain
        .open(br#"{"fr": 30, "op": 10, "layers": []}"#, None)
        .unwrap();
    plain.read().unwrap();
    assert!(!plain.override_slots(Some(GREEN)));
    assert!(!plain.override_slots(None));

    // Sanity: the fixture itself has slots.
    assert!(DOC.contains("\"sid\""));
}

#[test]
fn apply_walks_every_entry() {
    let (mut loader, _) = loaded(pooled());
    let doc = loader.document().unwrap();
    let mut parser = SlotParser::parse(GREEN).unwrap();
    assert!(apply(doc, &mut parser, true));
    assert_eq!(parser.next_sid(), None);
    assert!(!doc.is_overridden());
}
