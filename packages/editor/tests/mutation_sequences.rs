//! Tests for long and random sequences of edits
//!
//! This tests:
//! - Id uniqueness under any mix of successful and failed edits
//! - Undo of a whole sequence returning to the starting tree
//! - Redo of a whole sequence reproducing the final tree
//! - Redo invalidation by a new edit
//! - Saved markup reloading with the same ids and sibling order

use htmled_editor::{Document, EditorError};
use proptest::prelude::*;
use std::collections::HashSet;

#[derive(Debug, Clone)]
enum Op {
    Insert { tag: usize, id: usize, target: usize },
    Append { tag: usize, id: usize, parent: usize },
    Delete { id: usize },
    Rename { from: usize, to: usize },
    SetText { id: usize, text: Option<usize> },
}

/// Includes void elements and names the markup lexer cannot read
const TAGS: [&str; 9] = ["div", "p", "span", "li", "img", "br", "x-widget", "a/b", "1st"];
const WORDS: [&str; 4] = ["alpha", "beta gamma", "", "<a & \"b\">"];

/// A small id pool so that collisions and misses happen often
fn id_name(n: usize) -> String {
    match n % 10 {
        0 => "body".to_string(),
        1 => "title".to_string(),
        k => format!("n{}", k),
    }
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0..TAGS.len(), 0..10usize, 0..10usize)
            .prop_map(|(tag, id, target)| Op::Insert { tag, id, target }),
        (0..TAGS.len(), 0..10usize, 0..10usize)
            .prop_map(|(tag, id, parent)| Op::Append { tag, id, parent }),
        (0..10usize).prop_map(|id| Op::Delete { id }),
        (0..10usize, 0..10usize).prop_map(|(from, to)| Op::Rename { from, to }),
        (0..10usize, proptest::option::of(0..WORDS.len()))
            .prop_map(|(id, text)| Op::SetText { id, text }),
    ]
}

fn run(doc: &mut Document, op: &Op) -> Result<(), EditorError> {
    match op {
        Op::Insert { tag, id, target } => {
            doc.insert_before(TAGS[*tag], &id_name(*id), &id_name(*target), None)
        }
        Op::Append { tag, id, parent } => {
            doc.append_child(TAGS[*tag], &id_name(*id), &id_name(*parent), None)
        }
        Op::Delete { id } => doc.delete(&id_name(*id)),
        Op::Rename { from, to } => doc.rename_id(&id_name(*from), &id_name(*to)),
        Op::SetText { id, text } => doc.set_text(&id_name(*id), text.map(|t| WORDS[t])),
    }
}

fn assert_unique_ids(doc: &Document) {
    let ids = doc.tree().ids();
    let unique: HashSet<&str> = ids.iter().copied().collect();
    assert_eq!(ids.len(), unique.len(), "duplicate ids in {:?}", ids);
}

proptest! {
    #[test]
    fn prop_ids_stay_unique(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut doc = Document::new_empty("prop.html");
        for op in &ops {
            let _ = run(&mut doc, op);
            assert_unique_ids(&doc);
            prop_assert!(doc.tree().check_consistency().is_ok());
        }
    }

    #[test]
    fn prop_undo_all_then_redo_all(ops in prop::collection::vec(op_strategy(), 0..30)) {
        let mut doc = Document::new_empty("prop.html");
        let start = doc.tree().clone();

        let mut applied = 0;
        for op in &ops {
            if run(&mut doc, op).is_ok() {
                applied += 1;
            }
        }
        let end = doc.tree().clone();
        prop_assert_eq!(doc.history().undo_count(), applied);

        for _ in 0..applied {
            doc.undo().unwrap();
        }
        prop_assert_eq!(doc.tree(), &start);
        prop_assert!(matches!(doc.undo(), Err(EditorError::EmptyHistory(_))));

        for _ in 0..applied {
            doc.redo().unwrap();
        }
        prop_assert_eq!(doc.tree(), &end);
        prop_assert!(matches!(doc.redo(), Err(EditorError::EmptyHistory(_))));
    }

    #[test]
    fn prop_saved_markup_reloads(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let mut doc = Document::new_empty("prop.html");
        for op in &ops {
            let _ = run(&mut doc, op);
        }

        let source = doc.source();
        let reloaded = Document::from_source("prop.html", &source);
        prop_assert!(reloaded.is_ok(), "{:?}\n{}", reloaded.as_ref().err(), source);
        let reloaded = reloaded.unwrap();

        prop_assert_eq!(reloaded.tree().ids(), doc.tree().ids());
        for id in doc.tree().ids() {
            prop_assert_eq!(reloaded.tree().child_ids(id), doc.tree().child_ids(id));
            prop_assert_eq!(reloaded.tree().get(id).map(|n| n.tag()), doc.tree().get(id).map(|n| n.tag()));
        }
    }

    #[test]
    fn prop_single_step_inverse(
        setup in prop::collection::vec(op_strategy(), 0..15),
        op in op_strategy(),
    ) {
        let mut doc = Document::new_empty("prop.html");
        for step in &setup {
            let _ = run(&mut doc, step);
        }
        let before = doc.tree().clone();

        if run(&mut doc, &op).is_ok() {
            let after = doc.tree().clone();
            doc.undo().unwrap();
            prop_assert_eq!(doc.tree(), &before);
            doc.redo().unwrap();
            prop_assert_eq!(doc.tree(), &after);
        } else {
            prop_assert_eq!(doc.tree(), &before);
        }
    }
}

#[test]
fn test_new_edit_after_undo_clears_redo() {
    let mut doc = Document::new_empty("a.html");
    doc.append_child("div", "main", "body", None).unwrap();
    doc.undo().unwrap();
    assert!(doc.history().can_redo());

    doc.append_child("p", "other", "body", None).unwrap();
    assert!(matches!(doc.redo(), Err(EditorError::EmptyHistory(_))));
    assert!(!doc.tree().contains("main"));
}

#[test]
fn test_delete_then_undo_within_longer_sequence() {
    let mut doc = Document::new_empty("a.html");
    doc.append_child("ul", "list", "body", None).unwrap();
    for i in 0..5 {
        doc.append_child("li", &format!("item{}", i), "list", Some("entry"))
            .unwrap();
    }
    doc.rename_id("item2", "middle").unwrap();
    doc.set_text("middle", Some("the middle")).unwrap();
    let full = doc.tree().clone();

    doc.delete("list").unwrap();
    assert_eq!(doc.tree().len(), 4);

    doc.undo().unwrap();
    assert_eq!(doc.tree(), &full);
    assert_eq!(
        doc.tree().child_ids("list").unwrap(),
        vec!["item0", "item1", "middle", "item3", "item4"]
    );
}

#[test]
fn test_history_limit_drops_oldest() {
    use htmled_editor::DocumentOptions;

    let options = DocumentOptions {
        history_limit: 3,
        ..DocumentOptions::default()
    };
    let mut doc = Document::new_empty("a.html").with_options(&options);
    for i in 0..5 {
        doc.append_child("p", &format!("p{}", i), "body", None).unwrap();
    }

    for _ in 0..3 {
        doc.undo().unwrap();
    }
    assert!(doc.undo().is_err());
    assert_eq!(doc.tree().child_ids("body").unwrap(), vec!["p0", "p1"]);
}
