//! Property tests for block document decoding

use proptest::prelude::*;
use serde_json::{json, Value};
use threadline_core::{Block, BlockSequence, ButtonElement, DEFAULT_ACTION_ID};

fn known_block() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-zA-Z ]{1,20}".prop_map(|t| json!({"type": "header", "text": {"type": "plain_text", "text": t}})),
        "[a-zA-Z *_]{0,30}".prop_map(|t| json!({"type": "section", "text": {"type": "mrkdwn", "text": t}})),
        "[a-zA-Z ]{0,20}".prop_map(|t| json!({"type": "context", "elements": [t]})),
        Just(json!({"type": "divider"})),
        (1900i32..2030, "[a-z]{1,10}").prop_map(|(y, t)| json!({"type": "timeline", "events": [{"year": y, "title": t}]})),
    ]
}

fn malformed_block() -> impl Strategy<Value = Value> {
    prop_oneof![
        "[a-z]{3,10}".prop_filter("must not be a known tag", |t| {
            !["header", "section", "context", "actions", "divider", "timeline"].contains(&t.as_str())
        })
        .prop_map(|t| json!({"type": t})),
        Just(json!({"type": "header"})),
        Just(json!({"type": "actions", "elements": "nope"})),
        Just(json!({"text": "no tag"})),
        any::<i64>().prop_map(|n| json!(n)),
        Just(Value::Null),
    ]
}

fn mixed_document() -> impl Strategy<Value = Vec<(bool, Value)>> {
    prop::collection::vec(
        prop_oneof![
            known_block().prop_map(|v| (true, v)),
            malformed_block().prop_map(|v| (false, v)),
        ],
        0..20,
    )
}

proptest! {
    #[test]
    fn malformed_blocks_are_isolated(items in mixed_document()) {
        let doc = Value::Array(items.iter().map(|(_, v)| v.clone()).collect());
        let seq = BlockSequence::from_document(doc).unwrap();

        prop_assert_eq!(seq.len(), items.len());
        for ((known, _), block) in items.iter().zip(seq.iter()) {
            prop_assert_eq!(*known, !block.is_unknown());
        }
    }

    #[test]
    fn reencoding_is_stable(items in mixed_document()) {
        let doc = Value::Array(items.into_iter().map(|(_, v)| v).collect());
        let first = BlockSequence::from_document(doc).unwrap();
        let encoded = serde_json::to_value(&first).unwrap();
        let second = BlockSequence::from_document(encoded.clone()).unwrap();

        prop_assert_eq!(&first, &second);
        prop_assert_eq!(serde_json::to_value(&second).unwrap(), encoded);
    }

    #[test]
    fn button_normalization_is_idempotent(id in proptest::option::of("[a-z_]{0,12}")) {
        let mut button = ButtonElement::new("Go");
        button.action_id = id.clone().unwrap_or_default();

        let once = button.normalized();
        let twice = once.clone().normalized();
        prop_assert_eq!(&once, &twice);

        match id.filter(|s| !s.is_empty()) {
            Some(explicit) => prop_assert_eq!(once.action_id, explicit),
            None => prop_assert_eq!(once.action_id, DEFAULT_ACTION_ID),
        }
    }
}

#[test]
fn actions_buttons_default_once_on_ingest() {
    let seq = BlockSequence::from_document(json!([
        {"type": "actions", "elements": [
            {"type": "button", "text": {"type": "plain_text", "text": "A"}},
            {"type": "button", "text": {"type": "plain_text", "text": "B"}, "action_id": "b", "value": "v"}
        ]}
    ]))
    .unwrap();

    match &seq[0] {
        Block::Actions(a) => {
            assert_eq!(a.elements[0].action_id, DEFAULT_ACTION_ID);
            assert_eq!(a.elements[0].value, "");
            assert_eq!(a.elements[1].action_id, "b");
            assert_eq!(a.elements[1].value, "v");
        }
        other => panic!("expected actions, got {other:?}"),
    }
}
