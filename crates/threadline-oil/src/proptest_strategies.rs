//! Proptest strategies for renderer property tests

use crate::node::*;
use crate::style::*;
use proptest::prelude::*;

/// Terminal width: 0 (no wrapping), narrow (1-20), normal (21-120)
pub fn arb_width() -> impl Strategy<Value = usize> {
    prop_oneof![
        1 => Just(0usize),
        2 => 1usize..=20,
        7 => 21usize..=120,
    ]
}

/// ASCII words with single spaces.
pub fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec("[a-zA-Z0-9]{0,12}", 0..20).prop_map(|words| words.join(" "))
}

pub fn arb_style() -> impl Strategy<Value = Style> {
    (any::<bool>(), any::<bool>(), any::<bool>(), any::<bool>()).prop_map(
        |(bold, dim, italic, underline)| {
            let mut s = Style::new();
            if bold {
                s = s.bold();
            }
            if dim {
                s = s.dim();
            }
            if italic {
                s = s.italic();
            }
            if underline {
                s = s.underline();
            }
            s
        },
    )
}

pub fn arb_leaf() -> impl Strategy<Value = Node> {
    prop_oneof![
        1 => Just(Node::Empty),
        5 => (arb_text(), arb_style()).prop_map(|(t, s)| styled(t, s)),
        1 => (prop::option::of(arb_text()), 0usize..8).prop_map(|(lbl, frame)| spinner(lbl, frame)),
    ]
}

/// A row of styled single-line runs, the shape emphasized text takes.
pub fn arb_inline_row() -> impl Strategy<Value = Node> {
    (
        prop::collection::vec((arb_text(), arb_style()), 1..6),
        0u16..3,
    )
        .prop_map(|(runs, gap)| {
            row(runs.into_iter().map(|(t, s)| styled(t, s))).gap(Gap::column(gap))
        })
}

/// Trees up to a few levels deep mixing rows, columns and fragments.
pub fn arb_node() -> impl Strategy<Value = Node> {
    arb_leaf().prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4).prop_map(col),
            prop::collection::vec(inner.clone(), 0..4).prop_map(row),
            prop::collection::vec(inner, 0..4).prop_map(fragment),
        ]
    })
}
