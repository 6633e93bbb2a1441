//! Oil-style declarative view layer for terminal output
//!
//! Views are built as a tree of [`Node`]s and turned into text by the
//! renderer. Nothing in this crate knows about blocks, chats or feeds; it only
//! provides the primitives those layers compose.
//!
//! ```text
//! State -> view() -> Node tree -> render_to_string() -> Terminal
//! ```
//!
//! ## Example
//!
//! ```rust
//! use threadline_oil::*;
//!
//! let theme = ThemeTokens::default_ref();
//! let tree = col([
//!     styled("Trending", theme.heading()),
//!     text("Three new threads"),
//! ]);
//! let out = render_plain(&tree, 40);
//! assert_eq!(out, "Trending\nThree new threads");
//! ```

mod component;
mod node;
mod render;
mod style;
pub mod theme;
pub mod utils;

#[cfg(feature = "test-utils")]
pub mod proptest_strategies;

pub use component::{Component, ViewContext};
pub use node::*;
pub use render::*;
pub use style::*;
pub use theme::{ButtonTone, ThemeTokens};
