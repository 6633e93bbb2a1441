//! # threadline core
//!
//! Data model for structured story-thread messages.
//!
//! - [`block`]: the closed set of Block Kit block kinds plus a lossless
//!   `Unknown` fallback for anything the wire format carries that we do not
//!   recognize
//! - [`element`] and [`text`]: the leaf values embedded in blocks
//! - [`thread`]: archive threads, article references and trends
//! - [`formatter`]: turns threads and trends into block sequences
//! - [`message`]: chat and feed messages that carry block sequences
//!
//! ## Quick Start
//!
//! ```rust
//! use threadline_core::BlockSequence;
//!
//! let json = r#"[
//!     {"type": "header", "text": {"type": "plain_text", "text": "Trending: X"}},
//!     {"type": "carousel"},
//!     {"type": "divider"}
//! ]"#;
//! let blocks = BlockSequence::from_json(json).unwrap();
//! assert_eq!(blocks.len(), 3);
//! assert_eq!(blocks.unknown_count(), 1);
//! ```

#![warn(missing_docs)]

pub mod block;
pub mod element;
pub mod error;
pub mod formatter;
pub mod message;
pub mod text;
pub mod thread;

pub use block::*;
pub use element::*;
pub use error::{BlockError, BlockResult};
pub use formatter::BlockFormatter;
pub use message::{Message, MessageOrigin};
pub use text::{TextKind, TextObject};
pub use thread::*;
