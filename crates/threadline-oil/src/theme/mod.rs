//! Semantic color tokens and style presets.
//!
//! All colors and styles are accessed via [`ThemeTokens`]. Use
//! `ThemeTokens::default_ref()` for a static reference to the default dark
//! theme.
//!
//! ```rust
//! use threadline_oil::{styled, ButtonTone, ThemeTokens};
//!
//! let theme = ThemeTokens::default_ref();
//! let _heading = styled("Trending", theme.heading());
//! let _button = styled("[Save]", theme.button(ButtonTone::Primary));
//! ```

pub mod tokens;
pub use tokens::{ButtonTone, ThemeTokens};
