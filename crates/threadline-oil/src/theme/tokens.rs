//! Runtime theme token system.
//!
//! Renderers never name colors directly. They ask [`ThemeTokens`] for a
//! semantic style, so swapping the theme restyles every view without touching
//! dispatch code.

use crate::style::{Color, Style};

/// Visual treatment requested by an interactive element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonTone {
    Primary,
    Danger,
    #[default]
    Neutral,
}

/// Runtime color tokens for the terminal theme.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ThemeTokens {
    // ── Text colors ─────────────────────────────────────────────────────
    /// Primary text color
    pub text_primary: Color,
    /// Secondary/muted text (context lines)
    pub text_muted: Color,
    /// Accent text (headings, highlights)
    pub text_accent: Color,

    // ── Semantic colors ─────────────────────────────────────────────────
    pub warning: Color,

    // ── Message origins ─────────────────────────────────────────────────
    pub role_user: Color,

    // ── Buttons ─────────────────────────────────────────────────────────
    /// Prominent accent for primary actions
    pub button_primary: Color,
    /// Warning accent for destructive actions
    pub button_danger: Color,
    /// Neutral button surface
    pub button_neutral: Color,
    /// Hotkey hint next to a button
    pub button_hint: Color,

    // ── Markdown rendering ──────────────────────────────────────────────
    pub code_inline: Color,
    pub code_block: Color,
    pub blockquote_prefix: Color,
    pub blockquote_text: Color,

    // ── Structure ───────────────────────────────────────────────────────
    pub divider: Color,
    pub timeline_year: Color,
    pub timeline_marker: Color,
    pub timeline_connector: Color,
    pub spinner: Color,
}

impl ThemeTokens {
    /// Construct the default dark theme.
    pub const fn default_tokens() -> Self {
        use Color::*;
        Self {
            text_primary: White,
            text_muted: DarkGray,
            text_accent: Cyan,

            warning: Rgb(224, 175, 104),

            role_user: Green,

            button_primary: Rgb(46, 125, 50),
            button_danger: Rgb(183, 28, 28),
            button_neutral: Rgb(40, 44, 52),
            button_hint: DarkGray,

            code_inline: Yellow,
            code_block: Green,
            blockquote_prefix: DarkGray,
            blockquote_text: Gray,

            divider: DarkGray,
            timeline_year: Cyan,
            timeline_marker: Magenta,
            timeline_connector: DarkGray,
            spinner: Cyan,
        }
    }

    /// Get a `&'static` reference to the default theme tokens.
    pub fn default_ref() -> &'static ThemeTokens {
        static DEFAULT: ThemeTokens = ThemeTokens::default_tokens();
        &DEFAULT
    }
}

impl Default for ThemeTokens {
    fn default() -> Self {
        Self::default_tokens()
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Style presets
// ─────────────────────────────────────────────────────────────────────────────

impl ThemeTokens {
    /// Most prominent text on a message (header blocks)
    pub fn heading(&self) -> Style {
        Style::new().fg(self.text_accent).bold()
    }

    pub fn body(&self) -> Style {
        Style::new()
    }

    pub fn muted(&self) -> Style {
        Style::new().fg(self.text_muted)
    }

    pub fn warning_style(&self) -> Style {
        Style::new().fg(self.warning)
    }

    // ── Message origins ─────────────────────────────────────────────────

    pub fn user_prompt(&self) -> Style {
        Style::new().fg(self.role_user).bold()
    }

    pub fn spinner_style(&self) -> Style {
        Style::new().fg(self.spinner)
    }

    // ── Buttons ─────────────────────────────────────────────────────────

    /// Lookup from a button's requested tone to its visual treatment.
    pub fn button(&self, tone: ButtonTone) -> Style {
        match tone {
            ButtonTone::Primary => Style::new().fg(Color::White).bg(self.button_primary).bold(),
            ButtonTone::Danger => Style::new().fg(Color::White).bg(self.button_danger).bold(),
            ButtonTone::Neutral => Style::new().fg(self.text_primary).bg(self.button_neutral),
        }
    }

    pub fn button_hint_style(&self) -> Style {
        Style::new().fg(self.button_hint)
    }

    // ── Markdown rendering ──────────────────────────────────────────────

    pub fn inline_code(&self) -> Style {
        Style::new().fg(self.code_inline)
    }

    pub fn code_block_style(&self) -> Style {
        Style::new().fg(self.code_block)
    }

    pub fn blockquote_prefix_style(&self) -> Style {
        Style::new().fg(self.blockquote_prefix)
    }

    pub fn blockquote_text_style(&self) -> Style {
        Style::new().fg(self.blockquote_text).italic()
    }

    // ── Structure ───────────────────────────────────────────────────────

    pub fn divider_style(&self) -> Style {
        Style::new().fg(self.divider)
    }

    pub fn timeline_year_style(&self) -> Style {
        Style::new().fg(self.timeline_year).bold()
    }

    pub fn timeline_marker_style(&self) -> Style {
        Style::new().fg(self.timeline_marker)
    }

    pub fn timeline_connector_style(&self) -> Style {
        Style::new().fg(self.timeline_connector)
    }
}
