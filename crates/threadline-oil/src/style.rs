use crossterm::style::{Attribute, Color as CtColor, ContentStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Color {
    #[default]
    Reset,
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    Gray,
    DarkGray,
    White,
    Rgb(u8, u8, u8),
}

impl Color {
    pub fn to_crossterm(self) -> CtColor {
        match self {
            Color::Reset => CtColor::Reset,
            Color::Black => CtColor::Black,
            Color::Red => CtColor::Red,
            Color::Green => CtColor::Green,
            Color::Yellow => CtColor::Yellow,
            Color::Blue => CtColor::Blue,
            Color::Magenta => CtColor::Magenta,
            Color::Cyan => CtColor::Cyan,
            Color::Gray => CtColor::Grey,
            Color::DarkGray => CtColor::DarkGrey,
            Color::White => CtColor::White,
            Color::Rgb(r, g, b) => CtColor::Rgb { r, g, b },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Style {
    pub fg: Option<Color>,
    pub bg: Option<Color>,
    pub bold: bool,
    pub dim: bool,
    pub italic: bool,
    pub underline: bool,
}

impl Style {
    pub const fn new() -> Self {
        Self {
            fg: None,
            bg: None,
            bold: false,
            dim: false,
            italic: false,
            underline: false,
        }
    }

    pub const fn fg(mut self, color: Color) -> Self {
        self.fg = Some(color);
        self
    }

    pub const fn bg(mut self, color: Color) -> Self {
        self.bg = Some(color);
        self
    }

    pub const fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub const fn dim(mut self) -> Self {
        self.dim = true;
        self
    }

    pub const fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    pub const fn underline(mut self) -> Self {
        self.underline = true;
        self
    }

    /// Layer `other` on top of `self`: colors from `other` win when set,
    /// attributes accumulate.
    pub fn patch(self, other: Style) -> Self {
        Self {
            fg: other.fg.or(self.fg),
            bg: other.bg.or(self.bg),
            bold: self.bold || other.bold,
            dim: self.dim || other.dim,
            italic: self.italic || other.italic,
            underline: self.underline || other.underline,
        }
    }

    pub fn is_plain(&self) -> bool {
        *self == Style::default()
    }

    pub fn to_crossterm(&self) -> ContentStyle {
        let mut style = ContentStyle::new();
        style.foreground_color = self.fg.map(Color::to_crossterm);
        style.background_color = self.bg.map(Color::to_crossterm);
        if self.bold {
            style.attributes.set(Attribute::Bold);
        }
        if self.dim {
            style.attributes.set(Attribute::Dim);
        }
        if self.italic {
            style.attributes.set(Attribute::Italic);
        }
        if self.underline {
            style.attributes.set(Attribute::Underlined);
        }
        style
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Padding {
    pub top: u16,
    pub right: u16,
    pub bottom: u16,
    pub left: u16,
}

impl Padding {
    pub const fn all(n: u16) -> Self {
        Self {
            top: n,
            right: n,
            bottom: n,
            left: n,
        }
    }

    pub const fn xy(x: u16, y: u16) -> Self {
        Self {
            top: y,
            right: x,
            bottom: y,
            left: x,
        }
    }

    pub const fn left(n: u16) -> Self {
        Self {
            top: 0,
            right: 0,
            bottom: 0,
            left: n,
        }
    }

    pub fn horizontal(&self) -> u16 {
        self.left + self.right
    }
}

/// Spacing between children: `row` is blank lines between column children,
/// `column` is spaces between row children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Gap {
    pub row: u16,
    pub column: u16,
}

impl Gap {
    pub const fn row(n: u16) -> Self {
        Self { row: n, column: 0 }
    }

    pub const fn column(n: u16) -> Self {
        Self { row: 0, column: n }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn patch_keeps_base_colors_and_merges_attributes() {
        let base = Style::new().fg(Color::DarkGray).italic();
        let merged = base.patch(Style::new().bold());

        assert_eq!(merged.fg, Some(Color::DarkGray));
        assert!(merged.bold);
        assert!(merged.italic);
    }

    #[test]
    fn patch_overrides_colors() {
        let merged = Style::new()
            .fg(Color::White)
            .patch(Style::new().fg(Color::Yellow));
        assert_eq!(merged.fg, Some(Color::Yellow));
    }

    #[test]
    fn default_style_is_plain() {
        assert!(Style::new().is_plain());
        assert!(!Style::new().dim().is_plain());
    }

    #[test]
    fn crossterm_conversion_sets_attributes() {
        let ct = Style::new().bold().underline().to_crossterm();
        assert!(ct.attributes.has(Attribute::Bold));
        assert!(ct.attributes.has(Attribute::Underlined));
        assert!(!ct.attributes.has(Attribute::Italic));
    }
}
