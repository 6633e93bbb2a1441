//! Width and escape-sequence helpers shared by renderers.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Remove CSI (`ESC [ ... final`) and OSC (`ESC ] ... BEL|ST`) sequences.
pub fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();

    while let Some(c) = chars.next() {
        if c != '\x1b' {
            out.push(c);
            continue;
        }

        match chars.peek() {
            Some('[') => {
                chars.next();
                for c in chars.by_ref() {
                    if ('@'..='~').contains(&c) {
                        break;
                    }
                }
            }
            Some(']') => {
                chars.next();
                while let Some(c) = chars.next() {
                    if c == '\x07' {
                        break;
                    }
                    if c == '\x1b' && chars.peek() == Some(&'\\') {
                        chars.next();
                        break;
                    }
                }
            }
            Some(_) => {
                chars.next();
            }
            None => {}
        }
    }

    out
}

/// Display width in terminal cells, ignoring escape sequences.
pub fn visible_width(s: &str) -> usize {
    if s.contains('\x1b') {
        UnicodeWidthStr::width(strip_ansi(s).as_str())
    } else {
        UnicodeWidthStr::width(s)
    }
}

/// Cut `s` so it occupies at most `max` cells, marking the cut with `…`.
pub fn truncate_to_width(s: &str, max: usize) -> String {
    if UnicodeWidthStr::width(s) <= max {
        return s.to_string();
    }
    if max == 0 {
        return String::new();
    }

    let budget = max - 1;
    let mut used = 0;
    let mut out = String::new();
    for c in s.chars() {
        let w = UnicodeWidthChar::width(c).unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}

/// Right-pad with spaces up to `width` cells. Never truncates.
pub fn pad_to_width(s: &str, width: usize) -> String {
    let current = visible_width(s);
    if current >= width {
        s.to_string()
    } else {
        format!("{s}{}", " ".repeat(width - current))
    }
}
