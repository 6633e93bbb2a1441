//! Inline emphasis for `mrkdwn` text
//!
//! Grammar, applied per line:
//!
//! - `*x*` bold, `_x_` italic, `` `x` `` inline code
//! - spans are non-empty, never cross a line break, and may nest; code
//!   content is literal and takes precedence over the other delimiters
//! - a line starting with `> ` is a blockquote for the rest of the line
//! - lines between two ```` ``` ```` fence lines form a code block and are
//!   shown verbatim
//! - a delimiter without a partner stays a literal character
//!
//! There is no escape syntax. Parsing reads the stored text and never
//! modifies it.

use threadline_oil::{col, row, styled, Node, Padding, Style, ThemeTokens};

const FENCE: &str = "```";
const QUOTE_PREFIX: &str = "> ";
const QUOTE_BAR: &str = "│ ";

/// One parsed inline run
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inline {
    Text(String),
    Bold(Vec<Inline>),
    Italic(Vec<Inline>),
    Code(String),
}

/// One parsed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Line {
    Plain(Vec<Inline>),
    Quote(Vec<Inline>),
    Code(String),
}

/// Parse a whole text blob into lines.
pub fn parse(text: &str) -> Vec<Line> {
    let raw: Vec<&str> = text.split('\n').collect();
    let mut lines = Vec::with_capacity(raw.len());
    let mut i = 0;

    while i < raw.len() {
        let line = raw[i];
        if is_fence(line) {
            if let Some(close) = raw[i + 1..].iter().position(|l| is_fence(l)) {
                let end = i + 1 + close;
                lines.extend(raw[i + 1..end].iter().map(|l| Line::Code(l.to_string())));
                i = end + 1;
                continue;
            }
        }

        lines.push(match line.strip_prefix(QUOTE_PREFIX) {
            Some(rest) => Line::Quote(parse_inline(rest)),
            None => Line::Plain(parse_inline(line)),
        });
        i += 1;
    }

    lines
}

fn is_fence(line: &str) -> bool {
    line.trim_start().starts_with(FENCE)
}

/// Parse one line of inline emphasis.
pub fn parse_inline(line: &str) -> Vec<Inline> {
    let chars: Vec<char> = line.chars().collect();
    let mut out = Vec::new();
    parse_range(&chars, &mut out);
    out
}

fn parse_range(chars: &[char], out: &mut Vec<Inline>) {
    let mut literal = String::new();
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let span = match c {
            '`' => find_code_close(chars, i).map(|close| {
                let code: String = chars[i + 1..close].iter().collect();
                (Inline::Code(code), close)
            }),
            '*' | '_' => find_emphasis_close(chars, i, c).map(|close| {
                let mut inner = Vec::new();
                parse_range(&chars[i + 1..close], &mut inner);
                let span = if c == '*' {
                    Inline::Bold(inner)
                } else {
                    Inline::Italic(inner)
                };
                (span, close)
            }),
            _ => None,
        };

        match span {
            Some((span, close)) => {
                if !literal.is_empty() {
                    out.push(Inline::Text(std::mem::take(&mut literal)));
                }
                out.push(span);
                i = close + 1;
            }
            None => {
                literal.push(c);
                i += 1;
            }
        }
    }

    if !literal.is_empty() {
        out.push(Inline::Text(literal));
    }
}

fn find_code_close(chars: &[char], open: usize) -> Option<usize> {
    let close = open + 1 + chars[open + 1..].iter().position(|&c| c == '`')?;
    (close > open + 1).then_some(close)
}

/// Nearest partner for an emphasis delimiter, skipping over code spans.
fn find_emphasis_close(chars: &[char], open: usize, delim: char) -> Option<usize> {
    let mut j = open + 1;
    while j < chars.len() {
        match chars[j] {
            '`' => match find_code_close(chars, j) {
                Some(close) => j = close + 1,
                None => j += 1,
            },
            c if c == delim => {
                return (j > open + 1).then_some(j);
            }
            _ => j += 1,
        }
    }
    None
}

/// Text with every delimiter that formed a span removed.
pub fn visible_text(lines: &[Line]) -> String {
    lines
        .iter()
        .map(|line| match line {
            Line::Plain(inlines) => flatten_text(inlines),
            Line::Quote(inlines) => format!("{QUOTE_BAR}{}", flatten_text(inlines)),
            Line::Code(code) => code.clone(),
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn flatten_text(inlines: &[Inline]) -> String {
    let mut out = String::new();
    for inline in inlines {
        match inline {
            Inline::Text(t) | Inline::Code(t) => out.push_str(t),
            Inline::Bold(inner) | Inline::Italic(inner) => out.push_str(&flatten_text(inner)),
        }
    }
    out
}

fn styled_runs(inlines: &[Inline], base: Style, theme: &ThemeTokens, out: &mut Vec<Node>) {
    for inline in inlines {
        match inline {
            Inline::Text(t) => out.push(styled(t.clone(), base)),
            Inline::Code(code) => out.push(styled(code.clone(), base.patch(theme.inline_code()))),
            Inline::Bold(inner) => styled_runs(inner, base.bold(), theme, out),
            Inline::Italic(inner) => styled_runs(inner, base.italic(), theme, out),
        }
    }
}

fn line_node(inlines: &[Inline], base: Style, theme: &ThemeTokens) -> Node {
    let mut runs = Vec::new();
    styled_runs(inlines, base, theme, &mut runs);
    match runs.len() {
        0 => styled("", base),
        1 => runs.remove(0),
        _ => row(runs),
    }
}

/// Render `mrkdwn` text on top of `base`.
pub fn render(text: &str, base: Style, theme: &ThemeTokens) -> Node {
    let mut children = Vec::new();
    let mut code_block: Vec<Node> = Vec::new();

    for line in parse(text) {
        if let Line::Code(code) = &line {
            code_block.push(styled(code.clone(), theme.code_block_style()));
            continue;
        }
        if !code_block.is_empty() {
            children.push(col(std::mem::take(&mut code_block)).with_padding(Padding::left(2)));
        }
        match line {
            Line::Plain(inlines) => children.push(line_node(&inlines, base, theme)),
            Line::Quote(inlines) => children.push(row([
                styled(QUOTE_BAR, theme.blockquote_prefix_style()),
                line_node(&inlines, base.patch(theme.blockquote_text_style()), theme),
            ])),
            Line::Code(_) => {}
        }
    }
    if !code_block.is_empty() {
        children.push(col(code_block).with_padding(Padding::left(2)));
    }

    if children.len() == 1 {
        children.remove(0)
    } else {
        col(children)
    }
}
