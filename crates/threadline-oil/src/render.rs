use crate::node::{BoxNode, Direction, Node, Size, SpinnerNode, TextNode};
use crate::style::{Padding, Style};
use crate::utils::{pad_to_width, visible_width};
use crossterm::style::StyledContent;
use textwrap::{wrap, Options, WordSplitter};

/// How a tree is turned into text. A width of zero disables wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    pub width: usize,
    pub color: bool,
}

impl RenderOptions {
    pub fn new(width: usize) -> Self {
        Self { width, color: true }
    }

    pub fn plain(width: usize) -> Self {
        Self {
            width,
            color: false,
        }
    }
}

/// Render with ANSI styling.
pub fn render_to_string(node: &Node, width: usize) -> String {
    render_with(node, RenderOptions::new(width))
}

/// Render without any escape sequences.
pub fn render_plain(node: &Node, width: usize) -> String {
    render_with(node, RenderOptions::plain(width))
}

pub fn render_with(node: &Node, options: RenderOptions) -> String {
    let lines = render_lines(node, options.width, options.color);
    tracing::trace!(width = options.width, lines = lines.len(), "rendered node tree");
    lines.join("\n")
}

fn render_lines(node: &Node, width: usize, color: bool) -> Vec<String> {
    match node {
        Node::Empty => Vec::new(),
        Node::Text(text) => render_text(text, width, color),
        Node::Box(boxnode) => render_box(boxnode, width, color),
        Node::Spinner(spinner) => vec![render_spinner(spinner, color)],
        Node::Fragment(children) => {
            let mut lines = Vec::new();
            for child in children {
                join_inline(&mut lines, render_lines(child, width, color), 0);
            }
            lines
        }
    }
}

fn render_text(text: &TextNode, width: usize, color: bool) -> Vec<String> {
    let mut lines = Vec::new();

    for raw_line in text.content.split('\n') {
        if width == 0 || visible_width(raw_line) <= width {
            lines.push(apply_style(raw_line, &text.style, color));
            continue;
        }

        let options = Options::new(width).word_splitter(WordSplitter::NoHyphenation);
        for wrapped in wrap(raw_line, options) {
            lines.push(apply_style(&wrapped, &text.style, color));
        }
    }

    lines
}

fn render_box(boxnode: &BoxNode, width: usize, color: bool) -> Vec<String> {
    let width = match boxnode.size {
        Size::Fixed(w) => w as usize,
        Size::Content => width,
    };
    let inner_width = if width == 0 {
        0
    } else {
        width
            .saturating_sub(boxnode.padding.horizontal() as usize)
            .max(1)
    };

    let mut body: Vec<String> = Vec::new();

    match boxnode.direction {
        Direction::Column => {
            let mut first = true;
            for child in &boxnode.children {
                let child_lines = render_lines(child, inner_width, color);
                if child_lines.is_empty() {
                    continue;
                }
                if !first {
                    body.extend((0..boxnode.gap.row).map(|_| String::new()));
                }
                first = false;
                body.extend(child_lines);
            }
        }
        Direction::Row if boxnode.children.iter().any(is_fixed) => {
            body = render_columns(&boxnode.children, inner_width, boxnode.gap.column as usize, color);
        }
        Direction::Row => {
            let gap = boxnode.gap.column as usize;
            let mut runs = Vec::new();
            if collect_runs(&boxnode.children, gap, &mut runs) {
                body = render_runs(&runs, inner_width, color);
            } else {
                for child in &boxnode.children {
                    let child_lines = render_lines(child, inner_width, color);
                    join_inline(&mut body, child_lines, gap);
                }
            }
        }
    }

    if body.is_empty() {
        return body;
    }

    let indent = " ".repeat(boxnode.padding.left as usize);
    let mut lines = Vec::with_capacity(body.len() + 2);
    lines.extend((0..boxnode.padding.top).map(|_| String::new()));
    lines.extend(body.into_iter().map(|line| {
        if line.is_empty() {
            line
        } else {
            format!("{indent}{line}")
        }
    }));
    lines.extend((0..boxnode.padding.bottom).map(|_| String::new()));

    if let Size::Fixed(w) = boxnode.size {
        return lines
            .into_iter()
            .map(|line| pad_to_width(&line, w as usize))
            .collect();
    }
    lines
}

fn is_fixed(node: &Node) -> bool {
    matches!(node, Node::Box(b) if matches!(b.size, Size::Fixed(_)))
}

/// A row made only of single-line text (possibly nested in plain rows and
/// fragments) reads as one line and wraps as a unit.
fn collect_runs(children: &[Node], gap: usize, runs: &mut Vec<(String, Style)>) -> bool {
    let mut first = true;
    for child in children {
        let mut piece = Vec::new();
        match child {
            Node::Empty => continue,
            Node::Text(t) if !t.content.contains('\n') => piece.push((t.content.clone(), t.style)),
            Node::Box(b)
                if b.direction == Direction::Row
                    && b.size == Size::Content
                    && b.padding == Padding::default() =>
            {
                if !collect_runs(&b.children, b.gap.column as usize, &mut piece) {
                    return false;
                }
            }
            Node::Fragment(inner) => {
                if !collect_runs(inner, 0, &mut piece) {
                    return false;
                }
            }
            _ => return false,
        }
        if piece.is_empty() {
            continue;
        }
        if !first && gap > 0 {
            runs.push((" ".repeat(gap), Style::default()));
        }
        first = false;
        runs.extend(piece);
    }
    true
}

/// Wrap the joined text of `runs`, then style each wrapped line by the runs
/// it overlaps.
fn render_runs(runs: &[(String, Style)], width: usize, color: bool) -> Vec<String> {
    if runs.is_empty() {
        return Vec::new();
    }
    let content: String = runs.iter().map(|(t, _)| t.as_str()).collect();
    if width == 0 || visible_width(&content) <= width {
        return vec![paint_range(&content, 0, runs, color)];
    }

    let options = Options::new(width).word_splitter(WordSplitter::NoHyphenation);
    let mut cursor = 0;
    wrap(&content, options)
        .iter()
        .map(|line| match content[cursor..].find(line.as_ref()) {
            Some(found) => {
                let start = cursor + found;
                cursor = start + line.len();
                paint_range(line, start, runs, color)
            }
            None => line.to_string(),
        })
        .collect()
}

/// Style `segment`, which begins at byte `start` of the joined runs.
fn paint_range(segment: &str, start: usize, runs: &[(String, Style)], color: bool) -> String {
    if !color {
        return segment.to_string();
    }
    let end = start + segment.len();
    let mut out = String::new();
    let mut offset = 0;
    for (text, style) in runs {
        let lo = offset.max(start);
        let hi = (offset + text.len()).min(end);
        offset += text.len();
        if lo < hi {
            out.push_str(&apply_style(&segment[lo - start..hi - start], style, color));
        }
    }
    out
}

/// Lay children out side by side. Fixed children keep their width on every
/// line so the columns stay aligned when heights differ.
fn render_columns(children: &[Node], width: usize, gap: usize, color: bool) -> Vec<String> {
    let fixed_of = |child: &Node| match child {
        Node::Box(b) => match b.size {
            Size::Fixed(w) => Some(w as usize),
            Size::Content => None,
        },
        _ => None,
    };
    let taken: usize = children.iter().filter_map(fixed_of).sum::<usize>()
        + gap * children.len().saturating_sub(1);
    let rest = if width == 0 {
        0
    } else {
        width.saturating_sub(taken).max(1)
    };

    let rendered: Vec<(Vec<String>, Option<usize>)> = children
        .iter()
        .map(|child| {
            let fixed = fixed_of(child);
            (render_lines(child, rest, color), fixed)
        })
        .filter(|(lines, _)| !lines.is_empty())
        .collect();

    let height = rendered.iter().map(|(lines, _)| lines.len()).max().unwrap_or(0);
    let separator = " ".repeat(gap);

    (0..height)
        .map(|i| {
            let cells: Vec<String> = rendered
                .iter()
                .map(|(lines, fixed)| match (lines.get(i), fixed) {
                    (Some(line), _) => line.clone(),
                    (None, Some(w)) => " ".repeat(*w),
                    (None, None) => String::new(),
                })
                .collect();
            cells.join(&separator).trim_end().to_string()
        })
        .collect()
}

/// Continue the last line of `acc` with the first line of `next`.
fn join_inline(acc: &mut Vec<String>, next: Vec<String>, gap: usize) {
    let mut next = next.into_iter();
    let Some(first) = next.next() else {
        return;
    };

    match acc.last_mut() {
        Some(last) => {
            last.push_str(&" ".repeat(gap));
            last.push_str(&first);
        }
        None => acc.push(first),
    }
    acc.extend(next);
}

fn render_spinner(spinner: &SpinnerNode, color: bool) -> String {
    let mut out = apply_style(&spinner.current_char().to_string(), &spinner.style, color);
    if let Some(label) = &spinner.label {
        out.push(' ');
        out.push_str(&apply_style(label, &spinner.style, color));
    }
    out
}

fn apply_style(content: &str, style: &Style, color: bool) -> String {
    if !color || style.is_plain() || content.is_empty() {
        return content.to_string();
    }

    format!("{}", StyledContent::new(style.to_crossterm(), content))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::*;
    use crate::style::{Color, Gap, Padding, Style};
    use crate::utils::strip_ansi;

    #[test]
    fn text_renders_content() {
        assert_eq!(render_plain(&text("Hello world"), 80), "Hello world");
    }

    #[test]
    fn empty_node_renders_nothing() {
        assert_eq!(render_plain(&Node::Empty, 80), "");
    }

    #[test]
    fn empty_text_is_a_blank_line() {
        let node = col([text("a"), text(""), text("b")]);
        assert_eq!(render_plain(&node, 80), "a\n\nb");
    }

    #[test]
    fn column_renders_children_with_newlines() {
        let node = col([text("Line 1"), text("Line 2")]);
        assert_eq!(render_plain(&node, 80), "Line 1\nLine 2");
    }

    #[test]
    fn row_renders_children_inline() {
        let node = row([text("A"), text("B"), text("C")]);
        assert_eq!(render_plain(&node, 80), "ABC");
    }

    #[test]
    fn row_gap_inserts_spaces() {
        let node = row([text("A"), text("B")]).gap(Gap::column(2));
        assert_eq!(render_plain(&node, 80), "A  B");
    }

    #[test]
    fn column_gap_inserts_blank_lines_between_children_only() {
        let node = col([text("A"), Node::Empty, text("B")]).gap(Gap::row(1));
        assert_eq!(render_plain(&node, 80), "A\n\nB");
    }

    #[test]
    fn padding_indents_lines() {
        let node = col([text("x"), text("y")]).with_padding(Padding::left(2));
        assert_eq!(render_plain(&node, 80), "  x\n  y");
    }

    #[test]
    fn text_wraps_at_width() {
        let node = text("Hello world this is a long line that should wrap");
        let output = render_plain(&node, 20);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines.len() > 1, "Should wrap to multiple lines");
        for line in &lines {
            assert!(line.chars().count() <= 20, "Line '{}' exceeds width 20", line);
        }
    }

    #[test]
    fn zero_width_disables_wrapping() {
        let long = "word ".repeat(40);
        let output = render_plain(&text(long.trim_end()), 0);
        assert_eq!(output.lines().count(), 1);
    }

    #[test]
    fn styled_text_emits_escapes_only_when_colored() {
        let node = styled("warn", Style::new().fg(Color::Yellow));
        let colored = render_to_string(&node, 80);
        assert!(colored.contains('\x1b'));
        assert_eq!(strip_ansi(&colored), "warn");
        assert_eq!(render_plain(&node, 80), "warn");
    }

    #[test]
    fn spinner_renders_frame_and_label() {
        let node = spinner(Some("Analyzing".to_string()), 0);
        assert_eq!(render_plain(&node, 80), "◐ Analyzing");
    }

    #[test]
    fn fixed_children_render_as_columns() {
        let node = row([
            fixed_width(6, col([text("a"), text("b")])),
            fixed_width(6, text("c")),
        ])
        .gap(Gap::column(1));
        assert_eq!(render_plain(&node, 80), "a      c\nb");
    }

    #[test]
    fn fixed_width_wraps_inside_its_column() {
        let node = row([fixed_width(5, text("one two")), fixed_width(5, text("x"))]);
        assert_eq!(render_plain(&node, 80), "one  x\ntwo");
    }

    #[test]
    fn styled_runs_wrap_as_one_line() {
        let node = row([
            styled("A fairly long bold title", Style::new().bold()),
            text(" (2001) and then more words"),
        ]);
        let output = render_plain(&node, 20);

        let lines: Vec<&str> = output.lines().collect();
        assert!(lines.len() > 1);
        for line in &lines {
            assert!(visible_width(line) <= 20, "{line:?} exceeds 20");
        }
        assert_eq!(
            lines.join(" "),
            "A fairly long bold title (2001) and then more words"
        );
    }

    #[test]
    fn wrapped_runs_keep_their_styles() {
        let node = row([
            styled("bold words", Style::new().bold()),
            text(" plain tail"),
        ]);
        let colored = render_to_string(&node, 12);
        let lines: Vec<&str> = colored.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains('\x1b'));
        assert_eq!(lines[1], "plain tail");
        assert_eq!(strip_ansi(&colored), "bold words\nplain tail");
    }

    #[test]
    fn nested_inline_rows_keep_gaps() {
        let node = row([row([text("a"), text("b")]), text("c")]).gap(Gap::column(2));
        assert_eq!(render_plain(&node, 80), "ab  c");
    }

    #[test]
    fn content_column_gets_remaining_width() {
        let node = row([fixed_width(4, text("ab")), text("one two three")]);
        for line in render_plain(&node, 12).lines() {
            assert!(visible_width(line) <= 12, "{line:?} exceeds 12");
        }
    }

    #[test]
    fn fragment_renders_all_children_inline() {
        let node = fragment([text("A"), text("B"), text("C")]);
        assert_eq!(render_plain(&node, 80), "ABC");
    }
}
