use crate::style::{Gap, Padding, Style};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum Node {
    #[default]
    Empty,
    Text(TextNode),
    Box(BoxNode),
    Spinner(SpinnerNode),
    Fragment(Vec<Node>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TextNode {
    pub content: String,
    pub style: Style,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct BoxNode {
    pub children: Vec<Node>,
    pub direction: Direction,
    pub size: Size,
    pub padding: Padding,
    pub style: Style,
    pub gap: Gap,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SpinnerNode {
    pub label: Option<String>,
    pub style: Style,
    pub frame: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Column,
    Row,
}

/// Horizontal extent of a box. A fixed box always occupies exactly its width,
/// which lets rows lay children out as side-by-side columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Size {
    Fixed(u16),
    #[default]
    Content,
}

pub const SPINNER_FRAMES: &[char] = &['◐', '◓', '◑', '◒'];

pub fn text(content: impl Into<String>) -> Node {
    Node::Text(TextNode {
        content: content.into(),
        style: Style::default(),
    })
}

pub fn styled(content: impl Into<String>, style: Style) -> Node {
    Node::Text(TextNode {
        content: content.into(),
        style,
    })
}

pub fn col(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Box(BoxNode {
        children: children.into_iter().collect(),
        direction: Direction::Column,
        ..Default::default()
    })
}

pub fn row(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Box(BoxNode {
        children: children.into_iter().collect(),
        direction: Direction::Row,
        ..Default::default()
    })
}

pub fn fixed_width(width: u16, child: Node) -> Node {
    Node::Box(BoxNode {
        children: vec![child],
        size: Size::Fixed(width),
        ..Default::default()
    })
}

pub fn fragment(children: impl IntoIterator<Item = Node>) -> Node {
    Node::Fragment(children.into_iter().collect())
}

pub fn spinner(label: Option<String>, frame: usize) -> Node {
    Node::Spinner(SpinnerNode {
        label,
        style: Style::default(),
        frame,
    })
}

impl Node {
    pub fn with_style(self, style: Style) -> Self {
        match self {
            Node::Text(mut t) => {
                t.style = style;
                Node::Text(t)
            }
            Node::Spinner(mut s) => {
                s.style = style;
                Node::Spinner(s)
            }
            Node::Box(mut b) => {
                b.style = style;
                Node::Box(b)
            }
            other => other,
        }
    }

    pub fn with_padding(self, padding: Padding) -> Self {
        match self {
            Node::Box(mut b) => {
                b.padding = padding;
                Node::Box(b)
            }
            other => Node::Box(BoxNode {
                children: vec![other],
                padding,
                ..Default::default()
            }),
        }
    }

    pub fn gap(self, gap: Gap) -> Self {
        match self {
            Node::Box(mut b) => {
                b.gap = gap;
                Node::Box(b)
            }
            other => Node::Box(BoxNode {
                children: vec![other],
                gap,
                ..Default::default()
            }),
        }
    }

    /// Direct children of a box or fragment; leaves have none.
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Box(b) => &b.children,
            Node::Fragment(children) => children,
            _ => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Node::Empty)
    }
}

impl SpinnerNode {
    pub fn current_char(&self) -> char {
        SPINNER_FRAMES[self.frame % SPINNER_FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn col_collects_children_in_order() {
        let node = col([text("a"), text("b")]);
        let children = node.children();
        assert_eq!(children.len(), 2);
        assert_eq!(children[0], text("a"));
        assert_eq!(children[1], text("b"));
    }

    #[test]
    fn padding_wraps_leaf_in_box() {
        let node = text("x").with_padding(Padding::left(2));
        match node {
            Node::Box(b) => {
                assert_eq!(b.padding.left, 2);
                assert_eq!(b.children, vec![text("x")]);
            }
            other => panic!("expected box, got {other:?}"),
        }
    }

    #[test]
    fn spinner_cycles_frames() {
        let s = SpinnerNode {
            label: None,
            style: Style::default(),
            frame: SPINNER_FRAMES.len() + 1,
        };
        assert_eq!(s.current_char(), SPINNER_FRAMES[1]);
    }

    #[test]
    fn leaves_have_no_children() {
        assert!(text("leaf").children().is_empty());
        assert!(Node::Empty.children().is_empty());
    }
}
