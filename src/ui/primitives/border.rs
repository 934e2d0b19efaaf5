use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorderChar {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    Horizontal,
    Vertical,
}

impl BorderChar {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{borders as u, borders_ascii as a};

        let (unicode, ascii) = match self {
            BorderChar::TopLeft => (u::TOP_LEFT, a::TOP_LEFT),
            BorderChar::TopRight => (u::TOP_RIGHT, a::TOP_RIGHT),
            BorderChar::BottomLeft => (u::BOTTOM_LEFT, a::BOTTOM_LEFT),
            BorderChar::BottomRight => (u::BOTTOM_RIGHT, a::BOTTOM_RIGHT),
            BorderChar::Horizontal => (u::HORIZONTAL, a::HORIZONTAL),
            BorderChar::Vertical => (u::VERTICAL, a::VERTICAL),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }
}

/// Tree connector placed before a node or under an ancestor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeConnector {
    /// Node with later siblings.
    Branch,
    /// Last node among its siblings.
    Last,
    /// Column under an ancestor with later siblings.
    Pipe,
    /// Column under a last ancestor.
    Space,
}

impl TreeConnector {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        use theme::{tree as u, tree_ascii as a};

        let (unicode, ascii) = match self {
            TreeConnector::Branch => (u::BRANCH, a::BRANCH),
            TreeConnector::Last => (u::LAST, a::LAST),
            TreeConnector::Pipe => (u::PIPE, a::PIPE),
            TreeConnector::Space => (u::SPACE, a::SPACE),
        };
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn for_node(is_last: bool) -> Self {
        if is_last {
            TreeConnector::Last
        } else {
            TreeConnector::Branch
        }
    }

    pub fn for_ancestor(is_last: bool) -> Self {
        if is_last {
            TreeConnector::Space
        } else {
            TreeConnector::Pipe
        }
    }
}
