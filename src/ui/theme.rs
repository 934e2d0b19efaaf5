use crossterm::style::Color;

/// Design tokens for the capconf terminal UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons, borders and tree connectors must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";
    pub const POINTER: &str = "↑";

    // Command identifiers (used in headers).
    pub const PARSE: &str = "🌲";
    pub const VALIDATE: &str = "🔍";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";
    pub const POINTER: &str = "^";

    pub const PARSE: &str = "[PARSE]";
    pub const VALIDATE: &str = "[VALIDATE]";
}

pub mod borders {
    pub const TOP_LEFT: &str = "╭";
    pub const TOP_RIGHT: &str = "╮";
    pub const BOTTOM_LEFT: &str = "╰";
    pub const BOTTOM_RIGHT: &str = "╯";
    pub const HORIZONTAL: &str = "─";
    pub const VERTICAL: &str = "│";
}

pub mod borders_ascii {
    pub const TOP_LEFT: &str = "+";
    pub const TOP_RIGHT: &str = "+";
    pub const BOTTOM_LEFT: &str = "+";
    pub const BOTTOM_RIGHT: &str = "+";
    pub const HORIZONTAL: &str = "-";
    pub const VERTICAL: &str = "|";
}

/// Connectors for the queue tree.
pub mod tree {
    pub const BRANCH: &str = "├── ";
    pub const LAST: &str = "└── ";
    pub const PIPE: &str = "│   ";
    pub const SPACE: &str = "    ";
}

pub mod tree_ascii {
    pub const BRANCH: &str = "|-- ";
    pub const LAST: &str = "`-- ";
    pub const PIPE: &str = "|   ";
    pub const SPACE: &str = "    ";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tree_connectors_share_width() {
        use unicode_width::UnicodeWidthStr;

        for s in [tree::BRANCH, tree::LAST, tree::PIPE, tree::SPACE] {
            assert_eq!(s.width(), 4);
        }
        for s in [
            tree_ascii::BRANCH,
            tree_ascii::LAST,
            tree_ascii::PIPE,
            tree_ascii::SPACE,
        ] {
            assert_eq!(s.width(), 4);
        }
    }

    #[test]
    fn ascii_icons_are_ascii() {
        for s in [
            icons_ascii::SUCCESS,
            icons_ascii::ERROR,
            icons_ascii::WARNING,
            icons_ascii::ARROW,
            icons_ascii::POINTER,
            icons_ascii::PARSE,
            icons_ascii::VALIDATE,
        ] {
            assert!(s.is_ascii());
        }
    }
}
