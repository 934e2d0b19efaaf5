use crossterm::style::{Color, Stylize};

use crate::ui::theme::{colors, icons, icons_ascii};

/// Status and command glyphs. Each has a unicode form and an ASCII
/// fallback for terminals that cannot show it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Pointer,
    Parse,
    Validate,
}

impl Icon {
    /// `(unicode, ascii)` glyphs.
    fn glyphs(self) -> (&'static str, &'static str) {
        match self {
            Icon::Success => (icons::SUCCESS, icons_ascii::SUCCESS),
            Icon::Error => (icons::ERROR, icons_ascii::ERROR),
            Icon::Warning => (icons::WARNING, icons_ascii::WARNING),
            Icon::Arrow => (icons::ARROW, icons_ascii::ARROW),
            Icon::Pointer => (icons::POINTER, icons_ascii::POINTER),
            Icon::Parse => (icons::PARSE, icons_ascii::PARSE),
            Icon::Validate => (icons::VALIDATE, icons_ascii::VALIDATE),
        }
    }

    fn color(self) -> Color {
        match self {
            Icon::Success => colors::SUCCESS,
            Icon::Error | Icon::Pointer => colors::ERROR,
            Icon::Warning => colors::WARNING,
            Icon::Arrow => colors::DIM,
            Icon::Parse | Icon::Validate => colors::INFO,
        }
    }

    pub fn render(&self, supports_unicode: bool) -> &'static str {
        let (unicode, ascii) = self.glyphs();
        if supports_unicode {
            unicode
        } else {
            ascii
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let glyph = self.render(supports_unicode);
        if supports_color {
            glyph.with(self.color()).to_string()
        } else {
            glyph.to_string()
        }
    }
}
