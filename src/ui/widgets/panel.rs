use std::borrow::Cow;

use crossterm::style::Stylize;
use unicode_width::UnicodeWidthStr;

use crate::ui::primitives::border::BorderChar;
use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelStyle {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

impl PanelStyle {
    fn color(&self) -> crossterm::style::Color {
        match self {
            PanelStyle::Info => theme::colors::INFO,
            PanelStyle::Success => theme::colors::SUCCESS,
            PanelStyle::Warning => theme::colors::WARNING,
            PanelStyle::Error => theme::colors::ERROR,
        }
    }
}

/// Bordered block of lines, sized to its widest line.
#[derive(Debug, Default, Clone)]
pub struct Panel {
    title: Option<String>,
    lines: Vec<String>,
    style: PanelStyle,
}

impl Panel {
    pub fn new(style: PanelStyle) -> Self {
        Self {
            style,
            ..Self::default()
        }
    }

    pub fn titled(title: impl Into<String>, style: PanelStyle) -> Self {
        let mut panel = Self::new(style);
        panel.title = Some(title.into());
        panel
    }

    /// Multi-line input becomes one row per line.
    pub fn add_line(&mut self, line: impl Into<String>) {
        let line = line.into();
        if line.is_empty() {
            self.lines.push(line);
            return;
        }
        self.lines.extend(line.lines().map(str::to_string));
    }

    pub fn add_empty(&mut self) {
        self.lines.push(String::new());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let rows: Vec<&str> = self
            .title
            .iter()
            .chain(self.lines.iter())
            .map(String::as_str)
            .collect();

        let content_width = rows.iter().map(|r| visible_width(r)).max().unwrap_or(0);
        // One space of padding on each side.
        let inner_width = content_width + 2;

        let border = |s: &str| -> String {
            if supports_color {
                format!("{}", s.with(self.style.color()))
            } else {
                s.to_string()
            }
        };
        let h = BorderChar::Horizontal.render(supports_unicode).repeat(inner_width);
        let v = border(BorderChar::Vertical.render(supports_unicode));

        let mut out = String::new();
        out.push_str(&border(&format!(
            "{}{}{}",
            BorderChar::TopLeft.render(supports_unicode),
            h,
            BorderChar::TopRight.render(supports_unicode)
        )));
        out.push('\n');

        for row in rows {
            let pad = content_width - visible_width(row);
            out.push_str(&format!("{v} {row}{} {v}\n", " ".repeat(pad)));
        }

        out.push_str(&border(&format!(
            "{}{}{}",
            BorderChar::BottomLeft.render(supports_unicode),
            h,
            BorderChar::BottomRight.render(supports_unicode)
        )));
        out.push('\n');
        out
    }
}

/// Display width of `s` once ANSI escapes are removed.
pub fn visible_width(s: &str) -> usize {
    strip_ansi(s).width()
}

pub fn strip_ansi(s: &str) -> Cow<'_, str> {
    if !s.contains('\u{1b}') {
        return Cow::Borrowed(s);
    }

    let mut out = String::with_capacity(s.len());
    let mut chars = s.chars().peekable();
    while let Some(c) = chars.next() {
        if c != '\u{1b}' {
            out.push(c);
            continue;
        }
        // ESC [ ... <final letter>
        if matches!(chars.peek(), Some('[') | Some(']')) {
            chars.next();
        }
        for next in chars.by_ref() {
            if next.is_ascii_alphabetic() {
                break;
            }
        }
    }
    Cow::Owned(out)
}
