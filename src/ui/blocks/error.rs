use std::path::{Path, PathBuf};

use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

/// A source line shown around an error location.
#[derive(Debug, Clone, PartialEq, Eq)]
struct ContextLine {
    number: usize,
    text: String,
    highlight: bool,
}

/// Boxed error for a file the user can open and fix.
#[derive(Debug, Clone)]
pub struct ErrorBlock {
    file: PathBuf,
    line: Option<usize>,
    message: String,
    context: Vec<ContextLine>,
    fix: Option<String>,
}

impl ErrorBlock {
    pub fn new(file: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            file: file.into(),
            line: None,
            message: message.into(),
            context: Vec::new(),
            fix: None,
        }
    }

    pub fn with_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_fix(mut self, fix: impl Into<String>) -> Self {
        self.fix = Some(fix.into());
        self
    }

    /// Read `before`/`after` lines around the error line from disk.
    pub fn with_file_context(mut self, before: usize, after: usize) -> Self {
        if let Some(line) = self.line {
            self.context = read_context(&self.file, line, before, after).unwrap_or_default();
        }
        self
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = format!(
            "{} {}",
            Icon::Error.colored(supports_color, supports_unicode),
            ColoredText::error("ERROR").bold().render(supports_color)
        );
        let mut panel = Panel::titled(title, PanelStyle::Error);

        match self.line {
            Some(line) => panel.add_line(format!("{}:{}", self.file.display(), line)),
            None => panel.add_line(self.file.display().to_string()),
        }
        panel.add_empty();
        panel.add_line(self.message.clone());

        if !self.context.is_empty() {
            panel.add_empty();
            for line in &self.context {
                let marker = if line.highlight {
                    Icon::Pointer.render(supports_unicode)
                } else {
                    " "
                };
                let text = if line.highlight {
                    ColoredText::error(line.text.as_str()).render(supports_color)
                } else {
                    line.text.clone()
                };
                panel.add_line(format!("{} {:>4} | {}", marker, line.number, text));
            }
        }

        if let Some(fix) = &self.fix {
            panel.add_empty();
            panel.add_line(format!("FIX: {}", fix));
        }

        panel.render(supports_color, supports_unicode)
    }
}

fn read_context(file: &Path, line: usize, before: usize, after: usize) -> Option<Vec<ContextLine>> {
    let content = std::fs::read_to_string(file).ok()?;
    let lines: Vec<&str> = content.lines().collect();
    if line == 0 || line > lines.len() {
        return None;
    }

    let start = line.saturating_sub(before + 1);
    let end = (line + after).min(lines.len());
    Some(
        lines[start..end]
            .iter()
            .enumerate()
            .map(|(i, text)| ContextLine {
                number: start + i + 1,
                text: (*text).to_string(),
                highlight: start + i + 1 == line,
            })
            .collect(),
    )
}
