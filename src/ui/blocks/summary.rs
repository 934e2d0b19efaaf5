use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Success,
    Partial,
    Failure,
}

/// Boxed result panel closing a command's output.
#[derive(Debug, Clone)]
pub struct ResultSummary {
    title: String,
    outcome: Outcome,
    stats: Vec<(String, usize)>,
    notes: Vec<String>,
    next_step: Option<String>,
}

impl ResultSummary {
    fn with_outcome(title: impl Into<String>, outcome: Outcome) -> Self {
        Self {
            title: title.into(),
            outcome,
            stats: Vec::new(),
            notes: Vec::new(),
            next_step: None,
        }
    }

    pub fn success(title: impl Into<String>) -> Self {
        Self::with_outcome(title, Outcome::Success)
    }

    /// Passed, but with warnings worth reading.
    pub fn partial(title: impl Into<String>) -> Self {
        Self::with_outcome(title, Outcome::Partial)
    }

    pub fn failure(title: impl Into<String>) -> Self {
        Self::with_outcome(title, Outcome::Failure)
    }

    pub fn add_stat(&mut self, label: impl Into<String>, count: usize) {
        self.stats.push((label.into(), count));
    }

    pub fn add_note(&mut self, note: impl Into<String>) {
        self.notes.push(note.into());
    }

    pub fn with_next_step(&mut self, hint: impl Into<String>) {
        self.next_step = Some(hint.into());
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let (style, icon, title) = match self.outcome {
            Outcome::Success => (
                PanelStyle::Success,
                Icon::Success,
                ColoredText::success(self.title.as_str()),
            ),
            Outcome::Partial => (
                PanelStyle::Warning,
                Icon::Warning,
                ColoredText::warning(self.title.as_str()),
            ),
            Outcome::Failure => (
                PanelStyle::Error,
                Icon::Error,
                ColoredText::error(self.title.as_str()),
            ),
        };

        let header = format!(
            "{} {}",
            icon.colored(supports_color, supports_unicode),
            title.bold().render(supports_color)
        );
        let mut panel = Panel::titled(header, style);

        if !self.stats.is_empty() {
            panel.add_empty();
            for (label, count) in &self.stats {
                panel.add_line(format!("{} {}", count, label));
            }
        }

        if !self.notes.is_empty() {
            panel.add_empty();
            for note in &self.notes {
                panel.add_line(note.clone());
            }
        }

        if let Some(next_step) = &self.next_step {
            panel.add_empty();
            panel.add_line(format!(
                "{} {} {}",
                Icon::Arrow.colored(supports_color, supports_unicode),
                ColoredText::dim("Next:").render(supports_color),
                next_step
            ));
        }

        panel.render(supports_color, supports_unicode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_outcome_icon_in_title() {
        let mut summary = ResultSummary::failure("Validation failed");
        summary.add_stat("errors", 2);

        let rendered = summary.render(false, false);
        assert!(rendered.contains("[FAIL] Validation failed"));
        assert!(rendered.contains("2 errors"));
    }

    #[test]
    fn next_step_is_last_row() {
        let mut summary = ResultSummary::success("Parsed");
        summary.with_next_step("capconf validate conf.json");

        let rendered = summary.render(false, false);
        let rows: Vec<&str> = rendered.lines().collect();
        assert!(rows[rows.len() - 2].contains("[>] Next: capconf validate conf.json"));
    }
}
