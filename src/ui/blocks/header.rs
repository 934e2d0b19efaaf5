use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Title line followed by indented `label: value` rows, labels padded to
/// a common column.
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    rows: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            rows: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.rows.push((format!("{}:", label.into()), value.into()));
    }

    fn label_width(&self) -> usize {
        self.rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0)
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let mut lines = vec![format!(
            "{} {}",
            self.icon.colored(supports_color, supports_unicode),
            ColoredText::info(self.title.as_str())
                .bold()
                .render(supports_color)
        )];

        let width = self.label_width();
        lines.extend(self.rows.iter().map(|(label, value)| {
            let padded = format!("{:<width$}", label, width = width);
            format!(
                "  {} {}",
                ColoredText::dim(padded).render(supports_color),
                value
            )
        }));

        lines.iter().map(|line| format!("{}\n", line)).collect()
    }
}
