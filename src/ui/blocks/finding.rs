use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FindingLevel {
    Warning,
    Error,
}

impl FindingLevel {
    fn icon(&self) -> Icon {
        match self {
            FindingLevel::Warning => Icon::Warning,
            FindingLevel::Error => Icon::Error,
        }
    }
}

/// One parse issue or validation finding.
#[derive(Debug, Clone)]
pub struct FindingItem {
    pub level: FindingLevel,
    pub code: String,
    pub queue_path: Option<String>,
    pub message: String,
    pub details: Vec<String>,
}

impl FindingItem {
    pub fn new(level: FindingLevel, code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            level,
            code: code.into(),
            queue_path: None,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn at(mut self, queue_path: Option<&str>) -> Self {
        self.queue_path = queue_path.map(str::to_string);
        self
    }

    pub fn with_detail(mut self, detail: impl Into<String>) -> Self {
        self.details.push(detail.into());
        self
    }

    /// Details are only printed in verbose mode.
    pub fn render(&self, verbose: bool, supports_color: bool, supports_unicode: bool) -> String {
        let icon = self.level.icon().colored(supports_color, supports_unicode);
        let code = ColoredText::dim(format!("[{}]", self.code)).render(supports_color);

        let mut out = match &self.queue_path {
            Some(path) => {
                let path = ColoredText::plain(path.as_str()).bold().render(supports_color);
                format!("  {} {} {}: {}\n", icon, code, path, self.message)
            }
            None => format!("  {} {} {}\n", icon, code, self.message),
        };

        if verbose {
            for detail in &self.details {
                out.push_str(&format!(
                    "    {} {}\n",
                    Icon::Arrow.colored(supports_color, supports_unicode),
                    detail
                ));
            }
        }
        out
    }
}
