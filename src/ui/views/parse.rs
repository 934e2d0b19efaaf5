use std::collections::BTreeMap;

use capconf::domain::value_objects::CapacityKind;
use capconf::{CapacityValue, ParseIssue, ParseResult, ParsedQueue};

use crate::ui::blocks::finding::{FindingItem, FindingLevel};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;
use crate::ui::widgets::panel::{Panel, PanelStyle};
use crate::ui::widgets::tree::TreeNode;

pub fn mode_label(legacy: bool) -> &'static str {
    if legacy {
        "legacy"
    } else {
        "flexible"
    }
}

pub fn render_parse_header(
    file: &str,
    result: &ParseResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Parse, "capconf parse");
    header.add("File", file);
    header.add("Queues", result.queue_count().to_string());
    header.add("Mode", mode_label(result.is_legacy_mode()));
    header.render(supports_color, supports_unicode)
}

/// Capacity as shown in the tree: `70%`, `3w` or the raw resource vector.
pub fn capacity_label(capacity: &CapacityValue) -> String {
    match capacity.kind() {
        CapacityKind::Percentage { .. } => format!("{}%", capacity.raw().trim()),
        CapacityKind::Weight { .. } | CapacityKind::Absolute { .. } => {
            capacity.raw().trim().to_string()
        }
    }
}

fn queue_label(queue: &ParsedQueue, verbose: bool, supports_color: bool) -> String {
    let mut label = format!(
        "{} {}",
        ColoredText::plain(queue.name.as_str()).bold().render(supports_color),
        ColoredText::info(capacity_label(&queue.capacity)).render(supports_color)
    );

    if verbose {
        label.push_str(&format!(" max {}", capacity_label(&queue.maximum_capacity)));
    }
    if !queue.state.is_running() {
        label.push(' ');
        label.push_str(
            &ColoredText::warning(format!("[{}]", queue.state)).render(supports_color),
        );
    }
    if !queue.accessible_node_labels.is_empty() {
        label.push(' ');
        label.push_str(
            &ColoredText::dim(format!("labels={}", queue.accessible_node_labels.join(",")))
                .render(supports_color),
        );
    }
    if verbose && !queue.properties.is_empty() {
        label.push(' ');
        label.push_str(
            &ColoredText::dim(format!("+{} other", queue.properties.len())).render(supports_color),
        );
    }
    label
}

fn tree_node(queue: &ParsedQueue, verbose: bool, supports_color: bool) -> TreeNode {
    queue
        .children
        .iter()
        .fold(
            TreeNode::new(queue_label(queue, verbose, supports_color)),
            |node, child| node.with_child(tree_node(child, verbose, supports_color)),
        )
}

/// The queue hierarchy, one line per queue.
pub fn render_queue_tree(
    result: &ParseResult,
    verbose: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    result
        .queues()
        .iter()
        .map(|root| tree_node(root, verbose, supports_color).render(supports_unicode))
        .collect()
}

pub fn render_global_properties(
    properties: &BTreeMap<String, String>,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    if properties.is_empty() {
        return String::new();
    }
    let mut panel = Panel::titled("Global properties", PanelStyle::Info);
    for (key, value) in properties {
        panel.add_line(format!("{} = {}", key, value));
    }
    panel.render(supports_color, supports_unicode)
}

fn issue_item(issue: &ParseIssue, level: FindingLevel) -> FindingItem {
    FindingItem::new(level, issue.kind.as_str(), issue.message.as_str())
        .at(issue.queue_path.as_deref())
}

/// Parse errors first, then warnings.
pub fn render_parse_issues(
    result: &ParseResult,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let errors = result
        .errors()
        .iter()
        .map(|i| issue_item(i, FindingLevel::Error));
    let warnings = result
        .warnings()
        .iter()
        .map(|i| issue_item(i, FindingLevel::Warning));

    errors
        .chain(warnings)
        .map(|item| item.render(false, supports_color, supports_unicode))
        .collect()
}

pub fn render_parse_summary(
    result: &ParseResult,
    file: &str,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let errors = result.errors().len();
    let warnings = result.warnings().len();

    let mut summary = if errors > 0 {
        ResultSummary::failure("Parse failed")
    } else if warnings > 0 {
        ResultSummary::partial("Parsed with warnings")
    } else {
        ResultSummary::success("Parsed")
    };
    summary.add_stat("queues", result.queue_count());
    summary.add_stat("global properties", result.global_properties().len());
    summary.add_stat("errors", errors);
    summary.add_stat("warnings", warnings);
    if errors == 0 {
        summary.with_next_step(format!("capconf validate {}", file));
    }
    summary.render(supports_color, supports_unicode)
}
