use capconf::validation::{ErrorDetails, Severity};
use capconf::{ValidationError, ValidationReport};

use crate::ui::blocks::finding::{FindingItem, FindingLevel};
use crate::ui::blocks::header::CommandHeader;
use crate::ui::blocks::summary::ResultSummary;
use crate::ui::primitives::icon::Icon;

pub fn render_validate_header(
    file: &str,
    legacy: bool,
    rules: &[&str],
    strict_warnings: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let mut header = CommandHeader::new(Icon::Validate, "capconf validate");
    header.add("File", file);
    header.add("Mode", super::parse::mode_label(legacy));
    header.add("Rules", rules.join(", "));
    if strict_warnings {
        header.add("Strict", "failing on warnings");
    }
    header.render(supports_color, supports_unicode)
}

fn detail_lines(details: &ErrorDetails) -> Vec<String> {
    match details {
        ErrorDetails::CapacitySum {
            actual_sum,
            expected_sum,
        } => vec![format!("sum {} of expected {}", actual_sum, expected_sum)],
        ErrorDetails::ModePartition {
            percentage,
            weight,
            absolute,
        } => [("percentage", percentage), ("weight", weight), ("absolute", absolute)]
            .into_iter()
            .filter(|(_, paths)| !paths.is_empty())
            .map(|(mode, paths)| format!("{}: {}", mode, paths.join(", ")))
            .collect(),
        ErrorDetails::NodeLabel {
            label,
            known_labels,
        } => vec![format!(
            "'{}' not in cluster labels [{}]",
            label,
            known_labels.join(", ")
        )],
        ErrorDetails::RunningApplications {
            running_applications,
        } => vec![format!("{} running applications", running_applications)],
        ErrorDetails::QueueState { state } => vec![format!("state '{}'", state)],
        ErrorDetails::DuplicatePath { occurrences } => {
            vec![format!("{} occurrences", occurrences)]
        }
        ErrorDetails::RuleFailure { rule, message } => vec![format!("{}: {}", rule, message)],
    }
}

pub fn finding_item(finding: &ValidationError) -> FindingItem {
    let level = match finding.severity {
        Severity::Error => FindingLevel::Error,
        Severity::Warning => FindingLevel::Warning,
    };
    let item = FindingItem::new(level, finding.kind.as_str(), finding.message.as_str())
        .at(finding.queue_path.as_deref());
    finding
        .details
        .iter()
        .flat_map(detail_lines)
        .fold(item, |item, line| item.with_detail(line))
}

pub fn render_findings(
    report: &ValidationReport,
    verbose: u8,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    report
        .findings
        .iter()
        .map(|f| finding_item(f).render(verbose > 0, supports_color, supports_unicode))
        .collect()
}

pub fn render_validate_summary(
    report: &ValidationReport,
    parse_errors: usize,
    has_issues: bool,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let errors = report.error_count();
    let warnings = report.warning_count();

    let mut summary = if has_issues {
        ResultSummary::failure("Validation FAILED")
    } else if warnings > 0 {
        ResultSummary::partial("Valid with warnings")
    } else {
        ResultSummary::success("Configuration is valid")
    };
    if parse_errors > 0 {
        summary.add_stat("parse errors", parse_errors);
    }
    summary.add_stat("errors", errors);
    summary.add_stat("warnings", warnings);
    if parse_errors > 0 {
        summary.add_note("Fix the parse errors first; rules ran on a partial tree.");
    }
    summary.render(supports_color, supports_unicode)
}
