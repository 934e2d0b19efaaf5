//! Validation report

use serde::Serialize;

use super::types::{Severity, ValidationError, ValidationErrorKind};

/// Receives findings as the pipeline produces them.
pub trait ValidationSink {
    fn add_finding(&mut self, finding: ValidationError);
}

/// Findings of a validation pass, in rule order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationReport {
    pub findings: Vec<ValidationError>,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            findings: Vec::new(),
        }
    }

    pub fn error_count(&self) -> usize {
        self.count_severity(Severity::Error)
    }

    pub fn warning_count(&self) -> usize {
        self.count_severity(Severity::Warning)
    }

    /// True if any finding should block submission.
    pub fn has_blocking_errors(&self) -> bool {
        self.error_count() > 0
    }

    pub fn is_success(&self) -> bool {
        self.findings.is_empty()
    }

    pub fn of_kind(&self, kind: ValidationErrorKind) -> impl Iterator<Item = &ValidationError> {
        self.findings.iter().filter(move |f| f.kind == kind)
    }

    pub fn count_of(&self, kind: ValidationErrorKind) -> usize {
        self.of_kind(kind).count()
    }

    /// Findings attached to a specific queue path.
    pub fn for_queue<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a ValidationError> {
        self.findings
            .iter()
            .filter(move |f| f.queue_path.as_deref() == Some(path))
    }

    pub fn into_findings(self) -> Vec<ValidationError> {
        self.findings
    }

    fn count_severity(&self, severity: Severity) -> usize {
        self.findings
            .iter()
            .filter(|f| f.severity == severity)
            .count()
    }
}

impl ValidationSink for ValidationReport {
    fn add_finding(&mut self, finding: ValidationError) {
        self.findings.push(finding);
    }
}

/// Sink that forwards each finding to a callback before recording it.
pub(crate) struct CallbackSink<F> {
    pub(crate) report: ValidationReport,
    on_finding: F,
}

impl<F> CallbackSink<F> {
    pub(crate) fn new(on_finding: F) -> Self {
        Self {
            report: ValidationReport::new(),
            on_finding,
        }
    }
}

impl<F: FnMut(&ValidationError)> ValidationSink for CallbackSink<F> {
    fn add_finding(&mut self, finding: ValidationError) {
        (self.on_finding)(&finding);
        self.report.findings.push(finding);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> ValidationReport {
        let mut report = ValidationReport::new();
        report.add_finding(
            ValidationError::new(ValidationErrorKind::CapacitySumError, "sum").at("root"),
        );
        report.add_finding(
            ValidationError::new(ValidationErrorKind::InvalidQueueName, "name")
                .at("root.a b")
                .with_severity(Severity::Warning),
        );
        report.add_finding(ValidationError::new(
            ValidationErrorKind::AbsoluteModeMixingLegacy,
            "mixed",
        ));
        report
    }

    #[test]
    fn counts_by_severity() {
        let report = sample();
        assert_eq!(report.error_count(), 2);
        assert_eq!(report.warning_count(), 1);
        assert!(report.has_blocking_errors());
        assert!(!report.is_success());
    }

    #[test]
    fn filters_by_kind_and_queue() {
        let report = sample();
        assert_eq!(report.count_of(ValidationErrorKind::CapacitySumError), 1);
        assert_eq!(report.count_of(ValidationErrorKind::DuplicateQueueName), 0);
        assert_eq!(report.for_queue("root").count(), 1);
        assert_eq!(report.for_queue("root.x").count(), 0);
    }

    #[test]
    fn empty_report_is_success() {
        let report = ValidationReport::default();
        assert!(report.is_success());
        assert!(!report.has_blocking_errors());
    }

    #[test]
    fn callback_sink_sees_every_finding() {
        let mut seen = Vec::new();
        let report = {
            let mut sink = CallbackSink::new(|f: &ValidationError| seen.push(f.kind));
            sink.add_finding(ValidationError::new(
                ValidationErrorKind::InvalidNodeLabel,
                "x",
            ));
            sink.report
        };
        assert_eq!(report.findings.len(), 1);
        assert_eq!(seen, vec![ValidationErrorKind::InvalidNodeLabel]);
    }
}
