//! Validation result types

use std::fmt;

use serde::Serialize;

/// Closed set of validation findings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValidationErrorKind {
    DuplicateQueueName,
    InvalidQueueName,
    CapacitySumError,
    MixedPercentageWeightLegacy,
    AbsoluteModeMixingLegacy,
    InvalidQueueState,
    DeleteQueueWithRunningApps,
    InvalidNodeLabel,
    ValidationSystemError,
}

impl ValidationErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationErrorKind::DuplicateQueueName => "DUPLICATE_QUEUE_NAME",
            ValidationErrorKind::InvalidQueueName => "INVALID_QUEUE_NAME",
            ValidationErrorKind::CapacitySumError => "CAPACITY_SUM_ERROR",
            ValidationErrorKind::MixedPercentageWeightLegacy => "MIXED_PERCENTAGE_WEIGHT_LEGACY",
            ValidationErrorKind::AbsoluteModeMixingLegacy => "ABSOLUTE_MODE_MIXING_LEGACY",
            ValidationErrorKind::InvalidQueueState => "INVALID_QUEUE_STATE",
            ValidationErrorKind::DeleteQueueWithRunningApps => "DELETE_QUEUE_WITH_RUNNING_APPS",
            ValidationErrorKind::InvalidNodeLabel => "INVALID_NODE_LABEL",
            ValidationErrorKind::ValidationSystemError => "VALIDATION_SYSTEM_ERROR",
        }
    }
}

impl fmt::Display for ValidationErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Whether a finding blocks submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    #[default]
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// Structured payload attached by a rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ErrorDetails {
    CapacitySum {
        actual_sum: f64,
        expected_sum: f64,
    },
    /// Queue paths grouped by effective capacity mode.
    ModePartition {
        percentage: Vec<String>,
        weight: Vec<String>,
        absolute: Vec<String>,
    },
    NodeLabel {
        label: String,
        known_labels: Vec<String>,
    },
    RunningApplications {
        running_applications: u64,
    },
    QueueState {
        state: String,
    },
    DuplicatePath {
        occurrences: usize,
    },
    RuleFailure {
        rule: String,
        message: String,
    },
}

/// One finding from a validation rule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationError {
    #[serde(rename = "type")]
    pub kind: ValidationErrorKind,
    pub severity: Severity,
    pub message: String,
    /// Queue the finding concerns; `None` for hierarchy-wide findings.
    pub queue_path: Option<String>,
    pub details: Option<ErrorDetails>,
}

impl ValidationError {
    pub fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            severity: Severity::Error,
            message: message.into(),
            queue_path: None,
            details: None,
        }
    }

    pub fn at(mut self, queue_path: impl Into<String>) -> Self {
        self.queue_path = Some(queue_path.into());
        self
    }

    pub fn with_details(mut self, details: ErrorDetails) -> Self {
        self.details = Some(details);
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.queue_path {
            Some(path) => write!(f, "[{}] {}: {}", self.kind, path, self.message),
            None => write!(f, "[{}] {}", self.kind, self.message),
        }
    }
}
