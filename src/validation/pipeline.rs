//! Validation pipeline
//!
//! Runs every rule in a fixed order and aggregates the findings. A rule
//! that fails or panics is reported as a single `VALIDATION_SYSTEM_ERROR`
//! and the remaining rules still run.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use tracing::{debug, warn};

use crate::domain::entities::{ParseResult, ParsedQueue};

use super::context::ValidationContext;
use super::report::{CallbackSink, ValidationReport, ValidationSink};
use super::rules::{
    CapacityModeRule, CapacitySumRule, NodeLabelRule, QueueNameRule, QueueStateRule,
    ValidationRule,
};
use super::types::{ErrorDetails, ValidationError, ValidationErrorKind};

/// Ordered list of rules.
pub struct ValidationPipeline {
    rules: Vec<Box<dyn ValidationRule>>,
}

impl Default for ValidationPipeline {
    fn default() -> Self {
        Self::standard()
    }
}

impl ValidationPipeline {
    /// Pipeline without any rules.
    pub fn empty() -> Self {
        Self { rules: Vec::new() }
    }

    /// Built-in rules: names, capacity sums, mode mixing, states, node labels.
    pub fn standard() -> Self {
        Self::empty()
            .with_rule(QueueNameRule)
            .with_rule(CapacitySumRule)
            .with_rule(CapacityModeRule)
            .with_rule(QueueStateRule)
            .with_rule(NodeLabelRule)
    }

    /// Append a rule; it runs after all rules added before it.
    pub fn with_rule(mut self, rule: impl ValidationRule + 'static) -> Self {
        self.rules.push(Box::new(rule));
        self
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, queues: &[ParsedQueue], ctx: &ValidationContext) -> ValidationReport {
        let mut report = ValidationReport::new();
        self.validate_into(queues, ctx, &mut report);
        report
    }

    /// Validate, calling `on_finding` for each finding as it is produced.
    pub fn validate_with_callback(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
        on_finding: impl FnMut(&ValidationError),
    ) -> ValidationReport {
        let mut sink = CallbackSink::new(on_finding);
        self.validate_into(queues, ctx, &mut sink);
        sink.report
    }

    pub fn validate_into(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
        sink: &mut impl ValidationSink,
    ) {
        for rule in &self.rules {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| rule.validate(queues, ctx)));
            let failure = match outcome {
                Ok(Ok(findings)) => {
                    debug!(rule = rule.name(), findings = findings.len(), "rule finished");
                    for finding in findings {
                        sink.add_finding(finding);
                    }
                    continue;
                }
                Ok(Err(err)) => err.to_string(),
                Err(payload) => format!("panicked: {}", panic_message(payload.as_ref())),
            };

            warn!(rule = rule.name(), error = %failure, "validation rule failed");
            sink.add_finding(system_error(rule.name(), failure));
        }
    }
}

/// Validate a parse result with the standard rules and a context derived
/// from the parse.
pub fn validate_parse_result(result: &ParseResult) -> ValidationReport {
    ValidationPipeline::standard().validate(result.queues(), &ValidationContext::from_parse(result))
}

fn system_error(rule: &str, message: String) -> ValidationError {
    ValidationError::new(
        ValidationErrorKind::ValidationSystemError,
        format!("rule '{}' failed: {}", rule, message),
    )
    .with_details(ErrorDetails::RuleFailure {
        rule: rule.to_string(),
        message,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
