//! Node label rule

use tracing::debug;

use crate::domain::entities::ParsedQueue;
use crate::validation::context::ValidationContext;
use crate::validation::types::{ErrorDetails, ValidationError, ValidationErrorKind};

use super::{surviving_queues, RuleError, ValidationRule};

/// Grants access to every label.
pub const ANY_LABEL: &str = "*";

/// Accessible labels and default label expressions must name labels the
/// cluster knows about.
///
/// Without a label inventory in the context the rule is skipped.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeLabelRule;

impl ValidationRule for NodeLabelRule {
    fn name(&self) -> &'static str {
        "node-label"
    }

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError> {
        let Some(inventory) = ctx.node_labels() else {
            debug!("no node label inventory supplied, skipping label checks");
            return Ok(Vec::new());
        };

        let mut errors = Vec::new();
        let mut unknown = |queue: &ParsedQueue, label: &str, what: &str| {
            errors.push(
                ValidationError::new(
                    ValidationErrorKind::InvalidNodeLabel,
                    format!("{} '{}' does not exist in the cluster", what, label),
                )
                .at(&queue.path)
                .with_details(ErrorDetails::NodeLabel {
                    label: label.to_string(),
                    known_labels: inventory.labels(),
                }),
            );
        };

        for queue in surviving_queues(queues, ctx) {
            for label in &queue.accessible_node_labels {
                if label != ANY_LABEL && !inventory.contains(label) {
                    unknown(queue, label, "accessible node label");
                }
            }
            if let Some(expr) = &queue.default_node_label_expression {
                if !inventory.contains(expr) {
                    unknown(queue, expr.trim(), "default node label");
                }
            }
        }

        Ok(errors)
    }
}
