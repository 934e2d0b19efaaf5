//! Capacity sum rule

use crate::domain::entities::ParsedQueue;
use crate::domain::value_objects::{percentage_sum, sums_to_full, CapacityMode, PERCENTAGE_MAX};
use crate::validation::context::ValidationContext;
use crate::validation::types::{ErrorDetails, ValidationError, ValidationErrorKind};

use super::{surviving_children, surviving_queues, RuleError, ValidationRule};

/// Percentage children of a parent must sum to 100.
///
/// Applies only when every surviving child is in percentage mode.
#[derive(Debug, Default, Clone, Copy)]
pub struct CapacitySumRule;

impl ValidationRule for CapacitySumRule {
    fn name(&self) -> &'static str {
        "capacity-sum"
    }

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError> {
        let mut errors = Vec::new();

        for parent in surviving_queues(queues, ctx) {
            let children: Vec<&ParsedQueue> = surviving_children(parent, ctx).collect();
            if children.is_empty()
                || children
                    .iter()
                    .any(|c| ctx.effective_mode(c) != CapacityMode::Percentage)
            {
                continue;
            }

            let Some(sum) = percentage_sum(children.iter().map(|c| &c.capacity)) else {
                continue;
            };
            if !sums_to_full(sum) {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::CapacitySumError,
                        format!(
                            "child capacities sum to {}%, expected {}%",
                            round2(sum),
                            PERCENTAGE_MAX
                        ),
                    )
                    .at(&parent.path)
                    .with_details(ErrorDetails::CapacitySum {
                        actual_sum: sum,
                        expected_sum: PERCENTAGE_MAX,
                    }),
                );
            }
        }

        Ok(errors)
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
