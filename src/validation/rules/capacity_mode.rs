//! Capacity mode mixing rule
//!
//! Legacy queue mode forbids two kinds of mixing:
//!
//! - siblings combining percentage and weight capacities;
//! - absolute capacities anywhere alongside percentage or weight ones.
//!
//! Outside legacy mode the rule reports nothing.

use crate::domain::entities::ParsedQueue;
use crate::domain::value_objects::CapacityMode;
use crate::validation::context::ValidationContext;
use crate::validation::types::{ErrorDetails, ValidationError, ValidationErrorKind};

use super::{surviving_children, surviving_queues, RuleError, ValidationRule};

#[derive(Debug, Default, Clone, Copy)]
pub struct CapacityModeRule;

/// Queue paths grouped by effective capacity mode, in visit order.
#[derive(Debug, Default)]
struct ModePartition {
    percentage: Vec<String>,
    weight: Vec<String>,
    absolute: Vec<String>,
}

impl ModePartition {
    fn of<'a>(queues: impl IntoIterator<Item = &'a ParsedQueue>, ctx: &ValidationContext) -> Self {
        let mut partition = Self::default();
        for queue in queues {
            let bucket = match ctx.effective_mode(queue) {
                CapacityMode::Percentage => &mut partition.percentage,
                CapacityMode::Weight => &mut partition.weight,
                CapacityMode::Absolute => &mut partition.absolute,
            };
            bucket.push(queue.path.clone());
        }
        partition
    }

    fn into_details(self) -> ErrorDetails {
        ErrorDetails::ModePartition {
            percentage: self.percentage,
            weight: self.weight,
            absolute: self.absolute,
        }
    }
}

impl ValidationRule for CapacityModeRule {
    fn name(&self) -> &'static str {
        "capacity-mode"
    }

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError> {
        if !ctx.is_legacy_mode() {
            return Ok(Vec::new());
        }

        let surviving = surviving_queues(queues, ctx);
        let mut errors = Vec::new();

        for parent in &surviving {
            let siblings = ModePartition::of(surviving_children(parent, ctx), ctx);
            if siblings.percentage.is_empty() || siblings.weight.is_empty() {
                continue;
            }
            let message = format!(
                "children mix percentage ({}) and weight ({}) capacities",
                siblings.percentage.join(", "),
                siblings.weight.join(", ")
            );
            errors.push(
                ValidationError::new(ValidationErrorKind::MixedPercentageWeightLegacy, message)
                    .at(&parent.path)
                    .with_details(ErrorDetails::ModePartition {
                        percentage: siblings.percentage,
                        weight: siblings.weight,
                        absolute: Vec::new(),
                    }),
            );
        }

        // Root carries no meaningful capacity of its own.
        let global = ModePartition::of(surviving.iter().copied().filter(|q| !q.is_root()), ctx);
        if !global.absolute.is_empty() && (!global.percentage.is_empty() || !global.weight.is_empty())
        {
            let message = format!(
                "absolute capacities ({}) are mixed with percentage or weight capacities in the hierarchy",
                global.absolute.join(", ")
            );
            errors.push(
                ValidationError::new(ValidationErrorKind::AbsoluteModeMixingLegacy, message)
                    .with_details(global.into_details()),
            );
        }

        Ok(errors)
    }
}
