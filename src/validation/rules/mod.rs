//! Validation rules
//!
//! Each rule inspects the whole tree and returns zero or more findings.
//! Rules are stateless and never mutate their inputs.

mod capacity_mode;
mod capacity_sum;
mod node_label;
mod queue_name;
mod queue_state;

pub use capacity_mode::CapacityModeRule;
pub use capacity_sum::CapacitySumRule;
pub use node_label::NodeLabelRule;
pub use queue_name::QueueNameRule;
pub use queue_state::QueueStateRule;

use thiserror::Error;

use crate::domain::entities::ParsedQueue;

use super::context::ValidationContext;
use super::types::ValidationError;

/// Failure of a rule to run at all, as opposed to a finding.
#[derive(Error, Debug)]
pub enum RuleError {
    #[error("{0}")]
    Internal(String),
}

/// A check over the queue hierarchy.
pub trait ValidationRule: Send + Sync {
    /// Stable identifier used in logs and system errors.
    fn name(&self) -> &'static str;

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError>;
}

/// Pre-order list of queues that survive staged deletions.
///
/// A queue marked for deletion is dropped together with its subtree.
pub(crate) fn surviving_queues<'a>(
    queues: &'a [ParsedQueue],
    ctx: &ValidationContext,
) -> Vec<&'a ParsedQueue> {
    let mut out = Vec::new();
    let mut stack: Vec<&ParsedQueue> = queues.iter().rev().collect();
    while let Some(queue) = stack.pop() {
        if ctx.staged().is_pending_delete(&queue.path) {
            continue;
        }
        out.push(queue);
        stack.extend(queue.children.iter().rev());
    }
    out
}

/// Children of `queue` not marked for deletion.
pub(crate) fn surviving_children<'a>(
    queue: &'a ParsedQueue,
    ctx: &'a ValidationContext,
) -> impl Iterator<Item = &'a ParsedQueue> + 'a {
    queue
        .children
        .iter()
        .filter(move |child| !ctx.staged().is_pending_delete(&child.path))
}
