//! Queue state rule

use crate::domain::entities::ParsedQueue;
use crate::validation::context::ValidationContext;
use crate::validation::types::{ErrorDetails, ValidationError, ValidationErrorKind};

use super::{RuleError, ValidationRule};

/// State must be `RUNNING` or `STOPPED`, and a queue being removed must
/// have no running applications.
///
/// A queue counts as removed when it or an ancestor is marked for deletion.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueueStateRule;

impl ValidationRule for QueueStateRule {
    fn name(&self) -> &'static str {
        "queue-state"
    }

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError> {
        let mut errors = Vec::new();

        for queue in queues.iter().flat_map(ParsedQueue::iter) {
            let removed = ctx.staged().is_removed(&queue.path);

            if !removed && !queue.state.is_valid() {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::InvalidQueueState,
                        format!(
                            "state '{}' is not one of RUNNING, STOPPED",
                            queue.state.as_str()
                        ),
                    )
                    .at(&queue.path)
                    .with_details(ErrorDetails::QueueState {
                        state: queue.state.as_str().to_string(),
                    }),
                );
            }

            let running = ctx.running_applications(&queue.path);
            if removed && running > 0 {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::DeleteQueueWithRunningApps,
                        format!(
                            "queue is marked for deletion but has {} running application(s)",
                            running
                        ),
                    )
                    .at(&queue.path)
                    .with_details(ErrorDetails::RunningApplications {
                        running_applications: running,
                    }),
                );
            }
        }

        Ok(errors)
    }
}
