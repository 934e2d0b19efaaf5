//! Queue name rule

use std::collections::HashMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::entities::ParsedQueue;
use crate::validation::context::ValidationContext;
use crate::validation::types::{ErrorDetails, ValidationError, ValidationErrorKind};

use super::{RuleError, ValidationRule};

static QUEUE_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("queue name pattern compiles"));

/// True if `name` is non-empty and uses only letters, digits, `_` and `-`.
pub fn is_valid_queue_name(name: &str) -> bool {
    QUEUE_NAME.is_match(name)
}

/// Flags duplicate queue paths and names outside `[A-Za-z0-9_-]+`.
///
/// A queue marked for deletion still counts towards duplicates, but its
/// own name and its subtree are not checked.
#[derive(Debug, Default, Clone, Copy)]
pub struct QueueNameRule;

impl ValidationRule for QueueNameRule {
    fn name(&self) -> &'static str {
        "queue-name"
    }

    fn validate(
        &self,
        queues: &[ParsedQueue],
        ctx: &ValidationContext,
    ) -> Result<Vec<ValidationError>, RuleError> {
        let mut errors = Vec::new();
        let mut occurrences: HashMap<&str, usize> = HashMap::new();
        let mut first_seen: Vec<&str> = Vec::new();

        let mut stack: Vec<&ParsedQueue> = queues.iter().rev().collect();
        while let Some(queue) = stack.pop() {
            let count = occurrences.entry(queue.path.as_str()).or_insert(0);
            if *count == 0 {
                first_seen.push(queue.path.as_str());
            }
            *count += 1;

            if ctx.staged().is_pending_delete(&queue.path) {
                continue;
            }

            if !is_valid_queue_name(&queue.name) {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::InvalidQueueName,
                        format!(
                            "queue name '{}' may only contain letters, digits, '_' and '-'",
                            queue.name
                        ),
                    )
                    .at(&queue.path),
                );
            }
            stack.extend(queue.children.iter().rev());
        }

        for path in first_seen {
            let count = occurrences.get(path).copied().unwrap_or(0);
            if count > 1 {
                errors.push(
                    ValidationError::new(
                        ValidationErrorKind::DuplicateQueueName,
                        format!("queue path is declared {} times", count),
                    )
                    .at(path)
                    .with_details(ErrorDetails::DuplicatePath { occurrences: count }),
                );
            }
        }

        Ok(errors)
    }
}
