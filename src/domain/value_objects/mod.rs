//! Domain Value Objects
//!
//! Immutable value types for the pieces of a queue configuration:
//! property keys, capacities and queue states.

mod capacity;
pub mod property_key;
mod queue_state;

pub use capacity::{
    percentage_sum, sums_to_full, CapacityKind, CapacityMode, CapacityParseError, CapacityValue,
    CAPACITY_SUM_TOLERANCE, PERCENTAGE_MAX, PERCENTAGE_MIN,
};
pub use queue_state::QueueState;
