//! Property tests for capconf.
//!
//! Properties use randomized input generation to explore edge cases and
//! protect invariants like "never panics" and "round-trips".
//!
//! Run with: `cargo test --test properties`

#[path = "properties/capacity_value.rs"]
mod capacity_value;

#[path = "properties/config_parser.rs"]
mod config_parser;

#[path = "properties/property_keys.rs"]
mod property_keys;
