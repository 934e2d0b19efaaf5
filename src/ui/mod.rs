//! Terminal presentation for the `capconf` binary.
//!
//! - `theme` - Colors, icons, borders and tree connectors
//! - `primitives/`, `widgets/`, `blocks/` - Building blocks, smallest first
//! - `views/` - Per-command rendering
//! - `json` - NDJSON event output for `--json`

pub mod blocks;
pub mod context;
pub mod error;
pub mod json;
pub mod output;
pub mod primitives;
pub mod terminal;
pub mod theme;
pub mod views;
pub mod widgets;
