//! Capacity value object
//!
//! A queue's share of the cluster is written in one of three syntaxes:
//! - `50` / `12.5` → percentage of the parent
//! - `3w` → weight relative to siblings
//! - `[memory=8192mb,vcores=4]` → absolute resource vector

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Lower bound of a valid percentage capacity.
pub const PERCENTAGE_MIN: f64 = 0.0;
/// Upper bound of a valid percentage capacity.
pub const PERCENTAGE_MAX: f64 = 100.0;
/// Allowed deviation when sibling percentages must add up to 100.
pub const CAPACITY_SUM_TOLERANCE: f64 = 0.01;

/// Capacity mode: which accounting model a capacity value belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapacityMode {
    Percentage,
    Weight,
    Absolute,
}

impl CapacityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            CapacityMode::Percentage => "percentage",
            CapacityMode::Weight => "weight",
            CapacityMode::Absolute => "absolute",
        }
    }

    /// Parse from string (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "percentage" | "percent" => Some(CapacityMode::Percentage),
            "weight" => Some(CapacityMode::Weight),
            "absolute" => Some(CapacityMode::Absolute),
            _ => None,
        }
    }
}

impl fmt::Display for CapacityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The interpreted form of a capacity string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum CapacityKind {
    Percentage { value: f64 },
    Weight { value: f64 },
    Absolute { resources: BTreeMap<String, String> },
}

/// Why a capacity string could not be classified.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CapacityParseError {
    #[error("capacity value is empty")]
    Empty,

    #[error("invalid weight '{raw}'")]
    InvalidWeight { raw: String },

    #[error("invalid percentage '{raw}'")]
    InvalidPercentage { raw: String },
}

/// A parsed capacity together with the string it came from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CapacityValue {
    raw: String,
    #[serde(flatten)]
    kind: CapacityKind,
}

impl CapacityValue {
    /// Parse a capacity string. Never fails.
    ///
    /// Unparseable input degrades to a zero percentage while keeping the
    /// raw string, so configurations the cluster would reject can still
    /// be loaded and reported on.
    pub fn parse(raw: &str) -> Self {
        Self::try_parse(raw).unwrap_or_else(|_| Self {
            raw: raw.to_string(),
            kind: CapacityKind::Percentage { value: 0.0 },
        })
    }

    /// Parse a capacity string, reporting input that had to be degraded.
    pub fn try_parse(raw: &str) -> Result<Self, CapacityParseError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CapacityParseError::Empty);
        }

        let kind = if let Some(number) = trimmed.strip_suffix('w') {
            let value = parse_finite(number).ok_or_else(|| CapacityParseError::InvalidWeight {
                raw: raw.to_string(),
            })?;
            CapacityKind::Weight { value }
        } else if let Some(inner) = trimmed
            .strip_prefix('[')
            .and_then(|rest| rest.strip_suffix(']'))
        {
            CapacityKind::Absolute {
                resources: parse_resources(inner),
            }
        } else {
            let value =
                parse_finite(trimmed).ok_or_else(|| CapacityParseError::InvalidPercentage {
                    raw: raw.to_string(),
                })?;
            CapacityKind::Percentage { value }
        };

        Ok(Self {
            raw: raw.to_string(),
            kind,
        })
    }

    pub fn percentage(value: f64) -> Self {
        Self {
            raw: format_number(value),
            kind: CapacityKind::Percentage { value },
        }
    }

    pub fn weight(value: f64) -> Self {
        Self {
            raw: format!("{}w", format_number(value)),
            kind: CapacityKind::Weight { value },
        }
    }

    pub fn absolute(resources: BTreeMap<String, String>) -> Self {
        let body = resources
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        Self {
            raw: format!("[{}]", body),
            kind: CapacityKind::Absolute { resources },
        }
    }

    /// The source string, as written in the flat configuration.
    pub fn raw(&self) -> &str {
        &self.raw
    }

    pub fn kind(&self) -> &CapacityKind {
        &self.kind
    }

    pub fn mode(&self) -> CapacityMode {
        match self.kind {
            CapacityKind::Percentage { .. } => CapacityMode::Percentage,
            CapacityKind::Weight { .. } => CapacityMode::Weight,
            CapacityKind::Absolute { .. } => CapacityMode::Absolute,
        }
    }

    /// Numeric value for percentage and weight capacities.
    pub fn numeric_value(&self) -> Option<f64> {
        match self.kind {
            CapacityKind::Percentage { value } | CapacityKind::Weight { value } => Some(value),
            CapacityKind::Absolute { .. } => None,
        }
    }

    /// Resource vector for absolute capacities.
    pub fn resources(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            CapacityKind::Absolute { resources } => Some(resources),
            _ => None,
        }
    }

    /// Percentage value, if this is a percentage capacity.
    pub fn as_percentage(&self) -> Option<f64> {
        match self.kind {
            CapacityKind::Percentage { value } => Some(value),
            _ => None,
        }
    }

    pub fn is_percentage(&self) -> bool {
        self.mode() == CapacityMode::Percentage
    }

    /// False only for a percentage outside [0, 100].
    pub fn is_within_percentage_range(&self) -> bool {
        match self.as_percentage() {
            Some(value) => (PERCENTAGE_MIN..=PERCENTAGE_MAX).contains(&value),
            None => true,
        }
    }
}

impl Default for CapacityValue {
    fn default() -> Self {
        Self::percentage(0.0)
    }
}

impl fmt::Display for CapacityValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// Sum of a sibling group's capacities, if all of them are percentages.
///
/// Returns `None` for an empty group or when any member is a weight or an
/// absolute vector, since those do not draw from the percentage pool.
pub fn percentage_sum<'a>(capacities: impl IntoIterator<Item = &'a CapacityValue>) -> Option<f64> {
    let mut sum = 0.0;
    let mut any = false;
    for capacity in capacities {
        sum += capacity.as_percentage()?;
        any = true;
    }
    any.then_some(sum)
}

/// True when `sum` is 100 within [`CAPACITY_SUM_TOLERANCE`].
pub fn sums_to_full(sum: f64) -> bool {
    (sum - PERCENTAGE_MAX).abs() <= CAPACITY_SUM_TOLERANCE
}

fn parse_finite(s: &str) -> Option<f64> {
    s.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn parse_resources(inner: &str) -> BTreeMap<String, String> {
    let mut resources = BTreeMap::new();
    for pair in inner.split(',') {
        let pair = pair.trim();
        if pair.is_empty() {
            continue;
        }
        match pair.split_once('=') {
            Some((name, value)) if !name.trim().is_empty() && !value.trim().is_empty() => {
                resources.insert(name.trim().to_string(), value.trim().to_string());
            }
            _ => {
                tracing::debug!(pair, "dropping malformed resource pair");
            }
        }
    }
    resources
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_percentage() {
        let cap = CapacityValue::parse("50");
        assert_eq!(cap.mode(), CapacityMode::Percentage);
        assert_eq!(cap.numeric_value(), Some(50.0));
        assert_eq!(cap.raw(), "50");
    }

    #[test]
    fn parses_fractional_percentage() {
        let cap = CapacityValue::parse("12.5");
        assert_eq!(cap.as_percentage(), Some(12.5));
    }

    #[test]
    fn parses_weight() {
        let cap = CapacityValue::parse("3w");
        assert_eq!(cap.mode(), CapacityMode::Weight);
        assert_eq!(cap.numeric_value(), Some(3.0));
    }

    #[test]
    fn weight_is_stored_unclamped() {
        let cap = CapacityValue::parse("-2w");
        assert_eq!(cap.mode(), CapacityMode::Weight);
        assert_eq!(cap.numeric_value(), Some(-2.0));
    }

    #[test]
    fn parses_absolute() {
        let cap = CapacityValue::parse("[memory=8192mb,vcores=4]");
        assert_eq!(cap.mode(), CapacityMode::Absolute);
        let resources = cap.resources().unwrap();
        assert_eq!(resources.get("memory").map(String::as_str), Some("8192mb"));
        assert_eq!(resources.get("vcores").map(String::as_str), Some("4"));
        assert_eq!(cap.numeric_value(), None);
    }

    #[test]
    fn absolute_drops_only_malformed_pairs() {
        let cap = CapacityValue::parse("[memory=1024, garbage, =5, vcores=]");
        let resources = cap.resources().unwrap();
        assert_eq!(resources.len(), 1);
        assert_eq!(resources.get("memory").map(String::as_str), Some("1024"));
    }

    #[test]
    fn empty_brackets_are_absolute() {
        let cap = CapacityValue::parse("[]");
        assert_eq!(cap.mode(), CapacityMode::Absolute);
        assert!(cap.resources().unwrap().is_empty());
    }

    #[test]
    fn out_of_range_percentage_is_kept() {
        let cap = CapacityValue::parse("150");
        assert_eq!(cap.as_percentage(), Some(150.0));
        assert!(!cap.is_within_percentage_range());
    }

    #[test]
    fn garbage_degrades_to_zero_percentage() {
        let cap = CapacityValue::parse("lots");
        assert_eq!(cap.mode(), CapacityMode::Percentage);
        assert_eq!(cap.numeric_value(), Some(0.0));
        assert_eq!(cap.raw(), "lots");
    }

    #[test]
    fn try_parse_reports_degradation() {
        assert_eq!(
            CapacityValue::try_parse("abcw"),
            Err(CapacityParseError::InvalidWeight {
                raw: "abcw".to_string()
            })
        );
        assert_eq!(CapacityValue::try_parse("  "), Err(CapacityParseError::Empty));
        assert!(CapacityValue::try_parse("NaN").is_err());
    }

    #[test]
    fn unclosed_bracket_is_not_absolute() {
        let cap = CapacityValue::parse("[memory=1");
        assert_eq!(cap.mode(), CapacityMode::Percentage);
        assert_eq!(cap.numeric_value(), Some(0.0));
    }

    #[test]
    fn constructors_produce_wire_syntax() {
        assert_eq!(CapacityValue::percentage(25.0).raw(), "25");
        assert_eq!(CapacityValue::percentage(12.5).raw(), "12.5");
        assert_eq!(CapacityValue::weight(2.0).raw(), "2w");

        let mut resources = BTreeMap::new();
        resources.insert("vcores".to_string(), "4".to_string());
        resources.insert("memory".to_string(), "1024".to_string());
        assert_eq!(
            CapacityValue::absolute(resources).raw(),
            "[memory=1024,vcores=4]"
        );
    }

    #[test]
    fn default_is_zero_percentage() {
        let cap = CapacityValue::default();
        assert_eq!(cap.as_percentage(), Some(0.0));
    }

    #[test]
    fn mode_parse_and_display() {
        assert_eq!(CapacityMode::parse("Weight"), Some(CapacityMode::Weight));
        assert_eq!(CapacityMode::parse("bogus"), None);
        assert_eq!(CapacityMode::Absolute.to_string(), "absolute");
    }

    #[test]
    fn percentage_sum_requires_all_percentages() {
        let caps = [CapacityValue::parse("30"), CapacityValue::parse("70")];
        assert_eq!(percentage_sum(&caps), Some(100.0));

        let mixed = [CapacityValue::parse("30"), CapacityValue::parse("2w")];
        assert_eq!(percentage_sum(&mixed), None);

        let empty: [CapacityValue; 0] = [];
        assert_eq!(percentage_sum(&empty), None);
    }

    #[test]
    fn sums_to_full_uses_tolerance() {
        assert!(sums_to_full(100.0));
        assert!(sums_to_full(99.995));
        assert!(!sums_to_full(99.9));
        assert!(!sums_to_full(90.0));
    }

    #[test]
    fn serializes_with_mode_tag() {
        let json = serde_json::to_value(CapacityValue::parse("3w")).unwrap();
        assert_eq!(json["mode"], "weight");
        assert_eq!(json["value"], 3.0);
        assert_eq!(json["raw"], "3w");
    }
}
