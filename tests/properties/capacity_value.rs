//! Property tests for capacity string classification.

use proptest::prelude::*;

use capconf::domain::value_objects::CapacityKind;
use capconf::{CapacityMode, CapacityValue};

fn resource_name() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z][a-z\\-]{0,8}").unwrap()
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Parsing never panics and always keeps the raw string.
    #[test]
    fn property_parse_is_total(raw in "(?s).{0,64}") {
        let value = CapacityValue::parse(&raw);
        prop_assert_eq!(value.raw(), raw.as_str());
    }

    /// PROPERTY: Plain numbers are percentages with that value.
    #[test]
    fn property_numbers_are_percentages(n in 0u32..=100_000) {
        let raw = format!("{}", f64::from(n) / 1000.0);
        let value = CapacityValue::parse(&raw);
        prop_assert_eq!(value.mode(), CapacityMode::Percentage);
        prop_assert_eq!(value.as_percentage(), Some(f64::from(n) / 1000.0));
    }

    /// PROPERTY: A trailing `w` always selects weight mode.
    #[test]
    fn property_w_suffix_is_weight(n in 1u32..=10_000) {
        let value = CapacityValue::parse(&format!("{}w", n));
        prop_assert_eq!(value.mode(), CapacityMode::Weight);
        prop_assert_eq!(value.numeric_value(), Some(f64::from(n)));
    }

    /// PROPERTY: Bracketed resource vectors are absolute and keep every entry.
    #[test]
    fn property_brackets_are_absolute(
        resources in proptest::collection::btree_map(resource_name(), 1u32..=65_536, 1..=4)
    ) {
        let body = resources
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect::<Vec<_>>()
            .join(",");
        let value = CapacityValue::parse(&format!("[{}]", body));

        prop_assert_eq!(value.mode(), CapacityMode::Absolute);
        let CapacityKind::Absolute { resources: parsed } = value.kind() else {
            return Err(TestCaseError::fail("expected absolute capacity"));
        };
        prop_assert_eq!(parsed.len(), resources.len());
        for (name, amount) in &resources {
            prop_assert_eq!(parsed.get(name), Some(&amount.to_string()));
        }
    }
}
