//! Property tests for flat key helpers.

use proptest::prelude::*;

use capconf::domain::value_objects::property_key::{
    full_key, leaf_name, parent_path, property_of, segment_prefixes, split_list,
};

fn segment() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-z0-9_\\-]{1,8}").unwrap()
}

fn path() -> impl Strategy<Value = String> {
    proptest::collection::vec(segment(), 1..=5).prop_map(|s| s.join("."))
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 96,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A property key built from a path resolves back to its property.
    #[test]
    fn property_full_key_inverts_property_of(queue in path(), property in segment()) {
        let key = full_key(&queue, &property);
        prop_assert_eq!(property_of(&key, &queue), Some(property.as_str()));
        prop_assert_eq!(parent_path(&key), Some(queue.as_str()));
        prop_assert_eq!(leaf_name(&key), property.as_str());
    }

    /// PROPERTY: Sibling names sharing a textual prefix never match each other.
    #[test]
    fn property_matching_respects_segment_boundaries(
        queue in path(),
        suffix in segment(),
        property in segment(),
    ) {
        let sibling = format!("{}{}", queue, suffix);
        let key = full_key(&sibling, &property);
        prop_assert_eq!(property_of(&key, &queue), None);
    }

    /// PROPERTY: Segment prefixes come longest first and are all real prefixes.
    #[test]
    fn property_segment_prefixes_longest_first(key in path()) {
        let prefixes: Vec<&str> = segment_prefixes(&key).collect();
        prop_assert_eq!(prefixes.len(), key.matches('.').count());
        for pair in prefixes.windows(2) {
            prop_assert!(pair[0].len() > pair[1].len());
        }
        for prefix in prefixes {
            let dotted = format!("{}.", prefix);
            prop_assert!(key.starts_with(&dotted));
        }
    }

    /// PROPERTY: List splitting drops blanks and trims every entry.
    #[test]
    fn property_split_list_trims(entries in proptest::collection::vec(segment(), 0..=6)) {
        let padded = entries
            .iter()
            .map(|e| format!("  {} ", e))
            .collect::<Vec<_>>()
            .join(", ,");
        prop_assert_eq!(split_list(&padded), entries);
    }
}
