//! Property-based tests for priority conversion

use proptest::prelude::*;
use todoist_cli::api::{format_priority, parse_priority};

proptest! {
    /// Formatting a parsed priority and parsing it again is stable
    #[test]
    fn parse_format_round_trip(n in 1u8..=4) {
        let api = parse_priority(&n.to_string()).unwrap();
        prop_assert_eq!(parse_priority(format_priority(api)), Ok(api));
    }

    /// User priority n always maps to API value 5 - n
    #[test]
    fn parse_inverts(n in 1u8..=4, prefixed in any::<bool>()) {
        let input = if prefixed { format!("p{n}") } else { n.to_string() };
        prop_assert_eq!(parse_priority(&input), Ok(5 - n));
    }

    /// Anything outside 1-4 is rejected
    #[test]
    fn out_of_range_rejected(n in 5u32..1000) {
        prop_assert!(parse_priority(&n.to_string()).is_err());
    }
}

#[test]
fn format_labels_urgent_first() {
    assert_eq!(format_priority(4), "P1");
    assert_eq!(format_priority(3), "P2");
    assert_eq!(format_priority(2), "P3");
    assert_eq!(format_priority(1), "P4");
}

#[test]
fn error_names_accepted_range() {
    let err = parse_priority("urgent").unwrap_err();
    assert_eq!(err.to_string(), "priority must be 1-4 (1=urgent, 4=normal): urgent");
}
