// Rust guideline compliant 2026-10-16

//! Property-based tests for filter and query construction.

use proptest::prelude::*;
use sen2_core::{
    build_predicate, combine, compose_query, FilterExpression, FilterInput, FilterRequirement,
    FilterValue,
};

proptest! {
    /// Integer lists render as one `in` predicate with bare numbers.
    #[test]
    fn prop_int_values_unquoted(values in prop::collection::vec(any::<i64>(), 1..20)) {
        let predicate = build_predicate("id", values.clone()).unwrap().unwrap();
        prop_assert_eq!(predicate.op(), "in");
        let json = predicate.to_json();
        let rendered: Vec<i64> = json["val"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_i64().unwrap())
            .collect();
        prop_assert_eq!(rendered, values);
    }

    /// String lists render each value individually quoted.
    #[test]
    fn prop_string_values_quoted(values in prop::collection::vec("[A-Za-z0-9_]{1,12}", 1..10)) {
        let predicate = build_predicate("status", values.clone()).unwrap().unwrap();
        let text = predicate.to_string();
        for value in &values {
            let quoted = format!("\"{}\"", value);
            prop_assert!(text.contains(&quoted));
        }
        prop_assert_eq!(predicate.values().len(), values.len());
    }

    /// Combining keeps predicates in input order and drops absent ones.
    #[test]
    fn prop_combine_preserves_order(ids in prop::collection::vec(1i64..100_000, 0..5)) {
        let predicates = vec![
            build_predicate("id", ids.clone()).unwrap(),
            build_predicate("factbase_id", FilterInput::Absent).unwrap(),
            build_predicate("status", vec!["FAILED"]).unwrap(),
        ];
        let expression = combine(predicates, FilterRequirement::Optional).unwrap();
        let names: Vec<&str> = expression.predicates().iter().map(|p| p.name()).collect();
        if ids.is_empty() {
            prop_assert_eq!(names, vec!["status"]);
        } else {
            prop_assert_eq!(names, vec!["id", "status"]);
        }
    }

    /// `page[size]` is always emitted when set; `page[number]` only when positive.
    #[test]
    fn prop_page_params(size in prop::option::of(1u32..500), number in prop::option::of(-5i64..5)) {
        let query = compose_query(FilterExpression::match_all(), None, None, size, number);
        let params = query.params();
        let has_size = params.iter().any(|p| p.key() == Some("page[size]"));
        let has_number = params.iter().any(|p| p.key() == Some("page[number]"));
        prop_assert_eq!(has_size, size.is_some());
        prop_assert_eq!(has_number, number.is_some_and(|n| n > 0));
        prop_assert_eq!(query.follows_continuations(), !has_number);
    }
}

#[test]
fn test_empty_and_absent_inputs_are_equivalent() {
    assert_eq!(build_predicate("id", FilterInput::Absent).unwrap(), None);
    assert_eq!(build_predicate("id", FilterInput::Many(vec![])).unwrap(), None);
}

#[test]
fn test_required_filter_refuses_empty_set() {
    let error = combine(vec![None], FilterRequirement::Required).unwrap_err();
    assert!(matches!(error, sen2_core::Error::Validation(_)));
}

#[test]
fn test_heterogeneous_list_rejected() {
    let input = FilterInput::Many(vec![FilterValue::from("a"), FilterValue::Int(1)]);
    assert!(build_predicate("id", input).is_err());
}
