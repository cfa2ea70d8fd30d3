use gosterge::PageQuery;

#[test]
fn query_string_is_percent_decoded() {
    let q = PageQuery::from_query_string(
        "?fDiti=2024-01-01T00%3A00%3A00%2B03%3A00&tDiti=2024-01-08T00%3A00%3A00%2B03%3A00",
    );
    assert_eq!(
        q,
        PageQuery::with_range("2024-01-01T00:00:00+03:00", "2024-01-08T00:00:00+03:00")
    );
}

#[test]
fn first_occurrence_wins_and_unknown_keys_are_ignored() {
    let q = PageQuery::from_query_string("x=1&tDiti=a&tDiti=b");
    assert_eq!(q.from, None);
    assert_eq!(q.to.as_deref(), Some("a"));
    assert_eq!(PageQuery::from_query_string(""), PageQuery::new());
}

#[test]
fn empty_values_are_kept_for_the_parser_to_reject() {
    let q = PageQuery::from_query_string("fDiti=&tDiti=2024-01-08");
    assert_eq!(q.from.as_deref(), Some(""));
}

#[test]
fn serde_uses_the_wire_names() {
    let q: PageQuery = serde_json::from_str(r#"{"fDiti":"2024-01-01"}"#).unwrap();
    assert_eq!(q.from.as_deref(), Some("2024-01-01"));
    assert_eq!(q.to, None);
    assert_eq!(
        serde_json::to_string(&PageQuery::with_range("a", "b")).unwrap(),
        r#"{"fDiti":"a","tDiti":"b"}"#
    );
}
