use super::*;

#[test]
fn fact_records_use_pascal_case_keys() {
    let facts: Vec<FactRecord> =
        parse_records(r#"[{"FactNum": 3, "Fact": "Cats can't taste sweet. True!"}]"#).unwrap();
    assert_eq!(facts.len(), 1);
    assert_eq!(facts[0].fact_num, 3);
    assert_eq!(facts[0].fact, "Cats can't taste sweet. True!");
}

#[test]
fn review_records_accept_fractional_hours() {
    let json = r#"[{
        "GameNum": 2, "ReviewNum": 5, "Username": "steamy",
        "Hours": 1234.5, "Review": "Good.\nVery good."
    }]"#;
    let reviews: Vec<ReviewRecord> = parse_records(json).unwrap();
    assert_eq!(reviews[0].game_num, 2);
    assert_eq!(reviews[0].review_num, 5);
    assert_eq!(reviews[0].hours, 1234.5);
}

#[test]
fn missing_fields_are_data_errors() {
    let err = parse_records::<FactRecord>(r#"[{"FactNum": 1}]"#).unwrap_err();
    assert!(matches!(err, PocketError::Data(_)));
}

#[test]
fn missing_file_is_reported_with_its_path() {
    let err = read_records::<FactRecord>(Path::new("target/no-such-dir/data.json")).unwrap_err();
    assert!(format!("{err:#}").contains("data.json"));
}

#[test]
fn hours_format_like_en_us() {
    assert_eq!(format_hours(0.0), "0");
    assert_eq!(format_hours(12.0), "12");
    assert_eq!(format_hours(999.0), "999");
    assert_eq!(format_hours(1000.0), "1,000");
    assert_eq!(format_hours(1234.5), "1,234.5");
    assert_eq!(format_hours(1234567.891), "1,234,567.891");
    assert_eq!(format_hours(2.0004), "2");
    assert_eq!(format_hours(-4500.25), "-4,500.25");
}
