use super::*;

#[test]
fn labels_known_ids() {
    let tables = LookupTables::from_json(r#"{"categories": {"0": "New Year", "3": "Spring"}, "types": {"1": "Newsletter"}}"#).unwrap();
    assert_eq!(tables.category(3), "Spring");
    assert_eq!(tables.email_type(1), "Newsletter");
}

#[test]
fn unknown_ids_render_with_hash() {
    let tables = LookupTables::default();
    assert!(tables.is_empty());
    assert_eq!(tables.category(7), "#7");
    assert_eq!(tables.ecard_category(12), "#12");
    assert_eq!(tables.email_type_opt(None), "-");
}

#[test]
fn missing_sections_default_empty() {
    let tables = LookupTables::from_json(r#"{"ecard_categories": {"10": "Thanksgiving"}}"#).unwrap();
    assert_eq!(tables.ecard_category(10), "Thanksgiving");
    assert_eq!(tables.category_opt(Some(0)), "#0");
}

#[test]
fn non_numeric_id_is_rejected() {
    let err = LookupTables::from_json(r#"{"types": {"one": "Newsletter"}}"#).unwrap_err();
    assert!(matches!(err, LookupError::BadId(id) if id == "one"));
}

#[test]
fn load_reads_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("lookup.json");
    std::fs::write(&path, r#"{"categories": {"2": "Holiday"}}"#).unwrap();
    assert_eq!(LookupTables::load(&path).unwrap().category(2), "Holiday");

    let missing = LookupTables::load(&dir.path().join("nope.json")).unwrap_err();
    assert!(matches!(missing, LookupError::Io { .. }));
}
