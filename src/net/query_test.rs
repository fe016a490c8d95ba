use super::*;

#[test]
fn push_drops_blank_values() {
    let params = QueryParams::new()
        .push("search", "")
        .push("ordering", "   ")
        .push("customer_type", "partner");
    assert_eq!(params.pairs(), &[("customer_type".to_owned(), "partner".to_owned())]);
}

#[test]
fn push_opt_skips_none_and_trims_values() {
    let params = QueryParams::new()
        .push_opt::<u32>("page", None)
        .push_opt("search", Some(" jane "));
    assert_eq!(params.get("search"), Some("jane"));
    assert_eq!(params.get("page"), None);
}

#[test]
fn list_query_renders_only_set_fields() {
    let mut filters = BTreeMap::new();
    filters.insert("send_status".to_owned(), "send".to_owned());
    filters.insert("company".to_owned(), String::new());
    let query = ListQuery {
        search: Some("doe".to_owned()),
        ordering: None,
        page: PageRequest { page: Some(2), page_size: None },
        filters,
    };

    let params = query.to_query();
    assert_eq!(params.get("search"), Some("doe"));
    assert_eq!(params.get("send_status"), Some("send"));
    assert_eq!(params.get("page"), Some("2"));
    assert_eq!(params.get("company"), None);
    assert_eq!(params.get("ordering"), None);
    assert_eq!(params.pairs().len(), 3);
}

#[test]
fn default_list_query_is_empty() {
    assert!(ListQuery::default().to_query().is_empty());
}
