use custom_shop::{
    admin::{CATEGORY_ADMIN, ChangeListQuery, ORDER_ADMIN, PRODUCT_ADMIN, SUPPLY_ADMIN, registered_models},
    error::AppError,
};
use sea_orm::{DbBackend, QueryTrait};
use serde_json::{Map, Value, json};

fn query(raw: &[(&str, &str)]) -> ChangeListQuery {
    ChangeListQuery::from_pairs(
        raw.iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect(),
    )
    .expect("valid query")
}

fn patch(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => panic!("object expected"),
    }
}

#[test]
fn reserved_params_are_split_from_filters() {
    let q = query(&[("q", "mug"), ("o", "-name"), ("page", "3"), ("active", "true"), ("empty", " ")]);
    assert_eq!(q.search.as_deref(), Some("mug"));
    assert_eq!(q.ordering.as_deref(), Some("-name"));
    assert_eq!(q.pagination.page, Some(3));
    assert_eq!(q.filters, vec![("active".to_string(), "true".to_string())]);
}

#[test]
fn non_numeric_page_is_rejected() {
    let result = ChangeListQuery::from_pairs(vec![("page".into(), "x".into())]);
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[test]
fn unknown_choice_is_a_bad_request() {
    let result = ORDER_ADMIN.condition(&query(&[("status", "shipped")]));
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[test]
fn malformed_uuid_filter_is_a_bad_request() {
    let result = PRODUCT_ADMIN.condition(&query(&[("category", "seven")]));
    assert!(matches!(result, Err(AppError::BadRequest(_))));
}

#[test]
fn search_and_ordering_reach_the_sql() {
    let select = ORDER_ADMIN
        .select(&query(&[("q", "ana"), ("status", "approved"), ("o", "-client_name")]))
        .expect("select");
    let sql = select.build(DbBackend::Postgres).to_string();
    assert!(sql.contains("ILIKE"), "{sql}");
    assert!(sql.contains("'approved'"), "{sql}");
    assert!(sql.contains(r#"ORDER BY "orders"."client_name" DESC"#), "{sql}");
}

#[test]
fn unsortable_field_falls_back_to_default_ordering() {
    let select = ORDER_ADMIN
        .select(&query(&[("o", "internal_notes")]))
        .expect("select");
    let sql = select.build(DbBackend::Postgres).to_string();
    assert!(sql.contains(r#"ORDER BY "orders"."created_at" DESC"#), "{sql}");
}

#[test]
fn date_range_filters_cover_whole_days() {
    let select = ORDER_ADMIN
        .select(&query(&[("created_from", "2026-03-01"), ("created_to", "2026-03-31")]))
        .expect("select");
    let sql = select.build(DbBackend::Postgres).to_string();
    assert!(sql.contains("2026-03-01 00:00:00"), "{sql}");
    assert!(sql.contains("2026-04-01 00:00:00"), "{sql}");
}

#[test]
fn inline_edits_are_limited_to_editable_columns() {
    assert!(SUPPLY_ADMIN
        .ensure_editable(&patch(json!({ "quantity_on_hand": 3, "brand": "Acme" })))
        .is_ok());
    assert!(matches!(
        SUPPLY_ADMIN.ensure_editable(&patch(json!({ "name": "Renamed" }))),
        Err(AppError::BadRequest(_))
    ));
    assert!(matches!(
        ORDER_ADMIN.ensure_editable(&Map::new()),
        Err(AppError::BadRequest(_))
    ));
    assert!(CATEGORY_ADMIN
        .ensure_editable(&patch(json!({ "name": "x" })))
        .is_err());
}

#[test]
fn registry_describes_every_model() {
    let models = registered_models();
    let names: Vec<&str> = models.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, ["orders", "products", "categories", "supplies"]);

    let orders = models.iter().find(|m| m.name == "orders").expect("orders");
    assert_eq!(orders.actions.len(), 3);
    let status = orders
        .list_filter
        .iter()
        .find(|f| f.param == "status")
        .expect("status filter");
    assert!(status.choices.contains(&"in_progress".to_string()));
    assert!(orders.search_fields.contains(&"tracking_token".to_string()));

    let supplies = models.iter().find(|m| m.name == "supplies").expect("supplies");
    assert_eq!(supplies.actions.len(), 4);
}

#[test]
fn search_wildcards_are_escaped() {
    let select = SUPPLY_ADMIN
        .select(&query(&[("q", "_")]))
        .expect("select");
    let sql = select.build(DbBackend::Postgres).to_string();
    assert!(sql.contains("ILIKE"), "{sql}");
    assert!(!sql.contains("'%_%'"), "{sql}");
}
