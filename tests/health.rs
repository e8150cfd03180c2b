mod common;

use axum::extract::State;
use custom_shop::routes::health::health_check;

#[tokio::test]
async fn health_check_reports_unreachable_database() {
    let config = common::test_config(&["*"]);
    let state = common::lazy_state(&config);

    let response = health_check(State(state)).await;
    assert_eq!(response.0.message, "Health check");

    let data = response.0.data.expect("health data");
    assert_eq!(data.status, "ok");
    assert_eq!(data.database, "unavailable");
}
