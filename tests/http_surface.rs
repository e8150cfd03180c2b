mod common;

use axum::{
    body::Body,
    http::{Request, StatusCode, header},
};
use custom_shop::routes::build_router;
use tower::ServiceExt;

fn app(allowed_hosts: &[&str]) -> axum::Router {
    let config = common::test_config(allowed_hosts);
    build_router(common::lazy_state(&config), &config)
}

fn get(uri: &str, host: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .header(header::HOST, host)
        .body(Body::empty())
        .expect("request")
}

#[tokio::test]
async fn unknown_host_is_rejected() {
    let response = app(&["shop.example.com"])
        .oneshot(get("/order/confirmation", "evil.example.org"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn allowed_host_with_port_is_served() {
    let response = app(&["shop.example.com"])
        .oneshot(get("/no/such/page", "shop.example.com:8080"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn confirmation_without_ticket_redirects_home() {
    let response = app(&["*"])
        .oneshot(get("/order/confirmation", "localhost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn unknown_confirmation_ticket_redirects_home() {
    let response = app(&["*"])
        .oneshot(get("/order/confirmation?ticket=not-a-real-ticket", "localhost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/");
}

#[tokio::test]
async fn malformed_tracking_token_is_not_found() {
    let response = app(&["*"])
        .oneshot(get("/track/abc", "localhost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn product_detail_with_bad_id_is_not_found() {
    let response = app(&["*"])
        .oneshot(get("/product/not-a-uuid", "localhost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn staff_endpoints_require_a_token() {
    for uri in ["/api/supplies", "/api/orders", "/api/orders/filter", "/admin", "/admin/orders"] {
        let response = app(&["*"])
            .oneshot(get(uri, "localhost"))
            .await
            .expect("response");
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED, "{uri}");
    }
}

#[tokio::test]
async fn non_bearer_scheme_is_unauthorized() {
    let request = Request::builder()
        .uri("/api/supplies")
        .header(header::HOST, "localhost")
        .header(header::AUTHORIZATION, "Basic YWRtaW46YWRtaW4=")
        .body(Body::empty())
        .expect("request");
    let response = app(&["*"]).oneshot(request).await.expect("response");
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn api_docs_are_served() {
    let response = app(&["*"])
        .oneshot(get("/docs", "localhost"))
        .await
        .expect("response");
    assert_eq!(response.status(), StatusCode::OK);
}
