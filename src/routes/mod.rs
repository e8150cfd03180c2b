use axum::{
    Json, Router,
    extract::DefaultBodyLimit,
    http::{StatusCode, Uri},
    middleware::from_fn_with_state,
    routing::get,
};
use tower_http::services::ServeDir;

use crate::{
    config::AppConfig,
    media::MEDIA_URL,
    middleware::hosts::{AllowedHosts, require_allowed_host},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub mod admin;
pub mod auth;
pub mod doc;
pub mod form;
pub mod health;
pub mod orders;
pub mod params;
pub mod storefront;
pub mod supplies;

/// Largest accepted request body: three reference images plus form fields.
pub const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/supplies", supplies::router())
        .nest("/orders", orders::router())
}

/// Every route of the application with state bound and the host guard in
/// front. Transport layers (tracing, request ids, concurrency) are added by
/// the binary.
pub fn build_router(state: AppState, config: &AppConfig) -> Router {
    let hosts = AllowedHosts::new(config.allowed_hosts.clone());

    let mut app = Router::new()
        .route("/health", get(health::health_check))
        .merge(storefront::router())
        .nest("/api", create_api_router())
        .nest("/admin", admin::router())
        .merge(doc::scalar_docs());

    if config.debug {
        app = app.nest_service(
            MEDIA_URL.trim_end_matches('/'),
            ServeDir::new(&config.media_root),
        );
    }

    app.fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(from_fn_with_state(hosts, require_allowed_host))
        .with_state(state)
}

async fn not_found(uri: Uri) -> (StatusCode, Json<ApiResponse<serde_json::Value>>) {
    let body = ApiResponse::success(
        "Not Found",
        serde_json::json!({ "path": uri.path() }),
        Some(Meta::empty()),
    );
    (StatusCode::NOT_FOUND, Json(body))
}
