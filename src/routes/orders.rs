use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::orders::{OrderDetail, OrderList},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::{OrderFilterQuery, OrderListQuery},
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/filter", get(filter_orders))
        .route("/{id}", get(get_order))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20"),
        ("sort_order" = Option<String>, Query, description = "Sort order on creation time: asc, desc (default)")
    ),
    responses(
        (status = 200, description = "List orders, newest first", body = ApiResponse<OrderList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<OrderListQuery>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let resp = order_service::list_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/filter",
    params(
        ("date_from" = Option<String>, Query, description = "Created on or after, YYYY-MM-DD (UTC)"),
        ("date_to" = Option<String>, Query, description = "Created on or before, YYYY-MM-DD (UTC)"),
        ("status" = Option<String>, Query, description = "Comma separated statuses; may be repeated"),
        ("platform" = Option<String>, Query, description = "Order platform"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Filtered orders", body = ApiResponse<OrderList>),
        (status = 400, description = "Invalid filter value")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn filter_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pairs): Query<Vec<(String, String)>>,
) -> AppResult<Json<ApiResponse<OrderList>>> {
    let query = OrderFilterQuery::from_pairs(&pairs)?;
    let resp = order_service::filter_orders(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order with its reference images", body = ApiResponse<OrderDetail>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn get_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::get_order(&state, &user, id).await?;
    Ok(Json(resp))
}
