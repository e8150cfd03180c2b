use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::supplies::{SupplyList, SupplyRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Supply,
    response::ApiResponse,
    routes::params::SupplyListQuery,
    services::supply_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_supplies).post(create_supply))
        .route(
            "/{id}",
            get(get_supply).put(update_supply).delete(delete_supply),
        )
}

#[utoipa::path(
    get,
    path = "/api/supplies",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20, max 100"),
        ("needs_replenishment" = Option<bool>, Query, description = "Only supplies at or below their minimum (true) or above it (false)")
    ),
    responses(
        (status = 200, description = "List supplies", body = ApiResponse<SupplyList>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplies"
)]
pub async fn list_supplies(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<SupplyListQuery>,
) -> AppResult<Json<ApiResponse<SupplyList>>> {
    let resp = supply_service::list_supplies(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/supplies",
    request_body = SupplyRequest,
    responses(
        (status = 200, description = "Create supply", body = ApiResponse<Supply>),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplies"
)]
pub async fn create_supply(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SupplyRequest>,
) -> AppResult<Json<ApiResponse<Supply>>> {
    let resp = supply_service::create_supply(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/supplies/{id}",
    params(("id" = Uuid, Path, description = "Supply ID")),
    responses(
        (status = 200, description = "Get supply", body = ApiResponse<Supply>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplies"
)]
pub async fn get_supply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supply>>> {
    let resp = supply_service::get_supply(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/supplies/{id}",
    params(("id" = Uuid, Path, description = "Supply ID")),
    request_body = SupplyRequest,
    responses(
        (status = 200, description = "Replace supply", body = ApiResponse<Supply>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplies"
)]
pub async fn update_supply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<SupplyRequest>,
) -> AppResult<Json<ApiResponse<Supply>>> {
    let resp = supply_service::update_supply(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/supplies/{id}",
    params(("id" = Uuid, Path, description = "Supply ID")),
    responses(
        (status = 200, description = "Delete supply", body = ApiResponse<Supply>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Supplies"
)]
pub async fn delete_supply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Supply>>> {
    let resp = supply_service::delete_supply(&state, &user, id).await?;
    Ok(Json(resp))
}
