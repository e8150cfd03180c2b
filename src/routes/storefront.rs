use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Redirect, Response},
    routing::get,
};
use chrono::NaiveDate;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    dto::catalog::{CatalogPage, Confirmation, HomePage, OrderFormContext, Tracking},
    error::AppResult,
    models::Product,
    response::ApiResponse,
    routes::{
        form::MultipartForm,
        params::{CatalogQuery, ConfirmationQuery, OrderFormQuery},
    },
    services::storefront_service::{self, OrderSubmission, REFERENCE_IMAGE_FIELDS},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/catalog", get(catalog))
        .route("/product/{id}", get(product_detail))
        .route("/order/new", get(order_form).post(submit_order))
        .route("/order/confirmation", get(confirmation))
        .route("/track/{token}", get(track))
}

/// Multipart body of `POST /order/new`.
#[derive(ToSchema)]
pub struct OrderSubmissionForm {
    pub client_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub social_handle: Option<String>,
    pub product_id: Option<Uuid>,
    pub design_description: String,
    pub required_by: Option<NaiveDate>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub reference_image_1: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub reference_image_2: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub reference_image_3: Option<Vec<u8>>,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Featured products and categories", body = ApiResponse<HomePage>)
    ),
    tag = "Storefront"
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<ApiResponse<HomePage>>> {
    let resp = storefront_service::home(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "Active products, 12 per page", body = ApiResponse<CatalogPage>)
    ),
    tag = "Storefront"
)]
pub async fn catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogPage>>> {
    let resp = storefront_service::catalog(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/product/{id}",
    params(("id" = String, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Active product", body = ApiResponse<Product>),
        (status = 404, description = "Unknown or inactive product")
    ),
    tag = "Storefront"
)]
pub async fn product_detail(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = storefront_service::product_detail(&state, &id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/order/new",
    params(OrderFormQuery),
    responses(
        (status = 200, description = "Order form context", body = ApiResponse<OrderFormContext>)
    ),
    tag = "Storefront"
)]
pub async fn order_form(
    State(state): State<AppState>,
    Query(query): Query<OrderFormQuery>,
) -> AppResult<Json<ApiResponse<OrderFormContext>>> {
    let resp = storefront_service::order_form(&state, query.producto.as_deref()).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/order/new",
    request_body(content = OrderSubmissionForm, content_type = "multipart/form-data"),
    responses(
        (status = 303, description = "Redirect to the confirmation page"),
        (status = 422, description = "Validation errors per field")
    ),
    tag = "Storefront"
)]
pub async fn submit_order(
    State(state): State<AppState>,
    multipart: Multipart,
) -> AppResult<Redirect> {
    let mut form = MultipartForm::read(multipart).await?;

    let mut images = Vec::new();
    for field in REFERENCE_IMAGE_FIELDS {
        if let Some(upload) = form.take_file(field) {
            images.push(upload);
        }
    }
    // Repeated or unknown file parts go to validation, which rejects them.
    images.append(&mut form.files);

    let submission = OrderSubmission {
        client_name: form.take("client_name"),
        email: form.take("email"),
        phone: form.take("phone"),
        social_handle: form.take("social_handle"),
        product_id: form.take("product_id"),
        design_description: form.take("design_description"),
        required_by: form.take("required_by"),
        images,
    };

    let ticket = storefront_service::submit_order(&state, submission).await?;
    Ok(Redirect::to(&format!(
        "/order/confirmation?ticket={ticket}"
    )))
}

#[utoipa::path(
    get,
    path = "/order/confirmation",
    params(ConfirmationQuery),
    responses(
        (status = 200, description = "The order just submitted", body = ApiResponse<Confirmation>),
        (status = 303, description = "Ticket missing, expired or already used: redirect to /")
    ),
    tag = "Storefront"
)]
pub async fn confirmation(
    State(state): State<AppState>,
    Query(query): Query<ConfirmationQuery>,
) -> AppResult<Response> {
    let resp = storefront_service::confirmation(&state, query.ticket.as_deref()).await?;
    Ok(match resp {
        Some(resp) => Json(resp).into_response(),
        None => Redirect::to("/").into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/track/{token}",
    params(("token" = String, Path, description = "Tracking token")),
    responses(
        (status = 200, description = "Order status", body = ApiResponse<Tracking>),
        (status = 404, description = "No order with this exact token")
    ),
    tag = "Storefront"
)]
pub async fn track(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> AppResult<Json<ApiResponse<Tracking>>> {
    let resp = storefront_service::track(&state, &token).await?;
    Ok(Json(resp))
}
