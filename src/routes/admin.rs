//! Staff back-office: change lists, change forms, inline edits and bulk
//! actions for categories, products, supplies and orders.

use axum::{
    Json, Router,
    extract::{Multipart, Path, Query, State},
    routing::{delete, get, patch, post, put},
};
use serde_json::{Map, Value};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    admin::ChangeListQuery,
    dto::{
        admin::{
            AdminIndex, BulkActionResult, CategoryDeleted, CategoryRequest, CategoryRow,
            ChangeList, CreateProductRequest, OrderBulkRequest, OrderRow, ProductRow,
            SupplyBulkRequest, SupplyRow, UpdateProductRequest,
        },
        orders::{CreateOrderRequest, OrderDetail, UpdateOrderRequest},
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Category, Order, Product, ReferenceImage, Supply},
    response::ApiResponse,
    routes::form::MultipartForm,
    services::{admin_service, order_service, supply_service},
    state::AppState,
};

type Pairs = Query<Vec<(String, String)>>;
type Patch = Json<Map<String, Value>>;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(index))
        .route("/categories", get(category_changelist).post(create_category))
        .route(
            "/categories/{id}",
            put(update_category)
                .patch(inline_edit_category)
                .delete(delete_category),
        )
        .route("/products", get(product_changelist).post(create_product))
        .route(
            "/products/{id}",
            put(update_product)
                .patch(inline_edit_product)
                .delete(delete_product),
        )
        .route("/products/{id}/images", post(upload_product_images))
        .route("/supplies", get(supply_changelist))
        .route("/supplies/actions", post(supply_bulk_action))
        .route("/supplies/{id}", patch(inline_edit_supply))
        .route("/orders", get(order_changelist).post(create_order))
        .route("/orders/actions", post(order_bulk_action))
        .route(
            "/orders/{id}",
            put(update_order)
                .patch(inline_edit_order)
                .delete(delete_order),
        )
        .route("/orders/{id}/images", post(add_reference_image))
        .route("/images/{id}", delete(delete_reference_image))
}

/// Multipart body of `POST /admin/products/{id}/images`.
#[derive(ToSchema)]
pub struct ProductImagesForm {
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_1: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_2: Option<Vec<u8>>,
    #[schema(value_type = Option<String>, format = Binary)]
    pub image_3: Option<Vec<u8>>,
}

/// Multipart body of `POST /admin/orders/{id}/images`.
#[derive(ToSchema)]
pub struct ReferenceImageForm {
    #[schema(value_type = String, format = Binary)]
    pub image: Vec<u8>,
    pub caption: Option<String>,
}

#[utoipa::path(
    get,
    path = "/admin",
    responses(
        (status = 200, description = "Site titles and registered models", body = ApiResponse<AdminIndex>),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Forbidden")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn index(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<AdminIndex>>> {
    let resp = admin_service::index(&state, &user).await?;
    Ok(Json(resp))
}

// ---- categories ----

#[utoipa::path(
    get,
    path = "/admin/categories",
    params(
        ("q" = Option<String>, Query, description = "Search by name"),
        ("o" = Option<String>, Query, description = "Sort field, prefix with - for descending"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Category change list", body = ApiResponse<ChangeList<CategoryRow>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn category_changelist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pairs): Pairs,
) -> AppResult<Json<ApiResponse<ChangeList<CategoryRow>>>> {
    let query = ChangeListQuery::from_pairs(pairs)?;
    let resp = admin_service::category_changelist(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/categories",
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Create category", body = ApiResponse<Category>),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_category(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = admin_service::create_category(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = CategoryRequest,
    responses(
        (status = 200, description = "Update category", body = ApiResponse<Category>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<CategoryRequest>,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = admin_service::update_category(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    request_body = Object,
    responses(
        (status = 400, description = "Categories have no inline-editable fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn inline_edit_category(
    user: AuthUser,
    Path(_id): Path<Uuid>,
    Json(patch): Patch,
) -> AppResult<Json<ApiResponse<Category>>> {
    let resp = admin_service::inline_edit_category(&user, patch).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/categories/{id}",
    params(("id" = Uuid, Path, description = "Category ID")),
    responses(
        (status = 200, description = "Category and its products deleted", body = ApiResponse<CategoryDeleted>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_category(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<CategoryDeleted>>> {
    let resp = admin_service::delete_category(&state, &user, id).await?;
    Ok(Json(resp))
}

// ---- products ----

#[utoipa::path(
    get,
    path = "/admin/products",
    params(
        ("q" = Option<String>, Query, description = "Search by name or description"),
        ("category" = Option<Uuid>, Query, description = "Filter by category"),
        ("active" = Option<bool>, Query, description = "Filter by active flag"),
        ("o" = Option<String>, Query, description = "Sort field, prefix with - for descending"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Product change list", body = ApiResponse<ChangeList<ProductRow>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn product_changelist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pairs): Pairs,
) -> AppResult<Json<ApiResponse<ChangeList<ProductRow>>>> {
    let query = ChangeListQuery::from_pairs(pairs)?;
    let resp = admin_service::product_changelist(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/products",
    request_body = CreateProductRequest,
    responses(
        (status = 200, description = "Create product", body = ApiResponse<Product>),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_product(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::create_product(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Update product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateProductRequest>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::update_product(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = Object, description = "Any of: base_price, active"),
    responses(
        (status = 200, description = "Inline edit", body = ApiResponse<Product>),
        (status = 400, description = "Field not editable from the list")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn inline_edit_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Patch,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::inline_edit_product(&state, &user, id, patch).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/products/{id}/images",
    params(("id" = Uuid, Path, description = "Product ID")),
    request_body(content = ProductImagesForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product with replaced images", body = ApiResponse<Product>),
        (status = 422, description = "Invalid image")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn upload_product_images(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<Product>>> {
    let form = MultipartForm::read(multipart).await?;
    let resp = admin_service::upload_product_images(&state, &user, id, form.files).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/products/{id}",
    params(("id" = Uuid, Path, description = "Product ID")),
    responses(
        (status = 200, description = "Delete product", body = ApiResponse<Product>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_product(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Product>>> {
    let resp = admin_service::delete_product(&state, &user, id).await?;
    Ok(Json(resp))
}

// ---- supplies ----

#[utoipa::path(
    get,
    path = "/admin/supplies",
    params(
        ("q" = Option<String>, Query, description = "Search by name or brand"),
        ("supply_type" = Option<String>, Query, description = "Filter by supply type"),
        ("unit" = Option<String>, Query, description = "Filter by unit"),
        ("active" = Option<bool>, Query, description = "Filter by active flag"),
        ("o" = Option<String>, Query, description = "Sort field, prefix with - for descending"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Supply change list with stock badges", body = ApiResponse<ChangeList<SupplyRow>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn supply_changelist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pairs): Pairs,
) -> AppResult<Json<ApiResponse<ChangeList<SupplyRow>>>> {
    let query = ChangeListQuery::from_pairs(pairs)?;
    let resp = admin_service::supply_changelist(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/supplies/{id}",
    params(("id" = Uuid, Path, description = "Supply ID")),
    request_body(content = Object, description = "Any of: quantity_on_hand, minimum_quantity, brand"),
    responses(
        (status = 200, description = "Inline edit", body = ApiResponse<Supply>),
        (status = 400, description = "Field not editable from the list")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn inline_edit_supply(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Patch,
) -> AppResult<Json<ApiResponse<Supply>>> {
    let resp = supply_service::inline_edit_supply(&state, &user, id, patch).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/supplies/actions",
    request_body = SupplyBulkRequest,
    responses(
        (status = 200, description = "Bulk action applied", body = ApiResponse<BulkActionResult>),
        (status = 400, description = "No supplies selected")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn supply_bulk_action(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<SupplyBulkRequest>,
) -> AppResult<Json<ApiResponse<BulkActionResult>>> {
    let resp = supply_service::bulk_action(&state, &user, payload).await?;
    Ok(Json(resp))
}

// ---- orders ----

#[utoipa::path(
    get,
    path = "/admin/orders",
    params(
        ("q" = Option<String>, Query, description = "Search by client, email, phone, token or design description"),
        ("status" = Option<String>, Query, description = "Filter by status"),
        ("payment_status" = Option<String>, Query, description = "Filter by payment status"),
        ("platform" = Option<String>, Query, description = "Filter by platform"),
        ("product" = Option<Uuid>, Query, description = "Filter by product"),
        ("created_from" = Option<String>, Query, description = "Created on or after, YYYY-MM-DD"),
        ("created_to" = Option<String>, Query, description = "Created on or before, YYYY-MM-DD"),
        ("o" = Option<String>, Query, description = "Sort field, prefix with - for descending"),
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Order change list with badges", body = ApiResponse<ChangeList<OrderRow>>)
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn order_changelist(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pairs): Pairs,
) -> AppResult<Json<ApiResponse<ChangeList<OrderRow>>>> {
    let query = ChangeListQuery::from_pairs(pairs)?;
    let resp = admin_service::order_changelist(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/orders",
    request_body = CreateOrderRequest,
    responses(
        (status = 200, description = "Create order on behalf of a client", body = ApiResponse<OrderDetail>),
        (status = 422, description = "Validation errors")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_order(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CreateOrderRequest>,
) -> AppResult<Json<ApiResponse<OrderDetail>>> {
    let resp = order_service::create_order_admin(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body = UpdateOrderRequest,
    responses(
        (status = 200, description = "Update order", body = ApiResponse<Order>),
        (status = 404, description = "Not Found"),
        (status = 409, description = "Status change not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrderRequest>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::update_order(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    patch,
    path = "/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body(content = Object, description = "Any of: status, payment_status"),
    responses(
        (status = 200, description = "Inline edit", body = ApiResponse<Order>),
        (status = 400, description = "Field not editable from the list"),
        (status = 409, description = "Status change not allowed")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn inline_edit_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Patch,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::inline_edit_order(&state, &user, id, patch).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/orders/{id}",
    params(("id" = Uuid, Path, description = "Order ID")),
    responses(
        (status = 200, description = "Order and its reference images deleted", body = ApiResponse<Order>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_order(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<Order>>> {
    let resp = order_service::delete_order(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/orders/actions",
    request_body = OrderBulkRequest,
    responses(
        (status = 200, description = "Bulk action applied", body = ApiResponse<BulkActionResult>),
        (status = 400, description = "No orders selected")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn order_bulk_action(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<OrderBulkRequest>,
) -> AppResult<Json<ApiResponse<BulkActionResult>>> {
    let resp = order_service::bulk_action(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/orders/{id}/images",
    params(("id" = Uuid, Path, description = "Order ID")),
    request_body(content = ReferenceImageForm, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Reference image attached", body = ApiResponse<ReferenceImage>),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Invalid image")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn add_reference_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
    multipart: Multipart,
) -> AppResult<Json<ApiResponse<ReferenceImage>>> {
    let mut form = MultipartForm::read(multipart).await?;
    let upload = form.take_file("image");
    let caption = form.fields.remove("caption");
    let resp = order_service::add_reference_image(&state, &user, id, upload, caption).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/admin/images/{id}",
    params(("id" = Uuid, Path, description = "Reference image ID")),
    responses(
        (status = 200, description = "Reference image deleted", body = ApiResponse<ReferenceImage>),
        (status = 404, description = "Not Found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_reference_image(
    State(state): State<AppState>,
    user: AuthUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<ApiResponse<ReferenceImage>>> {
    let resp = order_service::delete_reference_image(&state, &user, id).await?;
    Ok(Json(resp))
}
