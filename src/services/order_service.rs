use std::collections::HashSet;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, ModelTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, SqlErr, TransactionTrait,
    ActiveValue::Set, sea_query::LockType,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    admin::{ORDER_ADMIN, model_admin::start_of_day},
    audit::record,
    dto::{
        admin::{BulkActionResult, OrderBulkRequest},
        orders::{CreateOrderRequest, OrderDetail, OrderList, UpdateOrderRequest},
    },
    entity::{
        Orders, Products, ReferenceImages,
        orders::{self, OrderStatus, PaymentStatus, Platform},
        reference_images,
    },
    error::{AppError, AppResult, FieldErrors},
    lifecycle::{
        MAX_TOKEN_ATTEMPTS, estimate_budget, generate_token, is_well_formed,
        status::ensure_transition,
    },
    media::{ImageUpload, REFERENCE_DIR, validate_image},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Order, ReferenceImage},
    response::{ApiResponse, Meta},
    routes::params::{OrderFilterQuery, OrderListQuery, SortOrder},
    services::storefront_service::{check_contact, check_length, is_plausible_email},
    state::AppState,
};

const TOKEN_CONSTRAINT: &str = "tracking_token";

/// Everything needed to insert an order except its token and timestamps.
#[derive(Debug, Clone)]
pub struct NewOrder {
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub social_handle: String,
    pub product_id: Option<Uuid>,
    pub design_description: String,
    pub required_by: Option<NaiveDate>,
    pub platform: Platform,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub approved_budget: Option<Decimal>,
    pub estimated_budget: Option<Decimal>,
    pub internal_notes: String,
}

impl Default for NewOrder {
    fn default() -> Self {
        Self {
            client_name: String::new(),
            email: String::new(),
            phone: String::new(),
            social_handle: String::new(),
            product_id: None,
            design_description: String::new(),
            required_by: None,
            platform: Platform::Website,
            status: OrderStatus::Requested,
            payment_status: PaymentStatus::Pending,
            approved_budget: None,
            estimated_budget: None,
            internal_notes: String::new(),
        }
    }
}

/// An already stored media file to attach to a new order.
#[derive(Debug, Clone)]
pub struct NewImage {
    pub path: String,
    pub caption: String,
}

pub fn reference_caption(position: usize) -> String {
    format!("Reference image {position} sent by the client")
}

fn is_token_collision(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(message)) if message.contains(TOKEN_CONSTRAINT)
    )
}

/// Insert an order and its reference images atomically.
///
/// The budget estimate is computed here when the caller did not provide
/// one, from the referenced product's base price and the number of images.
pub async fn create_order<C>(db: &C, new: NewOrder, images: &[NewImage]) -> AppResult<orders::Model>
where
    C: ConnectionTrait + TransactionTrait,
{
    create_order_with(db, new, images, generate_token).await
}

/// [`create_order`] with a caller supplied token source.
///
/// Each attempt runs in its own transaction (a savepoint when `db` is
/// itself a transaction). A unique violation on the token rolls the attempt
/// back and retries with the next token.
pub async fn create_order_with<C, F>(
    db: &C,
    new: NewOrder,
    images: &[NewImage],
    mut next_token: F,
) -> AppResult<orders::Model>
where
    C: ConnectionTrait + TransactionTrait,
    F: FnMut() -> String,
{
    let estimated_budget = match new.estimated_budget {
        Some(budget) => budget,
        None => {
            let base_price = match new.product_id {
                Some(id) => Products::find_by_id(id).one(db).await?.map(|p| p.base_price),
                None => None,
            };
            estimate_budget(base_price, &new.design_description, images.len())
        }
    };

    for attempt in 1..=MAX_TOKEN_ATTEMPTS {
        let token = next_token();
        let txn = db.begin().await?;
        let now = Utc::now();
        let active = orders::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_name: Set(new.client_name.clone()),
            email: Set(new.email.clone()),
            phone: Set(new.phone.clone()),
            social_handle: Set(new.social_handle.clone()),
            product_id: Set(new.product_id),
            design_description: Set(new.design_description.clone()),
            required_by: Set(new.required_by),
            platform: Set(new.platform),
            status: Set(new.status),
            payment_status: Set(new.payment_status),
            tracking_token: Set(token),
            created_at: Set(now.into()),
            updated_at: Set(now.into()),
            approved_budget: Set(new.approved_budget),
            estimated_budget: Set(Some(estimated_budget)),
            internal_notes: Set(new.internal_notes.clone()),
        };

        match active.insert(&txn).await {
            Ok(order) => {
                insert_images(&txn, order.id, images).await?;
                txn.commit().await?;
                tracing::info!(
                    order_id = %order.id,
                    token = %order.tracking_token,
                    images = images.len(),
                    attempt,
                    "order created"
                );
                return Ok(order);
            }
            Err(err) if is_token_collision(&err) => {
                txn.rollback().await?;
                tracing::warn!(attempt, "tracking token collision, retrying");
            }
            Err(err) => return Err(err.into()),
        }
    }

    tracing::error!(
        attempts = MAX_TOKEN_ATTEMPTS,
        "could not allocate a unique tracking token"
    );
    Err(AppError::Internal(anyhow::anyhow!(
        "could not allocate a unique tracking token after {MAX_TOKEN_ATTEMPTS} attempts"
    )))
}

async fn insert_images<C: ConnectionTrait>(
    db: &C,
    order_id: Uuid,
    images: &[NewImage],
) -> Result<Vec<reference_images::Model>, DbErr> {
    let mut saved = Vec::with_capacity(images.len());
    for image in images {
        let model = reference_images::ActiveModel {
            id: Set(Uuid::new_v4()),
            order_id: Set(order_id),
            image: Set(image.path.clone()),
            caption: Set(image.caption.clone()),
            uploaded_at: Set(Utc::now().into()),
        }
        .insert(db)
        .await?;
        saved.push(model);
    }
    Ok(saved)
}

/// Exact token lookup. Malformed tokens never reach the database.
pub async fn find_by_token<C: ConnectionTrait>(
    db: &C,
    token: &str,
) -> AppResult<Option<orders::Model>> {
    if !is_well_formed(token) {
        return Ok(None);
    }
    let order = Orders::find()
        .filter(orders::Column::TrackingToken.eq(token))
        .one(db)
        .await?;
    Ok(order)
}

pub async fn load_images<C: ConnectionTrait>(
    db: &C,
    order_id: Uuid,
) -> AppResult<Vec<reference_images::Model>> {
    let images = ReferenceImages::find()
        .filter(reference_images::Column::OrderId.eq(order_id))
        .order_by_asc(reference_images::Column::UploadedAt)
        .order_by_asc(reference_images::Column::Id)
        .all(db)
        .await?;
    Ok(images)
}

pub async fn product_name<C: ConnectionTrait>(
    db: &C,
    order: &orders::Model,
) -> AppResult<Option<String>> {
    let product = order.find_related(Products).one(db).await?;
    Ok(product.map(|p| p.name))
}

pub async fn order_detail(state: &AppState, order: orders::Model) -> AppResult<OrderDetail> {
    let images = load_images(&state.orm, order.id)
        .await?
        .into_iter()
        .map(ReferenceImage::from)
        .collect();
    let product_name = product_name(&state.orm, &order).await?;
    let tracking_url = state.tracking_url(&order.tracking_token);
    Ok(OrderDetail {
        order: Order::from(order),
        product_name,
        images,
        tracking_url,
    })
}

pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderListQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut finder = Orders::find();
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(orders::Column::CreatedAt),
        SortOrder::Desc => finder.order_by_desc(orders::Column::CreatedAt),
    };

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::paged(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

pub async fn get_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };
    let detail = order_detail(state, order).await?;
    Ok(ApiResponse::success("Order found", detail, Some(Meta::empty())))
}

pub fn filter_condition(query: &OrderFilterQuery) -> AppResult<Condition> {
    let mut condition = Condition::all();

    if let Some(from) = query.date_from {
        condition = condition.add(orders::Column::CreatedAt.gte(start_of_day(from)));
    }
    if let Some(to) = query.date_to {
        let next = to
            .succ_opt()
            .ok_or_else(|| AppError::BadRequest("date_to is out of range".into()))?;
        condition = condition.add(orders::Column::CreatedAt.lt(start_of_day(next)));
    }
    if !query.statuses.is_empty() {
        condition = condition.add(orders::Column::Status.is_in(query.statuses.iter().copied()));
    }
    if let Some(platform) = query.platform {
        condition = condition.add(orders::Column::Platform.eq(platform));
    }

    Ok(condition)
}

pub async fn filter_orders(
    state: &AppState,
    user: &AuthUser,
    query: OrderFilterQuery,
) -> AppResult<ApiResponse<OrderList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination.normalize();

    let finder = Orders::find()
        .filter(filter_condition(&query)?)
        .order_by_desc(orders::Column::CreatedAt);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let meta = Meta::paged(page, limit, total);
    Ok(ApiResponse::success("Orders", OrderList { items }, Some(meta)))
}

async fn ensure_product_exists(
    state: &AppState,
    product_id: Option<Uuid>,
    errors: &mut FieldErrors,
) -> AppResult<()> {
    if let Some(id) = product_id {
        if Products::find_by_id(id).one(&state.orm).await?.is_none() {
            errors.add("product_id", "Select a valid product.");
        }
    }
    Ok(())
}

pub async fn create_order_admin(
    state: &AppState,
    user: &AuthUser,
    payload: CreateOrderRequest,
) -> AppResult<ApiResponse<OrderDetail>> {
    ensure_admin(user)?;

    let mut errors = FieldErrors::new();
    check_contact(
        &mut errors,
        &payload.client_name,
        &payload.email,
        &payload.design_description,
    );
    check_length(&mut errors, "phone", &payload.phone, 20);
    check_length(&mut errors, "social_handle", &payload.social_handle, 100);
    ensure_product_exists(state, payload.product_id, &mut errors).await?;
    errors.into_result()?;

    let new = NewOrder {
        client_name: payload.client_name.trim().to_string(),
        email: payload.email.trim().to_string(),
        phone: payload.phone.trim().to_string(),
        social_handle: payload.social_handle.trim().to_string(),
        product_id: payload.product_id,
        design_description: payload.design_description.trim().to_string(),
        required_by: payload.required_by,
        platform: payload.platform.unwrap_or(Platform::Website),
        status: payload.status.unwrap_or(OrderStatus::Requested),
        payment_status: payload.payment_status.unwrap_or(PaymentStatus::Pending),
        approved_budget: payload.approved_budget,
        estimated_budget: payload.estimated_budget,
        internal_notes: payload.internal_notes,
    };
    let order = create_order(&state.orm, new, &[]).await?;

    record(
        &state.pool,
        user.user_id,
        "order_create",
        "orders",
        serde_json::json!({ "order_id": order.id, "token": order.tracking_token }),
    )
    .await;

    let detail = order_detail(state, order).await?;
    Ok(ApiResponse::success("Order created", detail, Some(Meta::empty())))
}

pub async fn update_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = apply_update(state, user, id, payload, "order_update").await?;
    Ok(ApiResponse::success("Order updated", Order::from(order), Some(Meta::empty())))
}

/// Inline edit from the orders change list.
pub async fn inline_edit_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    ORDER_ADMIN.ensure_editable(&patch)?;
    let payload: UpdateOrderRequest = serde_json::from_value(Value::Object(patch))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let order = apply_update(state, user, id, payload, "order_inline_edit").await?;
    Ok(ApiResponse::success("Order updated", Order::from(order), Some(Meta::empty())))
}

async fn apply_update(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateOrderRequest,
    action: &str,
) -> AppResult<orders::Model> {
    let mut errors = FieldErrors::new();
    if let Some(name) = &payload.client_name {
        if name.trim().is_empty() {
            errors.add("client_name", "This field is required.");
        }
        check_length(&mut errors, "client_name", name, 200);
    }
    if let Some(email) = &payload.email {
        if !is_plausible_email(email.trim()) {
            errors.add("email", "Enter a valid email address.");
        }
    }
    if let Some(description) = &payload.design_description {
        if description.trim().is_empty() {
            errors.add("design_description", "This field is required.");
        }
    }
    if let Some(phone) = &payload.phone {
        check_length(&mut errors, "phone", phone, 20);
    }
    if let Some(handle) = &payload.social_handle {
        check_length(&mut errors, "social_handle", handle, 100);
    }
    ensure_product_exists(state, payload.product_id.flatten(), &mut errors).await?;
    errors.into_result()?;

    let txn = state.orm.begin().await?;
    let order = Orders::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    if let Some(status) = payload.status {
        ensure_transition(order.status, status)?;
    }
    let previous_status = order.status;

    let mut active: orders::ActiveModel = order.into();
    if let Some(v) = payload.client_name {
        active.client_name = Set(v.trim().to_string());
    }
    if let Some(v) = payload.email {
        active.email = Set(v.trim().to_string());
    }
    if let Some(v) = payload.phone {
        active.phone = Set(v.trim().to_string());
    }
    if let Some(v) = payload.social_handle {
        active.social_handle = Set(v.trim().to_string());
    }
    if let Some(v) = payload.product_id {
        active.product_id = Set(v);
    }
    if let Some(v) = payload.design_description {
        active.design_description = Set(v.trim().to_string());
    }
    if let Some(v) = payload.required_by {
        active.required_by = Set(v);
    }
    if let Some(v) = payload.platform {
        active.platform = Set(v);
    }
    if let Some(v) = payload.status {
        active.status = Set(v);
    }
    if let Some(v) = payload.payment_status {
        active.payment_status = Set(v);
    }
    if let Some(v) = payload.approved_budget {
        active.approved_budget = Set(v);
    }
    if let Some(v) = payload.estimated_budget {
        active.estimated_budget = Set(v);
    }
    if let Some(v) = payload.internal_notes {
        active.internal_notes = Set(v);
    }
    active.updated_at = Set(Utc::now().into());
    let order = active.update(&txn).await?;

    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        action,
        "orders",
        serde_json::json!({
            "order_id": order.id,
            "from_status": previous_status,
            "status": order.status,
            "payment_status": order.payment_status,
        }),
    )
    .await;

    Ok(order)
}

pub async fn bulk_action(
    state: &AppState,
    user: &AuthUser,
    payload: OrderBulkRequest,
) -> AppResult<ApiResponse<BulkActionResult>> {
    ensure_admin(user)?;
    let OrderBulkRequest { action, ids } = payload;
    let ids: Vec<Uuid> = dedup(ids);
    if ids.is_empty() {
        return Err(AppError::BadRequest("No orders selected".into()));
    }

    let txn = state.orm.begin().await?;
    let selected = Orders::find()
        .filter(orders::Column::Id.is_in(ids.clone()))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let found: HashSet<Uuid> = selected.iter().map(|o| o.id).collect();
    let mut skipped: Vec<Uuid> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    let mut updated = 0;
    let now = Utc::now();

    for order in selected {
        if !action.applies_to(order.status) {
            skipped.push(order.id);
            continue;
        }
        let mut active: orders::ActiveModel = order.into();
        active.status = Set(action.target());
        if let Some(payment) = action.payment() {
            active.payment_status = Set(payment);
        }
        active.updated_at = Set(now.into());
        active.update(&txn).await?;
        updated += 1;
    }

    txn.commit().await?;

    let mut message = format!(
        "{updated} order(s) marked as {}.",
        action.target().label()
    );
    if !skipped.is_empty() {
        message.push_str(&format!(" {} skipped.", skipped.len()));
    }

    tracing::info!(action = action.name(), updated, skipped = skipped.len(), "order bulk action");
    record(
        &state.pool,
        user.user_id,
        "order_bulk_action",
        "orders",
        serde_json::json!({ "action": action.name(), "ids": ids, "updated": updated, "skipped": skipped }),
    )
    .await;

    let result = BulkActionResult {
        action: action.name().to_string(),
        updated,
        skipped,
        message,
    };
    Ok(ApiResponse::success("Bulk action applied", result, Some(Meta::empty())))
}

pub fn dedup(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

pub async fn delete_order(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Order>> {
    ensure_admin(user)?;
    let order = Orders::find_by_id(id).one(&state.orm).await?;
    let order = match order {
        Some(o) => o,
        None => return Err(AppError::NotFound),
    };

    let files: Vec<String> = load_images(&state.orm, order.id)
        .await?
        .into_iter()
        .map(|image| image.image)
        .collect();

    order.clone().delete(&state.orm).await?;
    state.media.remove_all(&files).await;

    record(
        &state.pool,
        user.user_id,
        "order_delete",
        "orders",
        serde_json::json!({ "order_id": order.id, "token": order.tracking_token }),
    )
    .await;

    Ok(ApiResponse::success("Order deleted", Order::from(order), Some(Meta::empty())))
}

pub async fn add_reference_image(
    state: &AppState,
    user: &AuthUser,
    order_id: Uuid,
    upload: Option<ImageUpload>,
    caption: Option<String>,
) -> AppResult<ApiResponse<ReferenceImage>> {
    ensure_admin(user)?;
    if Orders::find_by_id(order_id).one(&state.orm).await?.is_none() {
        return Err(AppError::NotFound);
    }

    let mut errors = FieldErrors::new();
    let caption = caption.unwrap_or_default().trim().to_string();
    check_length(&mut errors, "caption", &caption, 200);
    let ext = match &upload {
        Some(upload) => match validate_image(upload) {
            Ok(ext) => Some(ext),
            Err(message) => {
                errors.add("image", message);
                None
            }
        },
        None => {
            errors.add("image", "No file was submitted.");
            None
        }
    };
    errors.into_result()?;

    let (Some(upload), Some(ext)) = (upload, ext) else {
        return Err(AppError::BadRequest("No file was submitted".into()));
    };
    let path = state.media.save(REFERENCE_DIR, &ext, &upload.data).await?;

    let saved = reference_images::ActiveModel {
        id: Set(Uuid::new_v4()),
        order_id: Set(order_id),
        image: Set(path.clone()),
        caption: Set(caption),
        uploaded_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await;
    let image = match saved {
        Ok(image) => image,
        Err(err) => {
            state.media.remove(&path).await;
            return Err(err.into());
        }
    };

    record(
        &state.pool,
        user.user_id,
        "reference_image_add",
        "reference_images",
        serde_json::json!({ "order_id": order_id, "image_id": image.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Reference image added",
        ReferenceImage::from(image),
        Some(Meta::empty()),
    ))
}

pub async fn delete_reference_image(
    state: &AppState,
    user: &AuthUser,
    image_id: Uuid,
) -> AppResult<ApiResponse<ReferenceImage>> {
    ensure_admin(user)?;
    let image = ReferenceImages::find_by_id(image_id).one(&state.orm).await?;
    let image = match image {
        Some(i) => i,
        None => return Err(AppError::NotFound),
    };

    image.clone().delete(&state.orm).await?;
    state.media.remove(&image.image).await;

    record(
        &state.pool,
        user.user_id,
        "reference_image_delete",
        "reference_images",
        serde_json::json!({ "order_id": image.order_id, "image_id": image.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Reference image deleted",
        ReferenceImage::from(image),
        Some(Meta::empty()),
    ))
}
