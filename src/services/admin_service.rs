use std::collections::HashMap;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, ModelTrait, QueryFilter, QuerySelect,
    TransactionTrait, ActiveValue::Set, sea_query::Expr,
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    admin::{
        CATEGORY_ADMIN, ChangeListQuery, ORDER_ADMIN, PRODUCT_ADMIN, SUPPLY_ADMIN,
        badges::{self, order_hint, truncate},
        registered_models,
    },
    audit::record,
    dto::admin::{
        AdminIndex, CategoryDeleted, CategoryRequest, CategoryRow, ChangeList, CreateProductRequest,
        OrderRow, ProductRow, SupplyRow, UpdateProductRequest,
    },
    entity::{Categories, Products, categories, products},
    error::{AppError, AppResult, FieldErrors},
    media::{ImageUpload, PRODUCT_DIR, media_url, validate_image},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Category, Order, Product, Supply},
    response::{ApiResponse, Meta},
    services::storefront_service::check_length,
    state::AppState,
};

pub const SHORT_DESCRIPTION_CHARS: usize = 50;

/// Multipart field names of the product image slots.
pub const PRODUCT_IMAGE_SLOTS: [&str; 3] = ["image_1", "image_2", "image_3"];

pub async fn index(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<AdminIndex>> {
    ensure_admin(user)?;
    let data = AdminIndex {
        site: state.site.as_ref().clone(),
        models: registered_models(),
    };
    Ok(ApiResponse::success("Admin", data, Some(Meta::empty())))
}

// Categories

async fn product_counts(state: &AppState, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, i64>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let counts: Vec<(Uuid, i64)> = Products::find()
        .select_only()
        .column(products::Column::CategoryId)
        .column_as(Expr::col(products::Column::Id).count(), "count")
        .filter(products::Column::CategoryId.is_in(ids))
        .group_by(products::Column::CategoryId)
        .into_tuple()
        .all(&state.orm)
        .await?;
    Ok(counts.into_iter().collect())
}

pub async fn category_changelist(
    state: &AppState,
    user: &AuthUser,
    query: ChangeListQuery,
) -> AppResult<ApiResponse<ChangeList<CategoryRow>>> {
    ensure_admin(user)?;
    let (rows, meta) = CATEGORY_ADMIN.changelist(&state.orm, &query).await?;
    let counts = product_counts(state, rows.iter().map(|c| c.id).collect()).await?;

    let items = rows
        .into_iter()
        .map(|category| CategoryRow {
            product_count: counts.get(&category.id).copied().unwrap_or(0),
            short_description: truncate(&category.description, SHORT_DESCRIPTION_CHARS),
            category: Category::from(category),
        })
        .collect();

    Ok(ApiResponse::success("Categories", ChangeList { items }, Some(meta)))
}

fn validate_category(payload: &CategoryRequest) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if payload.name.trim().is_empty() {
        errors.add("name", "This field is required.");
    }
    check_length(&mut errors, "name", &payload.name, 100);
    errors.into_result()
}

pub async fn create_category(
    state: &AppState,
    user: &AuthUser,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    validate_category(&payload)?;

    let category = categories::ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "category_create",
        "categories",
        serde_json::json!({ "category_id": category.id, "name": category.name }),
    )
    .await;

    Ok(ApiResponse::success("Category created", Category::from(category), Some(Meta::empty())))
}

pub async fn update_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CategoryRequest,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    validate_category(&payload)?;

    let existing = Categories::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let mut active: categories::ActiveModel = existing.into();
    active.name = Set(payload.name.trim().to_string());
    active.description = Set(payload.description);
    let category = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "category_update",
        "categories",
        serde_json::json!({ "category_id": category.id }),
    )
    .await;

    Ok(ApiResponse::success("Category updated", Category::from(category), Some(Meta::empty())))
}

/// Categories expose no inline-editable columns, so every patch is refused.
pub async fn inline_edit_category(
    user: &AuthUser,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Category>> {
    ensure_admin(user)?;
    CATEGORY_ADMIN.ensure_editable(&patch)?;
    Err(AppError::BadRequest("Categories cannot be edited inline".into()))
}

/// Deleting a category takes its products with it.
pub async fn delete_category(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<CategoryDeleted>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let existing = Categories::find_by_id(id).one(&txn).await?;
    let existing = match existing {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let doomed = existing.find_related(Products).all(&txn).await?;
    let files: Vec<String> = doomed
        .iter()
        .flat_map(|p| p.images().into_iter().map(str::to_string))
        .collect();
    let products_removed = doomed.len() as u64;

    existing.clone().delete(&txn).await?;
    txn.commit().await?;
    state.media.remove_all(&files).await;

    record(
        &state.pool,
        user.user_id,
        "category_delete",
        "categories",
        serde_json::json!({
            "category_id": existing.id,
            "name": existing.name,
            "products_removed": products_removed,
        }),
    )
    .await;

    let data = CategoryDeleted {
        id: existing.id,
        products_removed,
    };
    Ok(ApiResponse::success("Category deleted", data, Some(Meta::empty())))
}

// Products

async fn category_names(state: &AppState, ids: Vec<Uuid>) -> AppResult<HashMap<Uuid, String>> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }
    let names = Categories::find()
        .filter(categories::Column::Id.is_in(ids))
        .all(&state.orm)
        .await?
        .into_iter()
        .map(|c| (c.id, c.name))
        .collect();
    Ok(names)
}

pub async fn product_changelist(
    state: &AppState,
    user: &AuthUser,
    query: ChangeListQuery,
) -> AppResult<ApiResponse<ChangeList<ProductRow>>> {
    ensure_admin(user)?;
    let (rows, meta) = PRODUCT_ADMIN.changelist(&state.orm, &query).await?;
    let names = category_names(state, rows.iter().map(|p| p.category_id).collect()).await?;

    let items = rows
        .into_iter()
        .map(|product| {
            let image_preview = product.image_1.as_deref().map(media_url);
            let category_name = names.get(&product.category_id).cloned();
            ProductRow {
                product: Product::with_category(product, category_name),
                image_preview,
            }
        })
        .collect();

    Ok(ApiResponse::success("Products", ChangeList { items }, Some(meta)))
}

async fn check_product(
    state: &AppState,
    errors: &mut FieldErrors,
    name: Option<&str>,
    base_price: Option<Decimal>,
    category_id: Option<Uuid>,
) -> AppResult<()> {
    if let Some(name) = name {
        if name.trim().is_empty() {
            errors.add("name", "This field is required.");
        }
        check_length(errors, "name", name, 200);
    }
    if base_price.is_some_and(|p| p < Decimal::ZERO) {
        errors.add("base_price", "Ensure this value is greater than or equal to 0.");
    }
    if let Some(id) = category_id {
        if Categories::find_by_id(id).one(&state.orm).await?.is_none() {
            errors.add("category_id", "Select a valid category.");
        }
    }
    Ok(())
}

pub async fn create_product(
    state: &AppState,
    user: &AuthUser,
    payload: CreateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let mut errors = FieldErrors::new();
    check_product(
        state,
        &mut errors,
        Some(&payload.name),
        Some(payload.base_price),
        Some(payload.category_id),
    )
    .await?;
    errors.into_result()?;

    let product = products::ActiveModel {
        id: Set(Uuid::new_v4()),
        category_id: Set(payload.category_id),
        name: Set(payload.name.trim().to_string()),
        description: Set(payload.description),
        base_price: Set(payload.base_price.round_dp(2)),
        active: Set(payload.active.unwrap_or(true)),
        featured: Set(payload.featured.unwrap_or(false)),
        image_1: Set(None),
        image_2: Set(None),
        image_3: Set(None),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    record(
        &state.pool,
        user.user_id,
        "product_create",
        "products",
        serde_json::json!({ "product_id": product.id, "name": product.name }),
    )
    .await;

    Ok(ApiResponse::success("Product created", Product::from(product), Some(Meta::empty())))
}

pub async fn update_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let product = apply_product_update(state, user, id, payload, "product_update").await?;
    Ok(ApiResponse::success("Product updated", Product::from(product), Some(Meta::empty())))
}

pub async fn inline_edit_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    PRODUCT_ADMIN.ensure_editable(&patch)?;
    let payload: UpdateProductRequest = serde_json::from_value(Value::Object(patch))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    let product = apply_product_update(state, user, id, payload, "product_inline_edit").await?;
    Ok(ApiResponse::success("Product updated", Product::from(product), Some(Meta::empty())))
}

async fn apply_product_update(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: UpdateProductRequest,
    action: &str,
) -> AppResult<products::Model> {
    let mut errors = FieldErrors::new();
    check_product(
        state,
        &mut errors,
        payload.name.as_deref(),
        payload.base_price,
        payload.category_id,
    )
    .await?;
    errors.into_result()?;

    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut active: products::ActiveModel = existing.into();
    if let Some(v) = payload.category_id {
        active.category_id = Set(v);
    }
    if let Some(v) = payload.name {
        active.name = Set(v.trim().to_string());
    }
    if let Some(v) = payload.description {
        active.description = Set(v);
    }
    if let Some(v) = payload.base_price {
        active.base_price = Set(v.round_dp(2));
    }
    if let Some(v) = payload.active {
        active.active = Set(v);
    }
    if let Some(v) = payload.featured {
        active.featured = Set(v);
    }
    let product = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        action,
        "products",
        serde_json::json!({
            "product_id": product.id,
            "active": product.active,
            "base_price": product.base_price,
        }),
    )
    .await;

    Ok(product)
}

/// Replace product image slots from a multipart upload. Slots not present
/// in the upload keep their current file.
pub async fn upload_product_images(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    uploads: Vec<ImageUpload>,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let mut errors = FieldErrors::new();
    let mut accepted = Vec::new();
    for upload in uploads {
        if !PRODUCT_IMAGE_SLOTS.contains(&upload.field.as_str()) {
            continue;
        }
        match validate_image(&upload) {
            Ok(ext) => accepted.push((upload, ext)),
            Err(message) => errors.add(&upload.field, message),
        }
    }
    if accepted.is_empty() && errors.is_empty() {
        errors.add("image_1", "No file was submitted.");
    }
    errors.into_result()?;

    let mut stored: Vec<(String, String)> = Vec::new();
    for (upload, ext) in &accepted {
        match state.media.save(PRODUCT_DIR, ext, &upload.data).await {
            Ok(path) => stored.push((upload.field.clone(), path)),
            Err(err) => {
                let paths: Vec<String> = stored.into_iter().map(|(_, p)| p).collect();
                state.media.remove_all(&paths).await;
                return Err(err.into());
            }
        }
    }

    let mut replaced = Vec::new();
    let mut active: products::ActiveModel = existing.clone().into();
    for (slot, path) in &stored {
        let previous = match slot.as_str() {
            "image_1" => {
                active.image_1 = Set(Some(path.clone()));
                existing.image_1.clone()
            }
            "image_2" => {
                active.image_2 = Set(Some(path.clone()));
                existing.image_2.clone()
            }
            _ => {
                active.image_3 = Set(Some(path.clone()));
                existing.image_3.clone()
            }
        };
        replaced.extend(previous);
    }

    let product = match active.update(&state.orm).await {
        Ok(product) => product,
        Err(err) => {
            let paths: Vec<String> = stored.into_iter().map(|(_, p)| p).collect();
            state.media.remove_all(&paths).await;
            return Err(err.into());
        }
    };
    state.media.remove_all(&replaced).await;

    record(
        &state.pool,
        user.user_id,
        "product_images_upload",
        "products",
        serde_json::json!({
            "product_id": product.id,
            "slots": stored.iter().map(|(slot, _)| slot.as_str()).collect::<Vec<_>>(),
        }),
    )
    .await;

    Ok(ApiResponse::success("Product images updated", Product::from(product), Some(Meta::empty())))
}

pub async fn delete_product(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Product>> {
    ensure_admin(user)?;
    let existing = Products::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(p) => p,
        None => return Err(AppError::NotFound),
    };

    let files: Vec<String> = existing.images().into_iter().map(str::to_string).collect();
    existing.clone().delete(&state.orm).await?;
    state.media.remove_all(&files).await;

    record(
        &state.pool,
        user.user_id,
        "product_delete",
        "products",
        serde_json::json!({ "product_id": existing.id, "name": existing.name }),
    )
    .await;

    Ok(ApiResponse::success("Product deleted", Product::from(existing), Some(Meta::empty())))
}

// Supplies and orders

pub async fn supply_changelist(
    state: &AppState,
    user: &AuthUser,
    query: ChangeListQuery,
) -> AppResult<ApiResponse<ChangeList<SupplyRow>>> {
    ensure_admin(user)?;
    let (rows, meta) = SUPPLY_ADMIN.changelist(&state.orm, &query).await?;
    let items = rows
        .into_iter()
        .map(|supply| SupplyRow {
            stock_badge: badges::stock_badge(supply.stock_level()),
            supply: Supply::from(supply),
        })
        .collect();
    Ok(ApiResponse::success("Supplies", ChangeList { items }, Some(meta)))
}

pub async fn order_changelist(
    state: &AppState,
    user: &AuthUser,
    query: ChangeListQuery,
) -> AppResult<ApiResponse<ChangeList<OrderRow>>> {
    ensure_admin(user)?;
    let (rows, meta) = ORDER_ADMIN.changelist(&state.orm, &query).await?;
    let items = rows
        .into_iter()
        .map(|order| OrderRow {
            status_badge: badges::order_status_badge(order.status),
            payment_badge: badges::payment_badge(order.payment_status),
            platform_badge: badges::platform_badge(order.platform),
            quick_action: order_hint(order.status).map(str::to_string),
            tracking_url: state.tracking_url(&order.tracking_token),
            order: Order::from(order),
        })
        .collect();
    Ok(ApiResponse::success("Orders", ChangeList { items }, Some(meta)))
}
