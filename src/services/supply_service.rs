use std::collections::HashSet;

use chrono::Utc;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, ModelTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    ActiveValue::Set,
    sea_query::{Expr, LockType},
};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::{
    admin::SUPPLY_ADMIN,
    audit::record,
    dto::{
        admin::{BulkActionResult, SupplyBulkRequest},
        supplies::{SupplyList, SupplyPatch, SupplyRequest},
    },
    entity::{
        Supplies,
        supplies::{self, SupplyType, SupplyUnit},
    },
    error::{AppError, AppResult, FieldErrors},
    middleware::auth::{AuthUser, ensure_admin},
    models::Supply,
    response::{ApiResponse, Meta},
    routes::params::SupplyListQuery,
    services::{order_service::dedup, storefront_service::check_length},
    state::AppState,
};

pub const DEFAULT_MINIMUM_QUANTITY: i32 = 5;

fn check_quantity(errors: &mut FieldErrors, field: &str, value: Option<i32>) {
    if value.is_some_and(|v| v < 0) {
        errors.add(field, "Ensure this value is greater than or equal to 0.");
    }
}

fn validate_request(payload: &SupplyRequest) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    if payload.name.trim().is_empty() {
        errors.add("name", "This field is required.");
    }
    check_length(&mut errors, "name", &payload.name, 200);
    check_quantity(&mut errors, "quantity_on_hand", payload.quantity_on_hand);
    check_quantity(&mut errors, "minimum_quantity", payload.minimum_quantity);
    check_length(&mut errors, "brand", payload.brand.as_deref().unwrap_or(""), 50);
    check_length(&mut errors, "color", payload.color.as_deref().unwrap_or(""), 30);
    if payload.unit_price.is_some_and(|p| p < Decimal::ZERO) {
        errors.add("unit_price", "Ensure this value is greater than or equal to 0.");
    }
    errors.into_result()
}

fn validate_patch(patch: &SupplyPatch) -> AppResult<()> {
    let mut errors = FieldErrors::new();
    check_quantity(&mut errors, "quantity_on_hand", patch.quantity_on_hand);
    check_quantity(&mut errors, "minimum_quantity", patch.minimum_quantity);
    if let Some(brand) = &patch.brand {
        check_length(&mut errors, "brand", brand, 50);
    }
    errors.into_result()
}

/// Fill an active model from a full request; omitted fields take defaults.
fn assign(active: &mut supplies::ActiveModel, payload: SupplyRequest) {
    active.name = Set(payload.name.trim().to_string());
    active.supply_type = Set(payload.supply_type.unwrap_or(SupplyType::Other));
    active.quantity_on_hand = Set(payload.quantity_on_hand.unwrap_or(0));
    active.minimum_quantity = Set(payload.minimum_quantity.unwrap_or(DEFAULT_MINIMUM_QUANTITY));
    active.unit = Set(payload.unit.unwrap_or(SupplyUnit::Units));
    active.brand = Set(payload.brand.unwrap_or_default().trim().to_string());
    active.color = Set(payload.color.unwrap_or_default().trim().to_string());
    active.unit_price = Set(payload.unit_price.unwrap_or(Decimal::ZERO));
    active.active = Set(payload.active.unwrap_or(true));
    active.updated_at = Set(Utc::now().into());
}

pub fn replenishment_condition(needs_replenishment: bool) -> Condition {
    let quantity = Expr::col(supplies::Column::QuantityOnHand);
    let minimum = Expr::col(supplies::Column::MinimumQuantity);
    if needs_replenishment {
        Condition::all().add(quantity.lte(minimum))
    } else {
        Condition::all().add(quantity.gt(minimum))
    }
}

pub async fn list_supplies(
    state: &AppState,
    user: &AuthUser,
    query: SupplyListQuery,
) -> AppResult<ApiResponse<SupplyList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();

    let mut condition = Condition::all();
    if let Some(flag) = query.needs_replenishment {
        condition = condition.add(replenishment_condition(flag));
    }

    let finder = Supplies::find()
        .filter(condition)
        .order_by_asc(supplies::Column::Name);

    let total = finder.clone().count(&state.orm).await?;

    let items = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(Supply::from)
        .collect();

    let meta = Meta::paged(page, limit, total);
    Ok(ApiResponse::success("Supplies", SupplyList { items }, Some(meta)))
}

pub async fn get_supply(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Supply>> {
    ensure_admin(user)?;
    let supply = Supplies::find_by_id(id).one(&state.orm).await?;
    let supply = match supply {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };
    Ok(ApiResponse::success("Supply", Supply::from(supply), Some(Meta::empty())))
}

pub async fn create_supply(
    state: &AppState,
    user: &AuthUser,
    payload: SupplyRequest,
) -> AppResult<ApiResponse<Supply>> {
    ensure_admin(user)?;
    validate_request(&payload)?;

    let mut active = supplies::ActiveModel {
        id: Set(Uuid::new_v4()),
        ..Default::default()
    };
    assign(&mut active, payload);
    let supply = active.insert(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "supply_create",
        "supplies",
        serde_json::json!({ "supply_id": supply.id, "name": supply.name }),
    )
    .await;

    Ok(ApiResponse::success("Supply created", Supply::from(supply), Some(Meta::empty())))
}

pub async fn update_supply(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: SupplyRequest,
) -> AppResult<ApiResponse<Supply>> {
    ensure_admin(user)?;
    validate_request(&payload)?;

    let existing = Supplies::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: supplies::ActiveModel = existing.into();
    assign(&mut active, payload);
    let supply = active.update(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "supply_update",
        "supplies",
        serde_json::json!({ "supply_id": supply.id }),
    )
    .await;

    Ok(ApiResponse::success("Supply updated", Supply::from(supply), Some(Meta::empty())))
}

pub async fn delete_supply(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Supply>> {
    ensure_admin(user)?;
    let existing = Supplies::find_by_id(id).one(&state.orm).await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    existing.clone().delete(&state.orm).await?;

    record(
        &state.pool,
        user.user_id,
        "supply_delete",
        "supplies",
        serde_json::json!({ "supply_id": existing.id, "name": existing.name }),
    )
    .await;

    Ok(ApiResponse::success("Supply deleted", Supply::from(existing), Some(Meta::empty())))
}

/// Inline edit from the supplies change list.
pub async fn inline_edit_supply(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    patch: Map<String, Value>,
) -> AppResult<ApiResponse<Supply>> {
    ensure_admin(user)?;
    SUPPLY_ADMIN.ensure_editable(&patch)?;
    let patch: SupplyPatch = serde_json::from_value(Value::Object(patch))
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_patch(&patch)?;

    let txn = state.orm.begin().await?;
    let existing = Supplies::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?;
    let existing = match existing {
        Some(s) => s,
        None => return Err(AppError::NotFound),
    };

    let mut active: supplies::ActiveModel = existing.into();
    if let Some(v) = patch.quantity_on_hand {
        active.quantity_on_hand = Set(v);
    }
    if let Some(v) = patch.minimum_quantity {
        active.minimum_quantity = Set(v);
    }
    if let Some(v) = patch.brand {
        active.brand = Set(v.trim().to_string());
    }
    active.updated_at = Set(Utc::now().into());
    let supply = active.update(&txn).await?;

    txn.commit().await?;

    record(
        &state.pool,
        user.user_id,
        "supply_inline_edit",
        "supplies",
        serde_json::json!({
            "supply_id": supply.id,
            "quantity_on_hand": supply.quantity_on_hand,
            "minimum_quantity": supply.minimum_quantity,
        }),
    )
    .await;

    Ok(ApiResponse::success("Supply updated", Supply::from(supply), Some(Meta::empty())))
}

pub async fn bulk_action(
    state: &AppState,
    user: &AuthUser,
    payload: SupplyBulkRequest,
) -> AppResult<ApiResponse<BulkActionResult>> {
    ensure_admin(user)?;
    let SupplyBulkRequest { action, ids } = payload;
    let ids = dedup(ids);
    if ids.is_empty() {
        return Err(AppError::BadRequest("No supplies selected".into()));
    }

    let txn = state.orm.begin().await?;
    let selected = Supplies::find()
        .filter(supplies::Column::Id.is_in(ids.clone()))
        .lock(LockType::Update)
        .all(&txn)
        .await?;

    let found: HashSet<Uuid> = selected.iter().map(|s| s.id).collect();
    let mut skipped: Vec<Uuid> = ids.iter().copied().filter(|id| !found.contains(id)).collect();
    let mut updated = 0;
    let now = Utc::now();

    for supply in selected {
        let Some(change) = action.apply(&supply) else {
            skipped.push(supply.id);
            continue;
        };
        let mut active: supplies::ActiveModel = supply.into();
        active.quantity_on_hand = Set(change.quantity_on_hand);
        active.active = Set(change.active);
        active.updated_at = Set(now.into());
        active.update(&txn).await?;
        updated += 1;
    }

    txn.commit().await?;

    let mut message = format!("{updated} supply item(s) updated: {}.", action.description());
    if !skipped.is_empty() {
        message.push_str(&format!(" {} skipped.", skipped.len()));
    }

    tracing::info!(action = action.name(), updated, skipped = skipped.len(), "supply bulk action");
    record(
        &state.pool,
        user.user_id,
        "supply_bulk_action",
        "supplies",
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
