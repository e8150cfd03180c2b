use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    admin::{AdminSite, Badge, ModelAdminInfo, OrderAction, SupplyAction},
    models::{Category, Order, Product, Supply},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminIndex {
    pub site: AdminSite,
    pub models: Vec<ModelAdminInfo>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ChangeList<T> {
    pub items: Vec<T>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryRow {
    pub category: Category,
    pub product_count: i64,
    pub short_description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductRow {
    pub product: Product,
    pub image_preview: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplyRow {
    pub supply: Supply,
    pub stock_badge: Badge,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderRow {
    pub order: Order,
    pub status_badge: Badge,
    pub payment_badge: Badge,
    pub platform_badge: Badge,
    pub quick_action: Option<String>,
    pub tracking_url: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CategoryRequest {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryDeleted {
    pub id: Uuid,
    pub products_removed: u64,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateProductRequest {
    pub category_id: Uuid,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub base_price: Decimal,
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

/// Product change form; also the body of inline edits, which are further
/// restricted to the editable columns.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateProductRequest {
    pub category_id: Option<Uuid>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub base_price: Option<Decimal>,
    pub active: Option<bool>,
    pub featured: Option<bool>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct OrderBulkRequest {
    pub action: OrderAction,
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplyBulkRequest {
    pub action: SupplyAction,
    pub ids: Vec<Uuid>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkActionResult {
    pub action: String,
    pub updated: usize,
    pub skipped: Vec<Uuid>,
    pub message: String,
}
