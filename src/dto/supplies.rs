use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    entity::supplies::{SupplyType, SupplyUnit},
    models::Supply,
};

/// Body of both `POST` and `PUT`; omitted fields take their defaults.
#[derive(Debug, Deserialize, ToSchema)]
pub struct SupplyRequest {
    pub name: String,
    pub supply_type: Option<SupplyType>,
    pub quantity_on_hand: Option<i32>,
    pub minimum_quantity: Option<i32>,
    pub unit: Option<SupplyUnit>,
    pub brand: Option<String>,
    pub color: Option<String>,
    pub unit_price: Option<Decimal>,
    pub active: Option<bool>,
}

/// Inline edit from the supplies change list.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct SupplyPatch {
    pub quantity_on_hand: Option<i32>,
    pub minimum_quantity: Option<i32>,
    pub brand: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SupplyList {
    pub items: Vec<Supply>,
}
