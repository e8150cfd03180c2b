use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum SupplyType {
    #[sea_orm(string_value = "fabric")]
    Fabric,
    #[sea_orm(string_value = "ink")]
    Ink,
    #[sea_orm(string_value = "vinyl")]
    Vinyl,
    #[sea_orm(string_value = "paper")]
    Paper,
    #[sea_orm(string_value = "thread")]
    Thread,
    #[sea_orm(string_value = "blank")]
    Blank,
    #[sea_orm(string_value = "packaging")]
    Packaging,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum SupplyUnit {
    #[sea_orm(string_value = "units")]
    Units,
    #[sea_orm(string_value = "meters")]
    Meters,
    #[sea_orm(string_value = "liters")]
    Liters,
    #[sea_orm(string_value = "kilos")]
    Kilos,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum StockLevel {
    Depleted,
    Low,
    Ok,
}

pub fn needs_replenishment(quantity_on_hand: i32, minimum_quantity: i32) -> bool {
    quantity_on_hand <= minimum_quantity
}

pub fn is_depleted(quantity_on_hand: i32) -> bool {
    quantity_on_hand == 0
}

pub fn stock_level(quantity_on_hand: i32, minimum_quantity: i32) -> StockLevel {
    if is_depleted(quantity_on_hand) {
        StockLevel::Depleted
    } else if needs_replenishment(quantity_on_hand, minimum_quantity) {
        StockLevel::Low
    } else {
        StockLevel::Ok
    }
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "supplies")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub supply_type: SupplyType,
    pub quantity_on_hand: i32,
    pub minimum_quantity: i32,
    pub unit: SupplyUnit,
    pub brand: String,
    pub color: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub unit_price: Decimal,
    pub active: bool,
    pub updated_at: DateTimeWithTimeZone,
}

impl Model {
    pub fn needs_replenishment(&self) -> bool {
        needs_replenishment(self.quantity_on_hand, self.minimum_quantity)
    }

    pub fn is_depleted(&self) -> bool {
        is_depleted(self.quantity_on_hand)
    }

    pub fn stock_level(&self) -> StockLevel {
        stock_level(self.quantity_on_hand, self.minimum_quantity)
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
