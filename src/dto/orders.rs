use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::orders::{OrderStatus, PaymentStatus, Platform},
    models::{Order, ReferenceImage},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderList {
    pub items: Vec<Order>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderDetail {
    pub order: Order,
    pub product_name: Option<String>,
    pub images: Vec<ReferenceImage>,
    pub tracking_url: String,
}

/// Order created by staff from the admin, e.g. one taken over the phone.
#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateOrderRequest {
    pub client_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub social_handle: String,
    pub product_id: Option<Uuid>,
    pub design_description: String,
    pub required_by: Option<NaiveDate>,
    pub platform: Option<Platform>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub approved_budget: Option<Decimal>,
    pub estimated_budget: Option<Decimal>,
    #[serde(default)]
    pub internal_notes: String,
}

/// Change form of an order. The tracking token and creation time are not
/// part of it.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrderRequest {
    pub client_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub social_handle: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = Uuid, nullable)]
    pub product_id: Option<Option<Uuid>>,
    pub design_description: Option<String>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, format = Date, nullable)]
    pub required_by: Option<Option<NaiveDate>>,
    pub platform: Option<Platform>,
    pub status: Option<OrderStatus>,
    pub payment_status: Option<PaymentStatus>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub approved_budget: Option<Option<Decimal>>,
    #[serde(default, deserialize_with = "nullable")]
    #[schema(value_type = Option<String>, nullable)]
    pub estimated_budget: Option<Option<Decimal>>,
    pub internal_notes: Option<String>,
}

/// A present field maps to `Some`, so an explicit `null` becomes
/// `Some(None)` and clears the column.
fn nullable<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
