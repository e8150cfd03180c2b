use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    entity::{
        categories, orders,
        orders::{OrderStatus, PaymentStatus, Platform},
        products, reference_images, supplies,
        supplies::{StockLevel, SupplyType, SupplyUnit},
    },
    media::media_url,
};

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: Uuid,
    pub category_id: Uuid,
    pub category_name: Option<String>,
    pub name: String,
    pub description: String,
    pub base_price: Decimal,
    pub active: bool,
    pub featured: bool,
    pub images: Vec<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Supply {
    pub id: Uuid,
    pub name: String,
    pub supply_type: SupplyType,
    pub quantity_on_hand: i32,
    pub minimum_quantity: i32,
    pub unit: SupplyUnit,
    pub brand: String,
    pub color: String,
    pub unit_price: Decimal,
    pub active: bool,
    pub needs_replenishment: bool,
    pub stock_level: StockLevel,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
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
    pub tracking_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_budget: Option<Decimal>,
    pub estimated_budget: Option<Decimal>,
    pub internal_notes: String,
}

/// What a customer sees of their own order on the confirmation and
/// tracking pages. Contact details and staff notes stay out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PublicOrder {
    pub client_name: String,
    pub product_id: Option<Uuid>,
    pub design_description: String,
    pub required_by: Option<NaiveDate>,
    pub platform: Platform,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    pub tracking_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub approved_budget: Option<Decimal>,
    pub estimated_budget: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ReferenceImage {
    pub id: Uuid,
    pub order_id: Uuid,
    pub image: String,
    pub url: String,
    pub caption: String,
    pub uploaded_at: DateTime<Utc>,
}

impl From<categories::Model> for Category {
    fn from(model: categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl Product {
    pub fn with_category(model: products::Model, category_name: Option<String>) -> Self {
        let images = model.images().into_iter().map(media_url).collect();
        Self {
            id: model.id,
            category_id: model.category_id,
            category_name,
            name: model.name,
            description: model.description,
            base_price: model.base_price,
            active: model.active,
            featured: model.featured,
            images,
            created_at: model.created_at.with_timezone(&Utc),
        }
    }
}

impl From<products::Model> for Product {
    fn from(model: products::Model) -> Self {
        Self::with_category(model, None)
    }
}

impl From<(products::Model, Option<categories::Model>)> for Product {
    fn from((product, category): (products::Model, Option<categories::Model>)) -> Self {
        Self::with_category(product, category.map(|c| c.name))
    }
}

impl From<supplies::Model> for Supply {
    fn from(model: supplies::Model) -> Self {
        let needs_replenishment = model.needs_replenishment();
        let stock_level = model.stock_level();
        Self {
            id: model.id,
            name: model.name,
            supply_type: model.supply_type,
            quantity_on_hand: model.quantity_on_hand,
            minimum_quantity: model.minimum_quantity,
            unit: model.unit,
            brand: model.brand,
            color: model.color,
            unit_price: model.unit_price,
            active: model.active,
            needs_replenishment,
            stock_level,
            updated_at: model.updated_at.with_timezone(&Utc),
        }
    }
}

impl From<orders::Model> for Order {
    fn from(model: orders::Model) -> Self {
        Self {
            id: model.id,
            client_name: model.client_name,
            email: model.email,
            phone: model.phone,
            social_handle: model.social_handle,
            product_id: model.product_id,
            design_description: model.design_description,
            required_by: model.required_by,
            platform: model.platform,
            status: model.status,
            payment_status: model.payment_status,
            tracking_token: model.tracking_token,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            approved_budget: model.approved_budget,
            estimated_budget: model.estimated_budget,
            internal_notes: model.internal_notes,
        }
    }
}

impl From<orders::Model> for PublicOrder {
    fn from(model: orders::Model) -> Self {
        Self {
            client_name: model.client_name,
            product_id: model.product_id,
            design_description: model.design_description,
            required_by: model.required_by,
            platform: model.platform,
            status: model.status,
            payment_status: model.payment_status,
            tracking_token: model.tracking_token,
            created_at: model.created_at.with_timezone(&Utc),
            updated_at: model.updated_at.with_timezone(&Utc),
            approved_budget: model.approved_budget,
            estimated_budget: model.estimated_budget,
        }
    }
}

impl From<reference_images::Model> for ReferenceImage {
    fn from(model: reference_images::Model) -> Self {
        let url = media_url(&model.image);
        Self {
            id: model.id,
            order_id: model.order_id,
            image: model.image,
            url,
            caption: model.caption,
            uploaded_at: model.uploaded_at.with_timezone(&Utc),
        }
    }
}
