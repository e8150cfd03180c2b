use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    admin::Badge,
    entity::orders::Platform,
    models::{Category, Product, PublicOrder, ReferenceImage},
};

#[derive(Debug, Serialize, ToSchema)]
pub struct HomePage {
    pub featured: Vec<Product>,
    pub categories: Vec<Category>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CatalogPage {
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
    pub current_category: Option<Category>,
    pub q: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderFormContext {
    pub products: Vec<Product>,
    pub selected_product: Option<Product>,
    pub default_platform: Platform,
    pub max_reference_images: usize,
    pub max_image_bytes: usize,
    pub accepted_extensions: Vec<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Confirmation {
    pub order: PublicOrder,
    pub images: Vec<ReferenceImage>,
    pub tracking_url: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Tracking {
    pub order: PublicOrder,
    pub product_name: Option<String>,
    pub status_label: String,
    pub payment_label: String,
    pub status_badge: Badge,
    pub images: Vec<ReferenceImage>,
}
