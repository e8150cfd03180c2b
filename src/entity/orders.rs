use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[sea_orm(string_value = "requested")]
    Requested,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "in_progress")]
    InProgress,
    #[sea_orm(string_value = "completed")]
    Completed,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "finalized")]
    Finalized,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "partial")]
    Partial,
    #[sea_orm(string_value = "paid")]
    Paid,
}

/// Channel the order came in through.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
#[serde(rename_all = "snake_case")]
pub enum Platform {
    #[sea_orm(string_value = "facebook")]
    Facebook,
    #[sea_orm(string_value = "instagram")]
    Instagram,
    #[sea_orm(string_value = "whatsapp")]
    Whatsapp,
    #[sea_orm(string_value = "website")]
    Website,
    #[sea_orm(string_value = "in_person")]
    InPerson,
    #[sea_orm(string_value = "other")]
    Other,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "orders")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub client_name: String,
    pub email: String,
    pub phone: String,
    pub social_handle: String,
    pub product_id: Option<Uuid>,
    #[sea_orm(column_type = "Text")]
    pub design_description: String,
    pub required_by: Option<Date>,
    pub platform: Platform,
    pub status: OrderStatus,
    pub payment_status: PaymentStatus,
    #[sea_orm(unique)]
    pub tracking_token: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub approved_budget: Option<Decimal>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))", nullable)]
    pub estimated_budget: Option<Decimal>,
    #[sea_orm(column_type = "Text")]
    pub internal_notes: String,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::products::Entity",
        from = "Column::ProductId",
        to = "super::products::Column::Id",
        on_delete = "SetNull"
    )]
    Products,
    #[sea_orm(has_many = "super::reference_images::Entity")]
    ReferenceImages,
}

impl Related<super::products::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Products.def()
    }
}

impl Related<super::reference_images::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ReferenceImages.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
