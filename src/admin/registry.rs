//! One explicit [`ModelAdmin`] per administered entity.

use std::sync::LazyLock;

use sea_orm::{ActiveEnum, Order};

use super::{
    actions::{OrderAction, SupplyAction},
    model_admin::{FilterKind, ModelAdmin, ModelAdminInfo},
};
use crate::entity::{
    categories, orders,
    orders::{OrderStatus, PaymentStatus, Platform},
    products, supplies,
    supplies::{SupplyType, SupplyUnit},
};

fn choices<E: ActiveEnum<Value = String>>() -> FilterKind {
    FilterKind::Choice(E::values())
}

pub static CATEGORY_ADMIN: LazyLock<ModelAdmin<categories::Entity>> = LazyLock::new(|| {
    use categories::Column;
    ModelAdmin::new("categories", "Category", "Categories", (Column::Name, Order::Asc))
        .list_display(&["name", "product_count", "short_description"])
        .search_fields(&[Column::Name])
        .sortable(&[("name", Column::Name), ("created_at", Column::CreatedAt)])
});

pub static PRODUCT_ADMIN: LazyLock<ModelAdmin<products::Entity>> = LazyLock::new(|| {
    use products::Column;
    ModelAdmin::new("products", "Product", "Products", (Column::Name, Order::Asc))
        .list_display(&["name", "category", "base_price", "active", "image_preview"])
        .filter("category", Column::CategoryId, FilterKind::Uuid)
        .filter("active", Column::Active, FilterKind::Bool)
        .search_fields(&[Column::Name, Column::Description])
        .sortable(&[
            ("name", Column::Name),
            ("base_price", Column::BasePrice),
            ("created_at", Column::CreatedAt),
        ])
        .list_editable(&["active", "base_price"])
});

pub static SUPPLY_ADMIN: LazyLock<ModelAdmin<supplies::Entity>> = LazyLock::new(|| {
    use supplies::Column;
    let admin = ModelAdmin::new("supplies", "Supply", "Supplies", (Column::Name, Order::Asc))
        .list_display(&[
            "name",
            "supply_type",
            "quantity_on_hand",
            "unit",
            "stock_badge",
            "needs_replenishment",
        ])
        .filter("supply_type", Column::SupplyType, choices::<SupplyType>())
        .filter("unit", Column::Unit, choices::<SupplyUnit>())
        .filter("active", Column::Active, FilterKind::Bool)
        .search_fields(&[Column::Name, Column::Brand])
        .sortable(&[
            ("name", Column::Name),
            ("quantity_on_hand", Column::QuantityOnHand),
            ("updated_at", Column::UpdatedAt),
        ])
        .list_editable(&["quantity_on_hand", "minimum_quantity", "brand"]);
    SupplyAction::ALL
        .iter()
        .fold(admin, |admin, action| admin.action(action.name(), action.description()))
});

pub static ORDER_ADMIN: LazyLock<ModelAdmin<orders::Entity>> = LazyLock::new(|| {
    use orders::Column;
    let admin = ModelAdmin::new("orders", "Order", "Orders", (Column::CreatedAt, Order::Desc))
        .list_display(&[
            "id",
            "client_name",
            "status",
            "payment_status",
            "status_badge",
            "payment_badge",
            "platform_badge",
            "created_at",
            "quick_actions",
        ])
        .filter("status", Column::Status, choices::<OrderStatus>())
        .filter("payment_status", Column::PaymentStatus, choices::<PaymentStatus>())
        .filter("platform", Column::Platform, choices::<Platform>())
        .filter("product", Column::ProductId, FilterKind::Uuid)
        .filter("created_from", Column::CreatedAt, FilterKind::DateFrom)
        .filter("created_to", Column::CreatedAt, FilterKind::DateTo)
        .search_fields(&[
            Column::ClientName,
            Column::Email,
            Column::Phone,
            Column::TrackingToken,
            Column::DesignDescription,
        ])
        .sortable(&[
            ("created_at", Column::CreatedAt),
            ("client_name", Column::ClientName),
            ("status", Column::Status),
            ("required_by", Column::RequiredBy),
        ])
        .list_editable(&["status", "payment_status"]);
    OrderAction::ALL
        .iter()
        .fold(admin, |admin, action| admin.action(action.name(), action.description()))
});

/// Metadata of every registered model, in menu order.
pub fn registered_models() -> Vec<ModelAdminInfo> {
    vec![
        ORDER_ADMIN.describe(),
        PRODUCT_ADMIN.describe(),
        CATEGORY_ADMIN.describe(),
        SUPPLY_ADMIN.describe(),
    ]
}
