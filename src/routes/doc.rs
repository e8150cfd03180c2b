use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    admin::{AdminSite, Badge, ModelAdminInfo, OrderAction, SupplyAction},
    dto::{
        admin::{
            AdminIndex, BulkActionResult, CategoryDeleted, CategoryRequest, CategoryRow,
            ChangeList, CreateProductRequest, OrderBulkRequest, OrderRow, ProductRow,
            SupplyBulkRequest, SupplyRow, UpdateProductRequest,
        },
        auth::{LoginRequest, LoginResponse},
        catalog::{CatalogPage, Confirmation, HomePage, OrderFormContext, Tracking},
        orders::{CreateOrderRequest, OrderDetail, OrderList, UpdateOrderRequest},
        supplies::{SupplyList, SupplyRequest},
    },
    entity::{
        orders::{OrderStatus, PaymentStatus, Platform},
        supplies::{StockLevel, SupplyType, SupplyUnit},
    },
    models::{Category, Order, Product, PublicOrder, ReferenceImage, Supply},
    response::{ApiResponse, Meta},
    routes::{admin, auth, health, orders, storefront, supplies},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        auth::login,
        storefront::home,
        storefront::catalog,
        storefront::product_detail,
        storefront::order_form,
        storefront::submit_order,
        storefront::confirmation,
        storefront::track,
        supplies::list_supplies,
        supplies::create_supply,
        supplies::get_supply,
        supplies::update_supply,
        supplies::delete_supply,
        orders::list_orders,
        orders::filter_orders,
        orders::get_order,
        admin::index,
        admin::category_changelist,
        admin::create_category,
        admin::update_category,
        admin::inline_edit_category,
        admin::delete_category,
        admin::product_changelist,
        admin::create_product,
        admin::update_product,
        admin::inline_edit_product,
        admin::upload_product_images,
        admin::delete_product,
        admin::supply_changelist,
        admin::inline_edit_supply,
        admin::supply_bulk_action,
        admin::order_changelist,
        admin::create_order,
        admin::update_order,
        admin::inline_edit_order,
        admin::delete_order,
        admin::order_bulk_action,
        admin::add_reference_image,
        admin::delete_reference_image
    ),
    components(
        schemas(
            Category,
            Product,
            Supply,
            Order,
            PublicOrder,
            ReferenceImage,
            OrderStatus,
            PaymentStatus,
            Platform,
            SupplyType,
            SupplyUnit,
            StockLevel,
            Badge,
            AdminSite,
            ModelAdminInfo,
            OrderAction,
            SupplyAction,
            LoginRequest,
            LoginResponse,
            HomePage,
            CatalogPage,
            OrderFormContext,
            Confirmation,
            Tracking,
            storefront::OrderSubmissionForm,
            SupplyRequest,
            SupplyList,
            OrderList,
            OrderDetail,
            CreateOrderRequest,
            UpdateOrderRequest,
            AdminIndex,
            CategoryRow,
            ProductRow,
            SupplyRow,
            OrderRow,
            CategoryRequest,
            CategoryDeleted,
            CreateProductRequest,
            UpdateProductRequest,
            OrderBulkRequest,
            SupplyBulkRequest,
            BulkActionResult,
            admin::ProductImagesForm,
            admin::ReferenceImageForm,
            Meta,
            ApiResponse<Supply>,
            ApiResponse<SupplyList>,
            ApiResponse<OrderList>,
            ApiResponse<OrderDetail>,
            ApiResponse<ChangeList<OrderRow>>,
            ApiResponse<BulkActionResult>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Storefront", description = "Public catalog, order form and tracking"),
        (name = "Supplies", description = "Supply inventory endpoints"),
        (name = "Orders", description = "Order read endpoints"),
        (name = "Admin", description = "Back-office endpoints"),
        (name = "Auth", description = "Staff authentication"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
