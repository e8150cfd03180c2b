//! Staff administration back-end.
//!
//! Every administered entity gets one explicit [`ModelAdmin`] value (see
//! [`registry`]) describing its change list: columns, filters, search
//! fields, inline-editable fields and bulk actions. The generic change-list
//! component in [`model_admin`] turns those values plus a request query into
//! SeaORM selects. Badges and other presentation helpers live here rather
//! than on the entities.

pub mod actions;
pub mod badges;
pub mod model_admin;
pub mod registry;
pub mod site;

pub use actions::{OrderAction, SupplyAction, SupplyChange};
pub use badges::Badge;
pub use model_admin::{
    AdminAction, ChangeListQuery, FilterKind, ListFilter, ModelAdmin, ModelAdminInfo,
};
pub use registry::{CATEGORY_ADMIN, ORDER_ADMIN, PRODUCT_ADMIN, SUPPLY_ADMIN, registered_models};
pub use site::AdminSite;
