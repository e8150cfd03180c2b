pub mod audit_logs;
pub mod categories;
pub mod orders;
pub mod products;
pub mod reference_images;
pub mod supplies;
pub mod users;

pub use audit_logs::Entity as AuditLogs;
pub use categories::Entity as Categories;
pub use orders::Entity as Orders;
pub use products::Entity as Products;
pub use reference_images::Entity as ReferenceImages;
pub use supplies::Entity as Supplies;
pub use users::Entity as Users;
