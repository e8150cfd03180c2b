use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "products")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub category_id: Uuid,
    pub name: String,
    pub description: String,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub base_price: Decimal,
    pub active: bool,
    pub featured: bool,
    pub image_1: Option<String>,
    pub image_2: Option<String>,
    pub image_3: Option<String>,
    pub created_at: DateTimeWithTimeZone,
}

impl Model {
    /// Stored image paths in slot order, skipping empty slots.
    pub fn images(&self) -> Vec<&str> {
        [&self.image_1, &self.image_2, &self.image_3]
            .into_iter()
            .filter_map(|slot| slot.as_deref())
            .collect()
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::categories::Entity",
        from = "Column::CategoryId",
        to = "super::categories::Column::Id",
        on_delete = "Cascade"
    )]
    Categories,
    #[sea_orm(has_many = "super::orders::Entity")]
    Orders,
}

impl Related<super::categories::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Categories.def()
    }
}

impl Related<super::orders::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Orders.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
