//! Read-only queries over the public catalog. Only active products are ever
//! returned from here.

use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect,
    sea_query::{Expr, extension::postgres::PgExpr},
};
use uuid::Uuid;

use crate::{
    entity::{Categories, Products, categories, products},
    error::AppResult,
    models::{Category, Product},
    response::Meta,
    routes::params::{CatalogQuery, Pagination, contains_pattern},
};

pub const CATALOG_PAGE_SIZE: i64 = 12;
pub const FEATURED_LIMIT: u64 = 6;

#[derive(Debug)]
pub struct CatalogResult {
    pub products: Vec<Product>,
    pub meta: Meta,
    pub category: Option<categories::Model>,
}

pub async fn list_categories(db: &DatabaseConnection) -> AppResult<Vec<Category>> {
    let categories = Categories::find()
        .order_by_asc(categories::Column::Name)
        .all(db)
        .await?
        .into_iter()
        .map(Category::from)
        .collect();
    Ok(categories)
}

/// Featured products for the home page, falling back to the first active
/// products when nothing is featured.
pub async fn featured_products<C: ConnectionTrait>(db: &C) -> AppResult<Vec<Product>> {
    let featured = Products::find()
        .filter(products::Column::Active.eq(true))
        .filter(products::Column::Featured.eq(true))
        .order_by_asc(products::Column::Name)
        .find_also_related(Categories)
        .limit(FEATURED_LIMIT)
        .all(db)
        .await?;

    let rows = if featured.is_empty() {
        Products::find()
            .filter(products::Column::Active.eq(true))
            .order_by_asc(products::Column::Name)
            .find_also_related(Categories)
            .limit(FEATURED_LIMIT)
            .all(db)
            .await?
    } else {
        featured
    };

    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn active_products(db: &DatabaseConnection) -> AppResult<Vec<Product>> {
    let rows = Products::find()
        .filter(products::Column::Active.eq(true))
        .order_by_asc(products::Column::Name)
        .find_also_related(Categories)
        .all(db)
        .await?;
    Ok(rows.into_iter().map(Product::from).collect())
}

pub async fn find_active_product(db: &DatabaseConnection, id: Uuid) -> AppResult<Option<Product>> {
    let row = Products::find_by_id(id)
        .filter(products::Column::Active.eq(true))
        .find_also_related(Categories)
        .one(db)
        .await?;
    Ok(row.map(Product::from))
}

pub async fn search(db: &DatabaseConnection, query: &CatalogQuery) -> AppResult<CatalogResult> {
    let pagination = Pagination {
        page: query.page,
        per_page: Some(CATALOG_PAGE_SIZE),
    };
    let (page, limit, offset) = pagination.normalize();

    let mut condition = Condition::all().add(products::Column::Active.eq(true));
    let mut category = None;

    if let Some(raw) = query.categoria.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let Ok(id) = Uuid::parse_str(raw) else {
            return Ok(CatalogResult {
                products: Vec::new(),
                meta: Meta::paged(page, limit, 0),
                category: None,
            });
        };
        category = Categories::find_by_id(id).one(db).await?;
        condition = condition.add(products::Column::CategoryId.eq(id));
    }

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = contains_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col((Products, products::Column::Name)).ilike(pattern.clone()))
                .add(Expr::col((Products, products::Column::Description)).ilike(pattern.clone()))
                .add(Expr::col((Categories, categories::Column::Name)).ilike(pattern)),
        );
    }

    let finder = Products::find()
        .find_also_related(Categories)
        .filter(condition)
        .order_by_asc(products::Column::Name);

    let total = finder.clone().count(db).await?;

    let products = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    Ok(CatalogResult {
        products,
        meta: Meta::paged(page, limit, total),
        category,
    })
}
