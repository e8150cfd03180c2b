use chrono::NaiveDate;
use sea_orm::ActiveEnum;
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use crate::{
    entity::orders::{OrderStatus, Platform},
    error::{AppError, AppResult},
};

#[derive(Debug, Default, Clone, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Default, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CatalogQuery {
    /// Free text matched against product name, description and category name
    pub q: Option<String>,
    /// Category id
    pub categoria: Option<String>,
    pub page: Option<i64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OrderFormQuery {
    /// Product to preselect in the form
    pub producto: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ConfirmationQuery {
    pub ticket: Option<String>,
}

// Query structs keep page fields inline: `serde(flatten)` turns every value
// into a string and breaks numeric parsing in `Query`.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub sort_order: Option<SortOrder>,
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct SupplyListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub needs_replenishment: Option<bool>,
}

impl SupplyListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

/// `/api/orders/filter` parameters. Built from raw query pairs so `status`
/// may be repeated as well as comma separated.
#[derive(Debug, Default, Clone)]
pub struct OrderFilterQuery {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub statuses: Vec<OrderStatus>,
    pub platform: Option<Platform>,
    pub pagination: Pagination,
}

impl OrderFilterQuery {
    pub fn from_pairs(pairs: &[(String, String)]) -> AppResult<Self> {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "date_from" => query.date_from = Some(parse_date(key, value)?),
                "date_to" => query.date_to = Some(parse_date(key, value)?),
                "status" => {
                    for part in value.split(',').map(str::trim).filter(|p| !p.is_empty()) {
                        let status = parse_choice::<OrderStatus>(key, part)?;
                        if !query.statuses.contains(&status) {
                            query.statuses.push(status);
                        }
                    }
                }
                "platform" => query.platform = Some(parse_choice::<Platform>(key, value)?),
                "page" => query.pagination.page = Some(parse_number(key, value)?),
                "per_page" => query.pagination.per_page = Some(parse_number(key, value)?),
                _ => {}
            }
        }

        if let (Some(from), Some(to)) = (query.date_from, query.date_to) {
            if from > to {
                return Err(AppError::BadRequest(
                    "date_from must not be after date_to".into(),
                ));
            }
        }
        Ok(query)
    }
}

pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("{field}: expected a YYYY-MM-DD date")))
}

pub fn parse_uuid(field: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value).map_err(|_| AppError::BadRequest(format!("{field}: invalid id")))
}

fn parse_number(field: &str, value: &str) -> AppResult<i64> {
    value
        .parse::<i64>()
        .map_err(|_| AppError::BadRequest(format!("{field}: expected a number")))
}

/// Parse the stored string value of a SeaORM string enum.
pub fn parse_choice<E>(field: &str, value: &str) -> AppResult<E>
where
    E: ActiveEnum<Value = String>,
{
    E::try_from_value(&value.to_string())
        .map_err(|_| AppError::BadRequest(format!("{field}: '{value}' is not a valid choice")))
}

/// `ILIKE` pattern matching `search` as a plain substring. `\` is the default
/// escape character in Postgres.
pub fn contains_pattern(search: &str) -> String {
    let mut pattern = String::with_capacity(search.len() + 2);
    pattern.push('%');
    for c in search.chars() {
        if matches!(c, '\\' | '%' | '_') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
