use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use sea_orm::{
    ColumnTrait, Condition, DatabaseConnection, EntityTrait, IdenStatic, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select,
    sea_query::{Expr, SimpleExpr, extension::postgres::PgExpr},
};
use serde::Serialize;
use serde_json::{Map, Value};
use utoipa::ToSchema;

use crate::{
    config::parse_flag,
    error::{AppError, AppResult},
    response::Meta,
    routes::params::{Pagination, contains_pattern, parse_date, parse_uuid},
};

/// How a list filter interprets its query value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterKind {
    Text,
    Uuid,
    Bool,
    Choice(Vec<String>),
    /// Inclusive lower bound on a timestamp column, `YYYY-MM-DD` in UTC.
    DateFrom,
    /// Inclusive upper bound on a timestamp column, `YYYY-MM-DD` in UTC.
    DateTo,
}

impl FilterKind {
    fn name(&self) -> &'static str {
        match self {
            FilterKind::Text => "text",
            FilterKind::Uuid => "uuid",
            FilterKind::Bool => "bool",
            FilterKind::Choice(_) => "choice",
            FilterKind::DateFrom => "date_from",
            FilterKind::DateTo => "date_to",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ListFilter<C> {
    pub param: &'static str,
    pub column: C,
    pub kind: FilterKind,
}

impl<C: ColumnTrait> ListFilter<C> {
    pub fn new(param: &'static str, column: C, kind: FilterKind) -> Self {
        Self {
            param,
            column,
            kind,
        }
    }

    fn expression(&self, raw: &str) -> AppResult<SimpleExpr> {
        let expr = match &self.kind {
            FilterKind::Text => self.column.eq(raw.to_string()),
            FilterKind::Uuid => self.column.eq(parse_uuid(self.param, raw)?),
            FilterKind::Bool => self.column.eq(parse_flag(raw)),
            FilterKind::Choice(choices) => {
                if !choices.iter().any(|choice| choice == raw) {
                    return Err(AppError::BadRequest(format!(
                        "{}: '{}' is not one of {}",
                        self.param,
                        raw,
                        choices.join(", ")
                    )));
                }
                self.column.eq(raw.to_string())
            }
            FilterKind::DateFrom => self.column.gte(start_of_day(parse_date(self.param, raw)?)),
            FilterKind::DateTo => {
                let date = parse_date(self.param, raw)?;
                let next = date
                    .succ_opt()
                    .ok_or_else(|| AppError::BadRequest(format!("{}: date out of range", self.param)))?;
                self.column.lt(start_of_day(next))
            }
        };
        Ok(expr)
    }
}

pub fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// A bulk action offered on a change list.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AdminAction {
    pub name: String,
    pub description: String,
}

/// Request parameters of a change list. `q`, `o`, `page` and `per_page` are
/// reserved; every other pair is matched against the model's filters.
#[derive(Debug, Default, Clone)]
pub struct ChangeListQuery {
    pub search: Option<String>,
    pub ordering: Option<String>,
    pub pagination: Pagination,
    pub filters: Vec<(String, String)>,
}

impl ChangeListQuery {
    pub fn from_pairs(pairs: Vec<(String, String)>) -> AppResult<Self> {
        let mut query = Self::default();
        for (key, value) in pairs {
            let value = value.trim().to_string();
            if value.is_empty() {
                continue;
            }
            match key.as_str() {
                "q" => query.search = Some(value),
                "o" => query.ordering = Some(value),
                "page" => query.pagination.page = Some(parse_page(&key, &value)?),
                "per_page" => query.pagination.per_page = Some(parse_page(&key, &value)?),
                _ => query.filters.push((key, value)),
            }
        }
        Ok(query)
    }
}

fn parse_page(field: &str, value: &str) -> AppResult<i64> {
    value
        .parse()
        .map_err(|_| AppError::BadRequest(format!("{field}: expected a number")))
}

/// Change-list configuration of one administered entity.
pub struct ModelAdmin<E: EntityTrait> {
    pub name: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: Vec<&'static str>,
    pub list_filter: Vec<ListFilter<E::Column>>,
    pub search_fields: Vec<E::Column>,
    pub sortable: Vec<(&'static str, E::Column)>,
    pub ordering: (E::Column, Order),
    pub list_editable: Vec<&'static str>,
    pub actions: Vec<AdminAction>,
}

impl<E: EntityTrait> ModelAdmin<E> {
    pub fn new(
        name: &'static str,
        verbose_name: &'static str,
        verbose_name_plural: &'static str,
        ordering: (E::Column, Order),
    ) -> Self {
        Self {
            name,
            verbose_name,
            verbose_name_plural,
            list_display: Vec::new(),
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            sortable: Vec::new(),
            ordering,
            list_editable: Vec::new(),
            actions: Vec::new(),
        }
    }

    pub fn list_display(mut self, columns: &[&'static str]) -> Self {
        self.list_display = columns.to_vec();
        self
    }

    pub fn filter(mut self, param: &'static str, column: E::Column, kind: FilterKind) -> Self {
        self.list_filter.push(ListFilter::new(param, column, kind));
        self
    }

    pub fn search_fields(mut self, columns: &[E::Column]) -> Self {
        self.search_fields = columns.to_vec();
        self
    }

    pub fn sortable(mut self, fields: &[(&'static str, E::Column)]) -> Self {
        self.sortable = fields.to_vec();
        self
    }

    pub fn list_editable(mut self, fields: &[&'static str]) -> Self {
        self.list_editable = fields.to_vec();
        self
    }

    pub fn action(mut self, name: &str, description: &str) -> Self {
        self.actions.push(AdminAction {
            name: name.to_string(),
            description: description.to_string(),
        });
        self
    }

    pub fn condition(&self, query: &ChangeListQuery) -> AppResult<Condition> {
        let mut condition = Condition::all();

        if let Some(search) = query.search.as_ref().filter(|s| !s.is_empty()) {
            if !self.search_fields.is_empty() {
                let pattern = contains_pattern(search);
                let mut any = Condition::any();
                for column in &self.search_fields {
                    any = any.add(Expr::col((E::default(), *column)).ilike(pattern.clone()));
                }
                condition = condition.add(any);
            }
        }

        for (param, raw) in &query.filters {
            let Some(filter) = self.list_filter.iter().find(|f| f.param == param) else {
                continue;
            };
            condition = condition.add(filter.expression(raw)?);
        }

        Ok(condition)
    }

    /// Apply `o=field` / `o=-field` when `field` is sortable, otherwise the
    /// default ordering.
    pub fn order(&self, select: Select<E>, ordering: Option<&str>) -> Select<E> {
        if let Some(raw) = ordering {
            let (field, order) = match raw.strip_prefix('-') {
                Some(field) => (field, Order::Desc),
                None => (raw, Order::Asc),
            };
            if let Some((_, column)) = self.sortable.iter().find(|(name, _)| *name == field) {
                return select.order_by(*column, order);
            }
        }
        let (column, order) = &self.ordering;
        select.order_by(*column, order.clone())
    }

    pub fn select(&self, query: &ChangeListQuery) -> AppResult<Select<E>> {
        let select = E::find().filter(self.condition(query)?);
        Ok(self.order(select, query.ordering.as_deref()))
    }

    pub async fn changelist(
        &self,
        db: &DatabaseConnection,
        query: &ChangeListQuery,
    ) -> AppResult<(Vec<E::Model>, Meta)>
    where
        E::Model: Sync,
    {
        let (page, limit, offset) = query.pagination.normalize();
        let finder = self.select(query)?;

        let total = finder.clone().count(db).await?;
        let rows = finder
            .limit(limit as u64)
            .offset(offset as u64)
            .all(db)
            .await?;

        Ok((rows, Meta::paged(page, limit, total)))
    }

    /// Reject inline edits touching anything outside `list_editable`.
    pub fn ensure_editable(&self, patch: &Map<String, Value>) -> AppResult<()> {
        if patch.is_empty() {
            return Err(AppError::BadRequest("Nothing to update".into()));
        }
        if let Some(field) = patch
            .keys()
            .find(|key| !self.list_editable.contains(&key.as_str()))
        {
            return Err(AppError::BadRequest(format!(
                "{field} is not editable from the {} list",
                self.verbose_name_plural.to_lowercase()
            )));
        }
        Ok(())
    }

    pub fn describe(&self) -> ModelAdminInfo {
        ModelAdminInfo {
            name: self.name.to_string(),
            verbose_name: self.verbose_name.to_string(),
            verbose_name_plural: self.verbose_name_plural.to_string(),
            list_display: to_strings(&self.list_display),
            list_filter: self
                .list_filter
                .iter()
                .map(|filter| FilterInfo {
                    param: filter.param.to_string(),
                    kind: filter.kind.name().to_string(),
                    choices: match &filter.kind {
                        FilterKind::Choice(choices) => choices.clone(),
                        _ => Vec::new(),
                    },
                })
                .collect(),
            search_fields: self
                .search_fields
                .iter()
                .map(|column| column.as_str().to_string())
                .collect(),
            sortable: self
                .sortable
                .iter()
                .map(|(name, _)| name.to_string())
                .collect(),
            list_editable: to_strings(&self.list_editable),
            actions: self.actions.clone(),
        }
    }
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FilterInfo {
    pub param: String,
    pub kind: String,
    pub choices: Vec<String>,
}

/// Serializable view of a [`ModelAdmin`], consumed by the admin front-end.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ModelAdminInfo {
    pub name: String,
    pub verbose_name: String,
    pub verbose_name_plural: String,
    pub list_display: Vec<String>,
    pub list_filter: Vec<FilterInfo>,
    pub search_fields: Vec<String>,
    pub sortable: Vec<String>,
    pub list_editable: Vec<String>,
    pub actions: Vec<AdminAction>,
}
