use serde::Serialize;
use utoipa::ToSchema;

use crate::config::AppConfig;

/// Titles shown by the admin front-end. Built once at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct AdminSite {
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
}

impl AdminSite {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            site_header: config.site_header.clone(),
            site_title: config.site_title.clone(),
            index_title: config.index_title.clone(),
        }
    }
}
