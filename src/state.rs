use std::sync::Arc;

use crate::{
    admin::site::AdminSite,
    config::AppConfig,
    db::{DbPool, OrmConn, orm_from_pool},
    lifecycle::ConfirmationTickets,
    media::MediaStorage,
};

#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub orm: OrmConn,
    pub media: MediaStorage,
    pub tickets: ConfirmationTickets,
    pub site: Arc<AdminSite>,
    pub public_base_url: String,
}

impl AppState {
    pub fn new(pool: DbPool, config: &AppConfig) -> Self {
        let orm = orm_from_pool(&pool);
        Self {
            pool,
            orm,
            media: MediaStorage::new(&config.media_root),
            tickets: ConfirmationTickets::default(),
            site: Arc::new(AdminSite::from_config(config)),
            public_base_url: config.public_base_url.clone(),
        }
    }

    pub fn tracking_url(&self, token: &str) -> String {
        format!("{}/track/{}", self.public_base_url, token)
    }
}
