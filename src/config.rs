use std::env;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub debug: bool,
    pub allowed_hosts: Vec<String>,
    pub media_root: String,
    pub public_base_url: String,
    pub site_header: String,
    pub site_title: String,
    pub index_title: String,
}

impl AppConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        let database_url = env::var("DATABASE_URL")?;
        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .ok()
            .and_then(|p| p.parse::<u16>().ok())
            .unwrap_or(3000);
        let debug = env::var("DEBUG").map(|v| parse_flag(&v)).unwrap_or(false);
        let allowed_hosts = env::var("ALLOWED_HOSTS")
            .map(|v| parse_list(&v))
            .unwrap_or_else(|_| vec!["127.0.0.1".to_string(), "localhost".to_string()]);
        let media_root = env::var("MEDIA_ROOT").unwrap_or_else(|_| "media".to_string());
        let public_base_url = env::var("PUBLIC_BASE_URL")
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|_| format!("http://{host}:{port}"));
        let site_header = env::var("ADMIN_SITE_HEADER")
            .unwrap_or_else(|_| "Custom Shop Administration".to_string());
        let site_title =
            env::var("ADMIN_SITE_TITLE").unwrap_or_else(|_| "Custom Shop Admin".to_string());
        let index_title =
            env::var("ADMIN_INDEX_TITLE").unwrap_or_else(|_| "Control Panel".to_string());

        Ok(Self {
            port,
            database_url,
            host,
            debug,
            allowed_hosts,
            media_root,
            public_base_url,
            site_header,
            site_title,
            index_title,
        })
    }
}

pub fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

pub fn parse_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
