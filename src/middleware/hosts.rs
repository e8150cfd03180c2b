use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};

use crate::error::AppError;

/// Host names the server answers for. `*` accepts any host and a leading
/// dot (`.example.com`) accepts the domain and all its subdomains.
#[derive(Debug, Clone)]
pub struct AllowedHosts(Arc<Vec<String>>);

impl AllowedHosts {
    pub fn new(hosts: Vec<String>) -> Self {
        Self(Arc::new(
            hosts.into_iter().map(|h| h.to_ascii_lowercase()).collect(),
        ))
    }

    pub fn permits(&self, host: &str) -> bool {
        let host = strip_port(host.trim()).to_ascii_lowercase();
        if host.is_empty() {
            return false;
        }
        self.0.iter().any(|allowed| {
            if allowed == "*" {
                return true;
            }
            match allowed.strip_prefix('.') {
                Some(domain) => host == domain || host.ends_with(allowed.as_str()),
                None => *allowed == host,
            }
        })
    }
}

fn strip_port(host: &str) -> &str {
    if host.starts_with('[') {
        return match host.find(']') {
            Some(end) => &host[..=end],
            None => host,
        };
    }
    match host.rsplit_once(':') {
        Some((name, port)) if port.bytes().all(|b| b.is_ascii_digit()) => name,
        _ => host,
    }
}

pub async fn require_allowed_host(
    State(hosts): State<AllowedHosts>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let host = req
        .headers()
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
        .or_else(|| req.uri().host().map(str::to_string));

    match host {
        Some(host) if hosts.permits(&host) => Ok(next.run(req).await),
        other => {
            tracing::warn!(host = ?other, "rejected request for disallowed host");
            Err(AppError::BadRequest("Invalid Host header".into()))
        }
    }
}
