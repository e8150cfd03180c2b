use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use dashmap::DashMap;
use uuid::Uuid;

use super::token::random_url_safe;

const TICKET_LENGTH: usize = 32;
pub const DEFAULT_TICKET_TTL: Duration = Duration::from_secs(15 * 60);

#[derive(Debug, Clone)]
pub struct Ticket {
    pub order_id: Uuid,
    pub tracking_token: String,
    issued_at: Instant,
}

/// Single-read handles passed from the order submission redirect to the
/// confirmation page. A ticket is gone after its first `take`.
#[derive(Clone)]
pub struct ConfirmationTickets {
    inner: Arc<DashMap<String, Ticket>>,
    ttl: Duration,
}

impl ConfirmationTickets {
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(DashMap::new()),
            ttl,
        }
    }

    pub fn issue(&self, order_id: Uuid, tracking_token: impl Into<String>) -> String {
        self.purge_expired();
        let ticket = random_url_safe(TICKET_LENGTH);
        self.inner.insert(
            ticket.clone(),
            Ticket {
                order_id,
                tracking_token: tracking_token.into(),
                issued_at: Instant::now(),
            },
        );
        ticket
    }

    pub fn take(&self, ticket: &str) -> Option<Ticket> {
        let (_, entry) = self.inner.remove(ticket)?;
        (entry.issued_at.elapsed() <= self.ttl).then_some(entry)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    fn purge_expired(&self) {
        let ttl = self.ttl;
        self.inner.retain(|_, entry| entry.issued_at.elapsed() <= ttl);
    }
}

impl Default for ConfirmationTickets {
    fn default() -> Self {
        Self::new(DEFAULT_TICKET_TTL)
    }
}
