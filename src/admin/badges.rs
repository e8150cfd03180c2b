use serde::Serialize;
use utoipa::ToSchema;

use crate::entity::{
    orders::{OrderStatus, PaymentStatus, Platform},
    supplies::StockLevel,
};

const GRAY: &str = "#6c757d";
const CYAN: &str = "#0dcaf0";
const BLUE: &str = "#0d6efd";
const GREEN: &str = "#198754";
const NEAR_BLACK: &str = "#212529";
const RED: &str = "#dc3545";
const YELLOW: &str = "#ffc107";
const ORANGE: &str = "#fd7e14";

/// Colored pill for a list column. Display only, never read back.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct Badge {
    pub label: String,
    pub background: String,
    pub foreground: String,
    pub html: String,
}

impl Badge {
    pub fn new(label: &str, background: &str, foreground: &str) -> Self {
        let html = format!(
            r#"<span style="background: {background}; color: {foreground}; padding: 4px 8px; border-radius: 12px; font-size: 12px; font-weight: bold;">{}</span>"#,
            escape_html(label)
        );
        Self {
            label: label.to_string(),
            background: background.to_string(),
            foreground: foreground.to_string(),
            html,
        }
    }
}

pub fn order_status_badge(status: OrderStatus) -> Badge {
    let color = match status {
        OrderStatus::Requested => GRAY,
        OrderStatus::Approved => CYAN,
        OrderStatus::InProgress => BLUE,
        OrderStatus::Completed | OrderStatus::Delivered => GREEN,
        OrderStatus::Finalized => NEAR_BLACK,
        OrderStatus::Cancelled => RED,
    };
    Badge::new(status.label(), color, "white")
}

pub fn payment_badge(status: PaymentStatus) -> Badge {
    let color = match status {
        PaymentStatus::Pending => YELLOW,
        PaymentStatus::Partial => CYAN,
        PaymentStatus::Paid => GREEN,
    };
    Badge::new(status.label(), color, "black")
}

pub fn platform_badge(platform: Platform) -> Badge {
    let color = match platform {
        Platform::Facebook => "#1877f2",
        Platform::Instagram => "#e4405f",
        Platform::Whatsapp => "#25d366",
        Platform::Website => CYAN,
        Platform::InPerson => ORANGE,
        Platform::Other => GRAY,
    };
    Badge::new(platform.label(), color, "white")
}

pub fn stock_badge(level: StockLevel) -> Badge {
    match level {
        StockLevel::Depleted => Badge::new("DEPLETED", RED, "white"),
        StockLevel::Low => Badge::new("LOW STOCK", ORANGE, "white"),
        StockLevel::Ok => Badge::new("IN STOCK", GREEN, "white"),
    }
}

/// Short hint shown next to an order in the change list.
pub fn order_hint(status: OrderStatus) -> Option<&'static str> {
    match status {
        OrderStatus::Requested => Some("Waiting for approval"),
        OrderStatus::Approved => Some("Approved"),
        OrderStatus::InProgress => Some("In production"),
        OrderStatus::Completed => Some("Ready"),
        _ => None,
    }
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Truncate to `max` characters, appending "..." when anything was cut.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() > max {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    } else {
        text.to_string()
    }
}
