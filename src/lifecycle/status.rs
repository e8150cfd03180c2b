use crate::{
    entity::orders::{OrderStatus, PaymentStatus, Platform},
    error::{AppError, AppResult},
};

impl OrderStatus {
    /// Forward progression; `Cancelled` sits outside it.
    pub const FLOW: [OrderStatus; 6] = [
        OrderStatus::Requested,
        OrderStatus::Approved,
        OrderStatus::InProgress,
        OrderStatus::Completed,
        OrderStatus::Delivered,
        OrderStatus::Finalized,
    ];

    fn position(self) -> Option<usize> {
        Self::FLOW.iter().position(|s| *s == self)
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Finalized | OrderStatus::Cancelled)
    }

    /// Forward-only, plus cancellation from any open state. Re-setting the
    /// current status is accepted as a no-op.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        if self == next {
            return true;
        }
        if self.is_terminal() {
            return false;
        }
        match (self.position(), next.position()) {
            (Some(from), Some(to)) => to > from,
            (Some(_), None) => next == OrderStatus::Cancelled,
            _ => false,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OrderStatus::Requested => "Requested",
            OrderStatus::Approved => "Approved",
            OrderStatus::InProgress => "In progress",
            OrderStatus::Completed => "Completed",
            OrderStatus::Delivered => "Delivered",
            OrderStatus::Finalized => "Finalized",
            OrderStatus::Cancelled => "Cancelled",
        }
    }
}

pub fn ensure_transition(from: OrderStatus, to: OrderStatus) -> AppResult<()> {
    if from.can_transition_to(to) {
        Ok(())
    } else {
        Err(AppError::InvalidTransition { from, to })
    }
}

impl PaymentStatus {
    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Partial => "Partial payment",
            PaymentStatus::Paid => "Paid",
        }
    }
}

impl Platform {
    pub fn label(self) -> &'static str {
        match self {
            Platform::Facebook => "Facebook",
            Platform::Instagram => "Instagram",
            Platform::Whatsapp => "WhatsApp",
            Platform::Website => "Website",
            Platform::InPerson => "In person",
            Platform::Other => "Other",
        }
    }
}
