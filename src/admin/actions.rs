use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::entity::{
    orders::{OrderStatus, PaymentStatus},
    supplies,
};

/// Bulk actions on the orders change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum OrderAction {
    MarkApproved,
    MarkInProgress,
    MarkCompleted,
}

impl OrderAction {
    pub const ALL: [OrderAction; 3] = [
        OrderAction::MarkApproved,
        OrderAction::MarkInProgress,
        OrderAction::MarkCompleted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            OrderAction::MarkApproved => "mark_approved",
            OrderAction::MarkInProgress => "mark_in_progress",
            OrderAction::MarkCompleted => "mark_completed",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            OrderAction::MarkApproved => "Mark as Approved",
            OrderAction::MarkInProgress => "Mark as In progress",
            OrderAction::MarkCompleted => "Mark as Completed (and paid)",
        }
    }

    pub fn target(self) -> OrderStatus {
        match self {
            OrderAction::MarkApproved => OrderStatus::Approved,
            OrderAction::MarkInProgress => OrderStatus::InProgress,
            OrderAction::MarkCompleted => OrderStatus::Completed,
        }
    }

    /// Payment status forced alongside the status change, if any.
    pub fn payment(self) -> Option<PaymentStatus> {
        match self {
            OrderAction::MarkCompleted => Some(PaymentStatus::Paid),
            _ => None,
        }
    }

    /// Orders already past the target, or closed, are skipped.
    pub fn applies_to(self, current: OrderStatus) -> bool {
        current != self.target() && current.can_transition_to(self.target())
    }
}

/// Bulk actions on the supplies change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SupplyAction {
    ReplenishToDoubleMinimum,
    #[serde(rename = "add_10")]
    Add10,
    #[serde(rename = "add_50")]
    Add50,
    DeactivateDepleted,
}

/// Field values a supply action writes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupplyChange {
    pub quantity_on_hand: i32,
    pub active: bool,
}

impl SupplyAction {
    pub const ALL: [SupplyAction; 4] = [
        SupplyAction::ReplenishToDoubleMinimum,
        SupplyAction::Add10,
        SupplyAction::Add50,
        SupplyAction::DeactivateDepleted,
    ];

    pub fn name(self) -> &'static str {
        match self {
            SupplyAction::ReplenishToDoubleMinimum => "replenish_to_double_minimum",
            SupplyAction::Add10 => "add_10",
            SupplyAction::Add50 => "add_50",
            SupplyAction::DeactivateDepleted => "deactivate_depleted",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            SupplyAction::ReplenishToDoubleMinimum => "Replenish stock to twice the minimum",
            SupplyAction::Add10 => "Add 10 units",
            SupplyAction::Add50 => "Add 50 units",
            SupplyAction::DeactivateDepleted => "Deactivate depleted supplies",
        }
    }

    /// New values for `supply`, or `None` when the action leaves it alone.
    pub fn apply(self, supply: &supplies::Model) -> Option<SupplyChange> {
        let quantity = supply.quantity_on_hand;
        let change = |quantity_on_hand: i32| SupplyChange {
            quantity_on_hand,
            active: supply.active,
        };
        match self {
            SupplyAction::ReplenishToDoubleMinimum => {
                let target = supply.minimum_quantity.saturating_mul(2);
                (target > quantity).then(|| change(target))
            }
            SupplyAction::Add10 => Some(change(quantity.saturating_add(10))),
            SupplyAction::Add50 => Some(change(quantity.saturating_add(50))),
            SupplyAction::DeactivateDepleted => {
                (supply.is_depleted() && supply.active).then_some(SupplyChange {
                    quantity_on_hand: quantity,
                    active: false,
                })
            }
        }
    }
}
