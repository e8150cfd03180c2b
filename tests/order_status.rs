use custom_shop::{
    entity::orders::OrderStatus,
    error::AppError,
    lifecycle::status::ensure_transition,
};

use OrderStatus::*;

#[test]
fn forward_moves_are_allowed() {
    assert!(Requested.can_transition_to(Approved));
    assert!(Requested.can_transition_to(InProgress));
    assert!(Approved.can_transition_to(Completed));
    assert!(Delivered.can_transition_to(Finalized));
}

#[test]
fn backward_moves_are_rejected() {
    assert!(!Approved.can_transition_to(Requested));
    assert!(!Completed.can_transition_to(InProgress));
    assert!(!Finalized.can_transition_to(Delivered));
}

#[test]
fn cancel_from_any_open_state() {
    for status in [Requested, Approved, InProgress, Completed, Delivered] {
        assert!(status.can_transition_to(Cancelled), "{status:?}");
    }
    assert!(!Finalized.can_transition_to(Cancelled));
}

#[test]
fn cancelled_is_terminal() {
    for status in OrderStatus::FLOW {
        assert!(!Cancelled.can_transition_to(status), "{status:?}");
    }
    assert!(Cancelled.is_terminal());
}

#[test]
fn same_status_is_a_no_op() {
    for status in [Requested, InProgress, Finalized, Cancelled] {
        assert!(status.can_transition_to(status));
    }
}

#[test]
fn disallowed_transition_maps_to_conflict_error() {
    let err = ensure_transition(Completed, Approved).expect_err("backward move");
    assert!(matches!(
        err,
        AppError::InvalidTransition {
            from: Completed,
            to: Approved
        }
    ));
    assert!(ensure_transition(Approved, InProgress).is_ok());
}

#[test]
fn labels_are_human_readable() {
    assert_eq!(InProgress.label(), "In progress");
    assert_eq!(Requested.label(), "Requested");
}
