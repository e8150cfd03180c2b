use std::time::Duration;

use custom_shop::lifecycle::ConfirmationTickets;
use uuid::Uuid;

#[test]
fn ticket_can_be_read_once() {
    let tickets = ConfirmationTickets::default();
    let order_id = Uuid::new_v4();
    let ticket = tickets.issue(order_id, "aB3-_xYz09");

    let first = tickets.take(&ticket).expect("fresh ticket");
    assert_eq!(first.order_id, order_id);
    assert_eq!(first.tracking_token, "aB3-_xYz09");

    assert!(tickets.take(&ticket).is_none());
    assert!(tickets.is_empty());
}

#[test]
fn unknown_ticket_yields_nothing() {
    let tickets = ConfirmationTickets::default();
    assert!(tickets.take("missing").is_none());
}

#[test]
fn tickets_are_independent() {
    let tickets = ConfirmationTickets::default();
    let a = tickets.issue(Uuid::new_v4(), "tokenAAAAA");
    let b = tickets.issue(Uuid::new_v4(), "tokenBBBBB");
    assert_ne!(a, b);
    assert_eq!(tickets.len(), 2);

    assert!(tickets.take(&a).is_some());
    assert_eq!(tickets.take(&b).map(|t| t.tracking_token).as_deref(), Some("tokenBBBBB"));
}

#[test]
fn expired_ticket_is_refused() {
    let tickets = ConfirmationTickets::new(Duration::from_millis(10));
    let ticket = tickets.issue(Uuid::new_v4(), "tokenCCCCC");
    std::thread::sleep(Duration::from_millis(30));
    assert!(tickets.take(&ticket).is_none());
}

#[test]
fn issuing_purges_expired_tickets() {
    let tickets = ConfirmationTickets::new(Duration::from_millis(10));
    tickets.issue(Uuid::new_v4(), "tokenDDDDD");
    std::thread::sleep(Duration::from_millis(30));
    tickets.issue(Uuid::new_v4(), "tokenEEEEE");
    assert_eq!(tickets.len(), 1);
}
