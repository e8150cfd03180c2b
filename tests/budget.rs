use custom_shop::lifecycle::{FALLBACK_BASE_PRICE, estimate_budget};
use rust_decimal::Decimal;

fn money(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

#[test]
fn fallback_base_without_product() {
    let description = "x".repeat(250);
    assert_eq!(estimate_budget(None, &description, 0), money(15_000));
    assert_eq!(FALLBACK_BASE_PRICE, money(10_000));
}

#[test]
fn long_description_with_images() {
    let description = "x".repeat(1000);
    assert_eq!(
        estimate_budget(Some(money(20_000)), &description, 2),
        money(66_000)
    );
}

#[test]
fn complexity_and_images_are_capped() {
    let description = "x".repeat(10_000);
    // 1 + 2.0 + 0.6
    assert_eq!(
        estimate_budget(Some(money(1_000)), &description, 9),
        money(3_600)
    );
}

#[test]
fn empty_description_costs_the_base() {
    assert_eq!(estimate_budget(Some(money(500)), "", 0), money(500));
}

#[test]
fn description_length_counts_characters_not_bytes() {
    let ascii = "a".repeat(500);
    let accented = "á".repeat(500);
    assert_eq!(
        estimate_budget(None, &ascii, 0),
        estimate_budget(None, &accented, 0)
    );
}

#[test]
fn result_is_rounded_to_cents() {
    let estimate = estimate_budget(Some(Decimal::new(333, 2)), &"x".repeat(7), 1);
    assert!(estimate.scale() <= 2);
}
