use chrono::Utc;
use custom_shop::{
    admin::{SupplyAction, SupplyChange},
    entity::supplies::{self, StockLevel, SupplyType, SupplyUnit, needs_replenishment, stock_level},
};
use rust_decimal::Decimal;
use uuid::Uuid;

fn supply(quantity_on_hand: i32, minimum_quantity: i32, active: bool) -> supplies::Model {
    supplies::Model {
        id: Uuid::new_v4(),
        name: "White mugs".into(),
        supply_type: SupplyType::Blank,
        quantity_on_hand,
        minimum_quantity,
        unit: SupplyUnit::Units,
        brand: String::new(),
        color: String::new(),
        unit_price: Decimal::ZERO,
        active,
        updated_at: Utc::now().into(),
    }
}

#[test]
fn replenishment_threshold_is_inclusive() {
    assert!(needs_replenishment(5, 5));
    assert!(needs_replenishment(4, 5));
    assert!(!needs_replenishment(6, 5));
    assert!(needs_replenishment(0, 0));
}

#[test]
fn stock_levels() {
    assert_eq!(stock_level(0, 5), StockLevel::Depleted);
    assert_eq!(stock_level(0, 0), StockLevel::Depleted);
    assert_eq!(stock_level(3, 5), StockLevel::Low);
    assert_eq!(stock_level(5, 5), StockLevel::Low);
    assert_eq!(stock_level(6, 5), StockLevel::Ok);

    let model = supply(0, 5, true);
    assert!(model.is_depleted());
    assert!(model.needs_replenishment());
}

#[test]
fn replenish_to_double_minimum_only_raises_stock() {
    let action = SupplyAction::ReplenishToDoubleMinimum;
    assert_eq!(
        action.apply(&supply(3, 10, true)),
        Some(SupplyChange {
            quantity_on_hand: 20,
            active: true
        })
    );
    assert_eq!(action.apply(&supply(20, 10, true)), None);
    assert_eq!(action.apply(&supply(35, 10, true)), None);
}

#[test]
fn add_actions_increment_stock() {
    assert_eq!(
        SupplyAction::Add10.apply(&supply(7, 5, false)).map(|c| c.quantity_on_hand),
        Some(17)
    );
    assert_eq!(
        SupplyAction::Add50.apply(&supply(0, 5, true)).map(|c| c.quantity_on_hand),
        Some(50)
    );
    assert_eq!(
        SupplyAction::Add10.apply(&supply(i32::MAX, 5, true)).map(|c| c.quantity_on_hand),
        Some(i32::MAX)
    );
}

#[test]
fn deactivate_depleted_leaves_stocked_supplies_alone() {
    let action = SupplyAction::DeactivateDepleted;
    assert_eq!(
        action.apply(&supply(0, 5, true)),
        Some(SupplyChange {
            quantity_on_hand: 0,
            active: false
        })
    );
    assert_eq!(action.apply(&supply(1, 5, true)), None);
    assert_eq!(action.apply(&supply(0, 5, false)), None);
}

#[test]
fn supply_actions_deserialize_from_their_names() {
    for action in SupplyAction::ALL {
        let parsed: SupplyAction =
            serde_json::from_value(serde_json::Value::String(action.name().into()))
                .expect("known action");
        assert_eq!(parsed, action);
    }
}
