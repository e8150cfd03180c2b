//! Database backed flows. Skipped unless TEST_DATABASE_URL or DATABASE_URL
//! is set. Every test works on its own uniquely named rows, so they can run
//! in parallel against a shared database.

mod common;

use chrono::{NaiveDate, Utc};
use custom_shop::{
    admin::{OrderAction, SupplyAction},
    dto::{
        admin::{CategoryRequest, CreateProductRequest, OrderBulkRequest, SupplyBulkRequest},
        orders::UpdateOrderRequest,
        supplies::SupplyRequest,
    },
    entity::{
        Orders, Products, ReferenceImages,
        orders::{self, OrderStatus, PaymentStatus, Platform},
        products, reference_images, users,
    },
    error::AppError,
    media::ImageUpload,
    middleware::auth::{AuthUser, ROLE_ADMIN},
    routes::params::{CatalogQuery, OrderFilterQuery, SupplyListQuery},
    services::{
        admin_service,
        catalog_service::{self, CATALOG_PAGE_SIZE, FEATURED_LIMIT},
        order_service::{self, NewImage, NewOrder},
        storefront_service::{self, OrderSubmission},
        supply_service,
    },
    state::AppState,
};
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set,
    TransactionTrait, sea_query::Expr,
};
use serde_json::json;
use uuid::Uuid;

struct Fixture {
    state: AppState,
    admin: AuthUser,
    _media: tempfile::TempDir,
}

async fn fixture() -> anyhow::Result<Option<Fixture>> {
    let Some(url) = common::database_url() else {
        eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run database flows.");
        return Ok(None);
    };
    let media = tempfile::tempdir()?;
    let state = common::db_state(&url, media.path()).await?;

    let user = users::ActiveModel {
        id: Set(Uuid::new_v4()),
        email: Set(format!("staff-{}@example.com", Uuid::new_v4())),
        password_hash: Set("unused".into()),
        role: Set(ROLE_ADMIN.into()),
        created_at: Set(Utc::now().into()),
    }
    .insert(&state.orm)
    .await?;

    Ok(Some(Fixture {
        state,
        admin: AuthUser {
            user_id: user.id,
            role: user.role,
        },
        _media: media,
    }))
}

fn unique(prefix: &str) -> String {
    format!("{prefix} {}", Uuid::new_v4().simple())
}

fn money(units: i64) -> Decimal {
    Decimal::new(units * 100, 2)
}

async fn category(fx: &Fixture, name: &str) -> anyhow::Result<Uuid> {
    let category = admin_service::create_category(
        &fx.state,
        &fx.admin,
        CategoryRequest {
            name: name.into(),
            description: String::new(),
        },
    )
    .await?
    .data
    .expect("category");
    Ok(category.id)
}

async fn product_in(
    fx: &Fixture,
    category_id: Uuid,
    name: &str,
    base_price: Decimal,
    active: bool,
) -> anyhow::Result<Uuid> {
    let product = admin_service::create_product(
        &fx.state,
        &fx.admin,
        CreateProductRequest {
            category_id,
            name: name.into(),
            description: "Cotton tee".into(),
            base_price,
            active: Some(active),
            featured: None,
        },
    )
    .await?
    .data
    .expect("product");
    Ok(product.id)
}

async fn product(fx: &Fixture, base_price: Decimal) -> anyhow::Result<Uuid> {
    let category_id = category(fx, &unique("Category")).await?;
    product_in(fx, category_id, &unique("Tee"), base_price, true).await
}

fn catalog_query(q: Option<&str>, categoria: Option<&str>, page: Option<i64>) -> CatalogQuery {
    CatalogQuery {
        q: q.map(str::to_string),
        categoria: categoria.map(str::to_string),
        page,
    }
}

fn new_order(email: &str, description: &str) -> NewOrder {
    NewOrder {
        client_name: "Test Client".into(),
        email: email.into(),
        design_description: description.into(),
        ..NewOrder::default()
    }
}

async fn orders_for(fx: &Fixture, email: &str) -> anyhow::Result<u64> {
    Ok(Orders::find()
        .filter(orders::Column::Email.eq(email))
        .count(&fx.state.orm)
        .await?)
}

#[tokio::test]
async fn budget_is_estimated_on_creation() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };

    let order = order_service::create_order(
        &fx.state.orm,
        new_order(&format!("{}@example.com", Uuid::new_v4()), &"x".repeat(250)),
        &[],
    )
    .await?;
    assert_eq!(order.estimated_budget, Some(money(15_000)));
    assert_eq!(order.status, OrderStatus::Requested);
    assert_eq!(order.payment_status, PaymentStatus::Pending);

    let product_id = product(&fx, money(20_000)).await?;
    let images = [
        NewImage {
            path: "references/a.png".into(),
            caption: "one".into(),
        },
        NewImage {
            path: "references/b.png".into(),
            caption: "two".into(),
        },
    ];
    let order = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            product_id: Some(product_id),
            ..new_order(&format!("{}@example.com", Uuid::new_v4()), &"x".repeat(1000))
        },
        &images,
    )
    .await?;
    assert_eq!(order.estimated_budget, Some(money(66_000)));

    let stored = order_service::load_images(&fx.state.orm, order.id).await?;
    assert_eq!(stored.len(), 2);
    Ok(())
}

#[tokio::test]
async fn token_collisions_are_retried() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };

    let first = order_service::create_order(
        &fx.state.orm,
        new_order("collide@example.com", "first"),
        &[],
    )
    .await?;

    let taken = first.tracking_token.clone();
    let mut tokens = vec![taken.clone(), taken.clone()].into_iter();
    let second = order_service::create_order_with(
        &fx.state.orm,
        new_order("collide@example.com", "second"),
        &[],
        || tokens.next().unwrap_or_else(custom_shop::lifecycle::generate_token),
    )
    .await?;
    assert_ne!(second.tracking_token, taken);

    let mut calls = 0;
    let exhausted = order_service::create_order_with(
        &fx.state.orm,
        new_order("collide@example.com", "third"),
        &[],
        || {
            calls += 1;
            taken.clone()
        },
    )
    .await;
    assert!(matches!(exhausted, Err(AppError::Internal(_))));
    assert_eq!(calls, custom_shop::lifecycle::MAX_TOKEN_ATTEMPTS);
    Ok(())
}

#[tokio::test]
async fn tracking_requires_the_exact_token() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };

    let order = order_service::create_order(
        &fx.state.orm,
        new_order(&format!("{}@example.com", Uuid::new_v4()), "track me"),
        &[],
    )
    .await?;

    let tracked = storefront_service::track(&fx.state, &order.tracking_token)
        .await?
        .data
        .expect("tracking");
    assert_eq!(tracked.order.tracking_token, order.tracking_token);
    assert_eq!(tracked.status_label, "Requested");

    let prefix = &order.tracking_token[..9];
    assert!(matches!(
        storefront_service::track(&fx.state, prefix).await,
        Err(AppError::NotFound)
    ));
    assert!(order_service::find_by_token(&fx.state.orm, prefix).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn invalid_submission_writes_nothing() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());

    let result = storefront_service::submit_order(
        &fx.state,
        OrderSubmission {
            client_name: "No Description".into(),
            email: email.clone(),
            design_description: "  ".into(),
            images: vec![ImageUpload {
                field: "reference_image_1".into(),
                file_name: "a.png".into(),
                data: common::png_bytes(),
            }],
            ..OrderSubmission::default()
        },
    )
    .await;

    match result {
        Err(AppError::Validation(errors)) => assert!(errors.contains("design_description")),
        other => panic!("expected validation error, got {other:?}"),
    }
    assert_eq!(orders_for(&fx, &email).await?, 0);
    assert!(!fx.state.media.root().join("references").exists());
    Ok(())
}

#[tokio::test]
async fn submission_hands_off_to_a_single_read_confirmation() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());
    let product_id = product(&fx, money(12_000)).await?;

    let ticket = storefront_service::submit_order(
        &fx.state,
        OrderSubmission {
            client_name: "Ana".into(),
            email: email.clone(),
            product_id: product_id.to_string(),
            design_description: "Logo on the chest".into(),
            required_by: "2026-12-24".into(),
            images: vec![ImageUpload {
                field: "reference_image_1".into(),
                file_name: "logo.png".into(),
                data: common::png_bytes(),
            }],
            ..OrderSubmission::default()
        },
    )
    .await?;

    let confirmation = storefront_service::confirmation(&fx.state, Some(&ticket))
        .await?
        .and_then(|resp| resp.data)
        .expect("confirmation");
    assert_eq!(confirmation.order.client_name, "Ana");
    assert_eq!(confirmation.order.product_id, Some(product_id));
    assert_eq!(confirmation.images.len(), 1);
    assert_eq!(
        confirmation.images[0].caption,
        order_service::reference_caption(1)
    );
    assert!(fx.state.media.root().join(&confirmation.images[0].image).exists());
    assert_eq!(
        confirmation.tracking_url,
        format!("http://shop.test/track/{}", confirmation.order.tracking_token)
    );

    assert!(storefront_service::confirmation(&fx.state, Some(&ticket)).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn inactive_product_cannot_be_ordered() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());

    let result = storefront_service::submit_order(
        &fx.state,
        OrderSubmission {
            client_name: "Ana".into(),
            email: email.clone(),
            product_id: Uuid::new_v4().to_string(),
            design_description: "Anything".into(),
            ..OrderSubmission::default()
        },
    )
    .await;
    assert!(matches!(result, Err(AppError::Validation(_))));
    assert_eq!(orders_for(&fx, &email).await?, 0);
    Ok(())
}

#[tokio::test]
async fn bulk_order_actions_skip_ineligible_rows() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());

    let open = order_service::create_order(&fx.state.orm, new_order(&email, "open"), &[]).await?;
    let done = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            status: OrderStatus::Completed,
            ..new_order(&email, "done")
        },
        &[],
    )
    .await?;
    let missing = Uuid::new_v4();

    let result = order_service::bulk_action(
        &fx.state,
        &fx.admin,
        OrderBulkRequest {
            action: OrderAction::MarkApproved,
            ids: vec![open.id, done.id, missing, open.id],
        },
    )
    .await?
    .data
    .expect("result");
    assert_eq!(result.updated, 1);
    assert_eq!(result.skipped.len(), 2);
    assert!(result.skipped.contains(&done.id));
    assert!(result.skipped.contains(&missing));

    let approved = Orders::find_by_id(open.id).one(&fx.state.orm).await?.expect("order");
    assert_eq!(approved.status, OrderStatus::Approved);

    order_service::bulk_action(
        &fx.state,
        &fx.admin,
        OrderBulkRequest {
            action: OrderAction::MarkCompleted,
            ids: vec![open.id],
        },
    )
    .await?;
    let completed = Orders::find_by_id(open.id).one(&fx.state.orm).await?.expect("order");
    assert_eq!(completed.status, OrderStatus::Completed);
    assert_eq!(completed.payment_status, PaymentStatus::Paid);
    Ok(())
}

#[tokio::test]
async fn inline_edit_enforces_transitions() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let order = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            status: OrderStatus::InProgress,
            ..new_order(&format!("{}@example.com", Uuid::new_v4()), "edit me")
        },
        &[],
    )
    .await?;

    let patch = |value: serde_json::Value| match value {
        serde_json::Value::Object(map) => map,
        _ => unreachable!(),
    };

    let backward = order_service::inline_edit_order(
        &fx.state,
        &fx.admin,
        order.id,
        patch(json!({ "status": "requested" })),
    )
    .await;
    assert!(matches!(backward, Err(AppError::InvalidTransition { .. })));

    let not_editable = order_service::inline_edit_order(
        &fx.state,
        &fx.admin,
        order.id,
        patch(json!({ "client_name": "Someone else" })),
    )
    .await;
    assert!(matches!(not_editable, Err(AppError::BadRequest(_))));

    let cancelled = order_service::inline_edit_order(
        &fx.state,
        &fx.admin,
        order.id,
        patch(json!({ "status": "cancelled" })),
    )
    .await?
    .data
    .expect("order");
    assert_eq!(cancelled.status, OrderStatus::Cancelled);
    Ok(())
}

#[tokio::test]
async fn deleting_an_order_removes_its_images() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let order = order_service::create_order(
        &fx.state.orm,
        new_order(&format!("{}@example.com", Uuid::new_v4()), "with image"),
        &[NewImage {
            path: "references/missing.png".into(),
            caption: "ref".into(),
        }],
    )
    .await?;

    order_service::delete_order(&fx.state, &fx.admin, order.id).await?;
    let left = ReferenceImages::find()
        .filter(reference_images::Column::OrderId.eq(order.id))
        .count(&fx.state.orm)
        .await?;
    assert_eq!(left, 0);
    Ok(())
}

#[tokio::test]
async fn supplies_replenishment_flow() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };

    let supply = supply_service::create_supply(
        &fx.state,
        &fx.admin,
        SupplyRequest {
            name: unique("Ink"),
            supply_type: None,
            quantity_on_hand: Some(3),
            minimum_quantity: Some(10),
            unit: None,
            brand: Some("Acme".into()),
            color: None,
            unit_price: None,
            active: None,
        },
    )
    .await?
    .data
    .expect("supply");
    assert!(supply.needs_replenishment);

    let low = supply_service::list_supplies(
        &fx.state,
        &fx.admin,
        SupplyListQuery {
            needs_replenishment: Some(true),
            per_page: Some(100),
            ..SupplyListQuery::default()
        },
    )
    .await?;
    let total = low.meta.as_ref().and_then(|m| m.total).unwrap_or(0);
    assert!(total >= 1);

    let result = supply_service::bulk_action(
        &fx.state,
        &fx.admin,
        SupplyBulkRequest {
            action: SupplyAction::ReplenishToDoubleMinimum,
            ids: vec![supply.id],
        },
    )
    .await?
    .data
    .expect("result");
    assert_eq!(result.updated, 1);

    let refreshed = supply_service::get_supply(&fx.state, &fx.admin, supply.id)
        .await?
        .data
        .expect("supply");
    assert_eq!(refreshed.quantity_on_hand, 20);
    assert!(!refreshed.needs_replenishment);

    let invalid = supply_service::create_supply(
        &fx.state,
        &fx.admin,
        SupplyRequest {
            name: String::new(),
            supply_type: None,
            quantity_on_hand: Some(-1),
            minimum_quantity: None,
            unit: None,
            brand: None,
            color: None,
            unit_price: None,
            active: None,
        },
    )
    .await;
    match invalid {
        Err(AppError::Validation(errors)) => {
            assert!(errors.contains("name"));
            assert!(errors.contains("quantity_on_hand"));
        }
        other => panic!("expected validation error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn tracking_never_exposes_staff_fields() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());
    let order = order_service::create_order(&fx.state.orm, new_order(&email, "private"), &[]).await?;

    order_service::update_order(
        &fx.state,
        &fx.admin,
        order.id,
        UpdateOrderRequest {
            internal_notes: Some("Staff note: ask for a deposit first".into()),
            ..UpdateOrderRequest::default()
        },
    )
    .await?;

    let body = serde_json::to_value(storefront_service::track(&fx.state, &order.tracking_token).await?)?;
    let order_view = &body["data"]["order"];
    assert!(order_view.get("internal_notes").is_none(), "{body}");
    assert!(order_view.get("email").is_none(), "{body}");
    assert!(order_view.get("phone").is_none(), "{body}");
    assert!(!body.to_string().contains("Staff note"), "{body}");
    Ok(())
}

#[tokio::test]
async fn nullable_order_fields_can_be_cleared() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let product_id = product(&fx, money(9_000)).await?;
    let order = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            product_id: Some(product_id),
            required_by: NaiveDate::from_ymd_opt(2026, 12, 24),
            approved_budget: Some(money(18_000)),
            ..new_order(&format!("{}@example.com", Uuid::new_v4()), "clear me")
        },
        &[],
    )
    .await?;

    let untouched: UpdateOrderRequest = serde_json::from_value(json!({ "phone": "555 0100" }))?;
    order_service::update_order(&fx.state, &fx.admin, order.id, untouched).await?;
    let kept = Orders::find_by_id(order.id).one(&fx.state.orm).await?.expect("order");
    assert_eq!(kept.product_id, Some(product_id));
    assert_eq!(kept.approved_budget, Some(money(18_000)));

    let clear: UpdateOrderRequest = serde_json::from_value(json!({
        "product_id": null,
        "required_by": null,
        "approved_budget": null,
    }))?;
    order_service::update_order(&fx.state, &fx.admin, order.id, clear).await?;
    let cleared = Orders::find_by_id(order.id).one(&fx.state.orm).await?.expect("order");
    assert_eq!(cleared.product_id, None);
    assert_eq!(cleared.required_by, None);
    assert_eq!(cleared.approved_budget, None);
    assert_eq!(cleared.phone, "555 0100");
    Ok(())
}

#[tokio::test]
async fn duplicate_names_are_accepted() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let name = unique("Twin");
    let first = category(&fx, &name).await?;
    let second = category(&fx, &name).await?;
    assert_ne!(first, second);

    let a = product_in(&fx, first, &name, money(1_000), true).await?;
    let b = product_in(&fx, second, &name, money(1_000), true).await?;
    assert_ne!(a, b);
    Ok(())
}

#[tokio::test]
async fn catalog_lists_active_products_of_a_category() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let category_id = category(&fx, &unique("Catalog")).await?;
    for n in 0..=CATALOG_PAGE_SIZE {
        product_in(&fx, category_id, &format!("Item {n:02}"), money(1_000), true).await?;
    }
    let hidden = product_in(&fx, category_id, "Item hidden", money(1_000), false).await?;
    let id = category_id.to_string();

    let first = catalog_service::search(&fx.state.orm, &catalog_query(None, Some(&id), None)).await?;
    assert_eq!(first.products.len() as i64, CATALOG_PAGE_SIZE);
    assert_eq!(first.meta.total, Some(CATALOG_PAGE_SIZE + 1));
    assert_eq!(first.meta.total_pages, Some(2));
    assert_eq!(first.category.map(|c| c.id), Some(category_id));
    assert!(first.products.iter().all(|p| p.active && p.category_id == category_id));

    let second =
        catalog_service::search(&fx.state.orm, &catalog_query(None, Some(&id), Some(2))).await?;
    assert_eq!(second.products.len(), 1);
    assert!(second.products.iter().all(|p| p.id != hidden));

    let garbage =
        catalog_service::search(&fx.state.orm, &catalog_query(None, Some("not-a-uuid"), None)).await?;
    assert!(garbage.products.is_empty());
    assert_eq!(garbage.meta.total, Some(0));
    Ok(())
}

#[tokio::test]
async fn catalog_search_matches_plain_substrings() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let marker = Uuid::new_v4().simple().to_string();
    let category_id = category(&fx, &format!("Mugs {marker}")).await?;
    let mug = product_in(&fx, category_id, "Photo Mug", money(1_000), true).await?;
    let promo = product_in(&fx, category_id, "Promo 100% cotton", money(1_000), true).await?;
    product_in(&fx, category_id, "Retired Mug", money(1_000), false).await?;
    let id = category_id.to_string();

    // A category name match pulls in every active product of the category.
    let by_category = catalog_service::search(
        &fx.state.orm,
        &catalog_query(Some(&marker.to_uppercase()), None, None),
    )
    .await?;
    let mut found: Vec<Uuid> = by_category.products.iter().map(|p| p.id).collect();
    found.sort();
    let mut expected = vec![mug, promo];
    expected.sort();
    assert_eq!(found, expected);

    let by_name =
        catalog_service::search(&fx.state.orm, &catalog_query(Some("photo"), Some(&id), None)).await?;
    assert_eq!(by_name.products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![mug]);

    let percent =
        catalog_service::search(&fx.state.orm, &catalog_query(Some("100%"), Some(&id), None)).await?;
    assert_eq!(percent.products.iter().map(|p| p.id).collect::<Vec<_>>(), vec![promo]);

    for wildcard in ["_", "%", "10_", "\\"] {
        let result =
            catalog_service::search(&fx.state.orm, &catalog_query(Some(wildcard), Some(&id), None))
                .await?;
        assert!(result.products.is_empty(), "{wildcard:?} matched {:?}", result.products);
    }
    Ok(())
}

#[tokio::test]
async fn home_prefers_featured_products() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let category_id = category(&fx, &unique("Home")).await?;
    let shown = product_in(&fx, category_id, &unique("Shown"), money(1_000), true).await?;
    let retired = product_in(&fx, category_id, &unique("Retired"), money(1_000), false).await?;

    // Work inside a transaction that is rolled back, so the flags of other
    // rows are left alone.
    let txn = fx.state.orm.begin().await?;
    Products::update_many()
        .col_expr(products::Column::Featured, Expr::value(false))
        .exec(&txn)
        .await?;

    let fallback = catalog_service::featured_products(&txn).await?;
    assert!(!fallback.is_empty());
    assert!(fallback.len() as u64 <= FEATURED_LIMIT);
    assert!(fallback.iter().all(|p| p.active && !p.featured));

    Products::update_many()
        .col_expr(products::Column::Featured, Expr::value(true))
        .filter(products::Column::Id.is_in([shown, retired]))
        .exec(&txn)
        .await?;

    let featured = catalog_service::featured_products(&txn).await?;
    assert_eq!(featured.iter().map(|p| p.id).collect::<Vec<_>>(), vec![shown]);

    txn.rollback().await?;
    Ok(())
}

#[tokio::test]
async fn order_filter_combines_status_platform_and_dates() -> anyhow::Result<()> {
    let Some(fx) = fixture().await? else {
        return Ok(());
    };
    let email = format!("{}@example.com", Uuid::new_v4());
    let wanted = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            status: OrderStatus::Approved,
            platform: Platform::Instagram,
            ..new_order(&email, "instagram approved")
        },
        &[],
    )
    .await?;
    let other_platform = order_service::create_order(
        &fx.state.orm,
        NewOrder {
            status: OrderStatus::Approved,
            platform: Platform::Whatsapp,
            ..new_order(&email, "whatsapp approved")
        },
        &[],
    )
    .await?;

    let today = Utc::now().date_naive().format("%Y-%m-%d").to_string();
    let pairs = |raw: &[(&str, &str)]| -> Vec<(String, String)> {
        raw.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    };

    let query = OrderFilterQuery::from_pairs(&pairs(&[
        ("status", "approved,in_progress"),
        ("platform", "instagram"),
        ("date_from", today.as_str()),
        ("per_page", "100"),
    ]))?;
    let items = order_service::filter_orders(&fx.state, &fx.admin, query)
        .await?
        .data
        .expect("orders")
        .items;
    assert!(items.iter().any(|o| o.id == wanted.id));
    assert!(items.iter().all(|o| o.id != other_platform.id));
    assert!(items.iter().all(|o| o.platform == Platform::Instagram
        && matches!(o.status, OrderStatus::Approved | OrderStatus::InProgress)));

    let query = OrderFilterQuery::from_pairs(&pairs(&[("status", "cancelled"), ("per_page", "100")]))?;
    let items = order_service::filter_orders(&fx.state, &fx.admin, query)
        .await?
        .data
        .expect("orders")
        .items;
    assert!(items.iter().all(|o| o.id != wanted.id && o.status == OrderStatus::Cancelled));
    Ok(())
}
