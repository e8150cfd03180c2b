use custom_shop::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    middleware::auth::ROLE_ADMIN,
    services::auth_service::hash_password,
};
use rust_decimal::Decimal;
use uuid::Uuid;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm_from_pool(&pool)).await?;

    let email = std::env::var("SEED_ADMIN_EMAIL").unwrap_or_else(|_| "admin@example.com".into());
    let password = std::env::var("SEED_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".into());
    let admin_id = ensure_staff(&pool, &email, &password, ROLE_ADMIN).await?;

    seed_categories(&pool).await?;
    seed_products(&pool).await?;
    seed_supplies(&pool).await?;

    println!("Seed completed. Admin ID: {admin_id}");
    Ok(())
}

async fn ensure_staff(
    pool: &sqlx::PgPool,
    email: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password).map_err(|e| anyhow::anyhow!(e.to_string()))?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, email, password_hash, role)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT (email) DO UPDATE
            SET role = EXCLUDED.role, password_hash = EXCLUDED.password_hash
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(email)
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    println!("Ensured staff account {email} (role={role})");
    Ok(user_id)
}

async fn seed_categories(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    let categories = [
        ("T-Shirts", "Printed and embroidered shirts made to order"),
        ("Mugs", "Ceramic mugs with sublimated designs"),
        ("Stickers", "Vinyl die-cut stickers"),
        ("Tote Bags", "Canvas bags with screen printing"),
    ];

    for (name, description) in categories {
        sqlx::query(
            r#"
            INSERT INTO categories (id, name, description)
            SELECT $1, $2, $3
            WHERE NOT EXISTS (SELECT 1 FROM categories WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(description)
        .execute(pool)
        .await?;
    }

    println!("Seeded categories");
    Ok(())
}

async fn seed_products(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // (category, name, description, base price, featured)
    let products = [
        ("T-Shirts", "Classic Cotton Tee", "Your design on a heavyweight cotton tee", Decimal::new(1800000, 2), true),
        ("T-Shirts", "Embroidered Polo", "Logo embroidery on a pique polo", Decimal::new(3200000, 2), false),
        ("Mugs", "Photo Mug", "11 oz mug with a full-wrap print", Decimal::new(1200000, 2), true),
        ("Stickers", "Sticker Pack", "Ten die-cut stickers of your artwork", Decimal::new(600000, 2), false),
        ("Tote Bags", "Market Tote", "Heavy canvas tote with a one-color print", Decimal::new(1500000, 2), true),
    ];

    for (category, name, description, price, featured) in products {
        sqlx::query(
            r#"
            INSERT INTO products (id, category_id, name, description, base_price, featured)
            SELECT $1, c.id, $3, $4, $5, $6 FROM categories c
            WHERE c.name = $2 AND NOT EXISTS (SELECT 1 FROM products WHERE name = $3)
            LIMIT 1
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(category)
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(featured)
        .execute(pool)
        .await?;
    }

    println!("Seeded products");
    Ok(())
}

async fn seed_supplies(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    // (name, type, on hand, minimum, unit)
    let supplies = [
        ("White cotton tees M", "blank", 40, 10, "units"),
        ("White ceramic mugs", "blank", 4, 12, "units"),
        ("Sublimation ink black", "ink", 2, 1, "liters"),
        ("Glossy vinyl roll", "vinyl", 0, 2, "meters"),
        ("Kraft mailer boxes", "packaging", 25, 20, "units"),
    ];

    for (name, supply_type, quantity, minimum, unit) in supplies {
        sqlx::query(
            r#"
            INSERT INTO supplies (id, name, supply_type, quantity_on_hand, minimum_quantity, unit)
            SELECT $1, $2, $3, $4, $5, $6
            WHERE NOT EXISTS (SELECT 1 FROM supplies WHERE name = $2)
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(supply_type)
        .bind(quantity)
        .bind(minimum)
        .bind(unit)
        .execute(pool)
        .await?;
    }

    println!("Seeded supplies");
    Ok(())
}
