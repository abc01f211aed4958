use apex_motors_api::{
    config::AppConfig,
    db::{create_pool, orm_from_pool, run_migrations},
    media::DEFAULT_CAR_IMAGE,
    services::auth_service::hash_password,
};
use uuid::Uuid;

struct SeedCar {
    brand: &'static str,
    model: &'static str,
    price: i64,
    category: &'static str,
    year: i32,
    fuel_type: &'static str,
    horsepower: i32,
}

const CARS: &[SeedCar] = &[
    SeedCar {
        brand: "Tesla",
        model: "Model S Plaid",
        price: 89990,
        category: "Sedan",
        year: 2024,
        fuel_type: "Electric",
        horsepower: 1020,
    },
    SeedCar {
        brand: "BMW",
        model: "M4 Competition",
        price: 78600,
        category: "Coupe",
        year: 2023,
        fuel_type: "Petrol",
        horsepower: 503,
    },
    SeedCar {
        brand: "Toyota",
        model: "Land Cruiser",
        price: 57200,
        category: "SUV",
        year: 2021,
        fuel_type: "Diesel",
        horsepower: 305,
    },
];

const HASHTAGS: &[&str] = &["fast", "family", "classic", "electric", "offroad"];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url).await?;
    // Ensure migrations are applied.
    run_migrations(&orm_from_pool(pool.clone())).await?;

    let admin_id = ensure_user(&pool, "admin", "admin12345", "admin").await?;
    let user_id = ensure_user(&pool, "driver", "driver12345", "user").await?;
    seed_hashtags(&pool).await?;
    seed_cars(&pool, user_id).await?;

    println!("Seed completed. Admin ID: {admin_id}, User ID: {user_id}");
    Ok(())
}

async fn ensure_user(
    pool: &sqlx::PgPool,
    username: &str,
    password: &str,
    role: &str,
) -> anyhow::Result<Uuid> {
    let password_hash = hash_password(password)?;

    let (user_id,): (Uuid,) = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, password_hash, role)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (username) DO UPDATE SET role = EXCLUDED.role
        RETURNING id
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(username)
    .bind(format!("{username}@example.com"))
    .bind(password_hash)
    .bind(role)
    .fetch_one(pool)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO user_profiles (id, user_id, favorite_brand)
        VALUES ($1, $2, 'Other')
        ON CONFLICT (user_id) DO NOTHING
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(user_id)
    .execute(pool)
    .await?;

    println!("Ensured user {username} (role={role})");
    Ok(user_id)
}

async fn seed_hashtags(pool: &sqlx::PgPool) -> anyhow::Result<()> {
    for name in HASHTAGS {
        sqlx::query("INSERT INTO hashtags (id, name) VALUES ($1, $2) ON CONFLICT (name) DO NOTHING")
            .bind(Uuid::new_v4())
            .bind(*name)
            .execute(pool)
            .await?;
    }

    println!("Seeded hashtags");
    Ok(())
}

async fn seed_cars(pool: &sqlx::PgPool, owner_id: Uuid) -> anyhow::Result<()> {
    for car in CARS {
        let existing: Option<(Uuid,)> = sqlx::query_as(
            "SELECT id FROM cars WHERE owner_id = $1 AND brand = $2 AND model = $3",
        )
        .bind(owner_id)
        .bind(car.brand)
        .bind(car.model)
        .fetch_optional(pool)
        .await?;
        if existing.is_some() {
            continue;
        }

        let car_id = Uuid::new_v4();
        sqlx::query(
            r#"
            INSERT INTO cars (id, owner_id, brand, model, price, category, year, fuel_type, horsepower)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(car_id)
        .bind(owner_id)
        .bind(car.brand)
        .bind(car.model)
        .bind(car.price)
        .bind(car.category)
        .bind(car.year)
        .bind(car.fuel_type)
        .bind(car.horsepower)
        .execute(pool)
        .await?;

        sqlx::query("INSERT INTO car_images (id, car_id, image) VALUES ($1, $2, $3)")
            .bind(Uuid::new_v4())
            .bind(car_id)
            .bind(DEFAULT_CAR_IMAGE)
            .execute(pool)
            .await?;
    }

    println!("Seeded cars");
    Ok(())
}
