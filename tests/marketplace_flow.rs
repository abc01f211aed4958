use std::path::PathBuf;

use apex_motors_api::{
    config::AppConfig,
    db::{create_pool, run_migrations},
    dto::{
        admin::{AdminCarQuery, CreateHashtagRequest},
        auth::{LoginRequest, RegisterRequest},
        cars::CarRequest,
        catalog::{CatalogQuery, CommentRequest},
    },
    entity::{
        AuditLogs, CarImages, Comments, UserProfiles,
        audit_logs::Column as AuditCol,
        car_images::Column as ImageCol,
        comments::Column as CommentCol,
        user_profiles::Column as ProfileCol,
        users::ActiveModel as UserActive,
    },
    error::AppError,
    media::DEFAULT_CAR_IMAGE,
    middleware::auth::{AuthUser, ROLE_ADMIN, ROLE_USER},
    services::{
        admin_service, auth_service, car_service, catalog_service, hashtag_service,
        profile_service, purchase_service,
    },
    state::AppState,
};
use sea_orm::ActiveValue::NotSet;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    Set, Statement,
};
use tokio::sync::Mutex;
use uuid::Uuid;

// Both flows share one database and the first one wipes it.
static DB_LOCK: Mutex<()> = Mutex::const_new(());

// Integration flow: list a car, browse and filter the catalog, comment with hashtags,
// then check ownership rules and the delete cascade.
#[tokio::test]
async fn listing_catalog_comment_and_delete_flow() -> anyhow::Result<()> {
    // Allow skipping when no DB is configured in the environment.
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!(
                "Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run integration flow tests."
            );
            return Ok(());
        }
    };

    let _guard = DB_LOCK.lock().await;
    let state = setup_state(&database_url).await?;
    truncate_all(&state).await?;

    let seller = auth_user(create_user(&state, "seller", ROLE_USER).await?, ROLE_USER);
    let visitor = auth_user(create_user(&state, "visitor", ROLE_USER).await?, ROLE_USER);
    let admin = auth_user(create_user(&state, "admin", ROLE_ADMIN).await?, ROLE_ADMIN);

    // Seller lists a Tesla with two images.
    let created = car_service::create_car(
        &state,
        &seller,
        CarRequest {
            brand: Some("Tesla".into()),
            model: Some("Model 3".into()),
            price: Some(42000),
            year: Some(2023),
            category: Some("sedan".into()),
            fuel_type: Some("Electric".into()),
            images: vec!["cars/tesla-front.jpg".into(), "cars/tesla-back.jpg".into()],
            ..Default::default()
        },
    )
    .await?;
    let tesla = created.data.expect("car data");
    assert_eq!(tesla.owner_id, Some(seller.user_id));
    assert_eq!(tesla.category, "Sedan");
    assert_eq!(tesla.images.len(), 2);

    // An older BMW that should sort after the Tesla.
    let bmw = car_service::create_car(
        &state,
        &seller,
        CarRequest {
            brand: Some("BMW".into()),
            model: Some("E30".into()),
            price: Some(15000),
            year: Some(1989),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("car data");
    let bmw_images: Vec<&str> = bmw.images.iter().map(|i| i.image.as_str()).collect();
    assert_eq!(bmw_images, vec![DEFAULT_CAR_IMAGE]);

    // Negative price is a field error.
    let err = car_service::create_car(
        &state,
        &seller,
        CarRequest {
            brand: Some("Audi".into()),
            model: Some("A4".into()),
            price: Some(-1),
            year: Some(2020),
            ..Default::default()
        },
    )
    .await
    .expect_err("negative price");
    match err {
        AppError::Validation(fields) => assert!(fields.contains("price")),
        other => panic!("unexpected error: {other:?}"),
    }

    // The seller's profile lists both cars.
    let profile = profile_service::get_profile(&state, &visitor, seller.user_id)
        .await?
        .data
        .expect("profile");
    assert_eq!(profile.cars.len(), 2);
    assert!(profile.purchases.is_none());

    // Catalog page 1: newest year first.
    let page = catalog_service::list_catalog(&state, CatalogQuery::default()).await?;
    let ids: Vec<Uuid> = page.data.expect("catalog").items.iter().map(|c| c.id).collect();
    assert_eq!(ids, vec![tesla.id, bmw.id]);
    let meta = page.meta.expect("meta");
    assert_eq!(meta.total, Some(2));
    assert_eq!(meta.total_pages, Some(1));

    // Case-insensitive search on brand.
    let filtered = catalog_service::list_catalog(
        &state,
        CatalogQuery {
            q: Some("tEsLa".into()),
            page: None,
        },
    )
    .await?;
    let items = filtered.data.expect("catalog").items;
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].id, tesla.id);

    // Search on category.
    let sedans = catalog_service::list_catalog(
        &state,
        CatalogQuery {
            q: Some("sedan".into()),
            page: None,
        },
    )
    .await?;
    assert_eq!(sedans.data.expect("catalog").items.len(), 1);

    // Page past the end.
    let err = catalog_service::list_catalog(
        &state,
        CatalogQuery {
            q: None,
            page: Some("2".into()),
        },
    )
    .await
    .expect_err("page 2 of 1");
    assert!(matches!(err, AppError::NotFound));

    // Someone else cannot edit or delete the listing.
    let err = car_service::update_car(
        &state,
        &visitor,
        tesla.id,
        CarRequest {
            price: Some(1),
            ..Default::default()
        },
    )
    .await
    .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));
    let err = car_service::delete_car(&state, &visitor, tesla.id)
        .await
        .expect_err("not the owner");
    assert!(matches!(err, AppError::Forbidden));

    // The owner can; unspecified fields are kept.
    let updated = car_service::update_car(
        &state,
        &seller,
        tesla.id,
        CarRequest {
            price: Some(39000),
            ..Default::default()
        },
    )
    .await?
    .data
    .expect("car data");
    assert_eq!(updated.price, 39000);
    assert_eq!(updated.model, "Model 3");
    assert!(updated.updated_at >= updated.created_at);

    // Admin creates a hashtag; the leading '#' is dropped.
    let fast = hashtag_service::create_hashtag(
        &state,
        &admin,
        CreateHashtagRequest {
            name: "#fast".into(),
        },
    )
    .await?
    .data
    .expect("hashtag");
    assert_eq!(fast.name, "fast");

    let err = hashtag_service::create_hashtag(
        &state,
        &visitor,
        CreateHashtagRequest {
            name: "slow".into(),
        },
    )
    .await
    .expect_err("not an admin");
    assert!(matches!(err, AppError::Forbidden));

    // Unknown hashtag ids are rejected and nothing is stored.
    let err = catalog_service::add_comment(
        &state,
        &visitor,
        tesla.id,
        CommentRequest {
            text: Some("Nice".into()),
            hashtags: vec![Uuid::new_v4()],
        },
    )
    .await
    .expect_err("unknown hashtag");
    match err {
        AppError::Validation(fields) => assert!(fields.contains("hashtags")),
        other => panic!("unexpected error: {other:?}"),
    }

    let detail = catalog_service::add_comment(
        &state,
        &visitor,
        tesla.id,
        CommentRequest {
            text: Some("<b>Quick</b> car".into()),
            hashtags: vec![fast.id],
        },
    )
    .await?
    .data
    .expect("detail");
    assert_eq!(detail.comments.len(), 1);
    assert_eq!(detail.comments[0].text, "<b>Quick</b> car");
    assert_eq!(detail.comments[0].hashtags[0].name, "fast");
    assert_eq!(
        detail.owner.as_ref().map(|o| o.id),
        Some(seller.user_id)
    );

    // Owners cannot buy their own car; others can.
    let err = purchase_service::purchase_car(&state, &seller, bmw.id)
        .await
        .expect_err("own car");
    assert!(matches!(err, AppError::BadRequest(_)));
    purchase_service::purchase_car(&state, &visitor, bmw.id).await?;
    let own = profile_service::get_profile(&state, &visitor, visitor.user_id)
        .await?
        .data
        .expect("profile");
    assert_eq!(own.purchases.map(|p| p.len()), Some(1));

    // Admin search and duplicate.
    let listed = admin_service::list_cars(
        &state,
        &admin,
        AdminCarQuery {
            q: Some("e30".into()),
            ..Default::default()
        },
    )
    .await?;
    assert_eq!(listed.data.expect("cars").items.len(), 1);
    let copy = admin_service::duplicate_car(&state, &admin, tesla.id)
        .await?
        .data
        .expect("copy");
    assert_eq!(copy.model, "Model 3 (Copy)");
    assert_eq!(copy.images.len(), 2);

    // Deleting removes images and comments with the car.
    car_service::delete_car(&state, &seller, tesla.id).await?;
    let err = catalog_service::car_detail(&state, tesla.id)
        .await
        .expect_err("deleted");
    assert!(matches!(err, AppError::NotFound));
    let images = CarImages::find()
        .filter(ImageCol::CarId.eq(tesla.id))
        .count(&state.orm)
        .await?;
    assert_eq!(images, 0);
    let comments = Comments::find()
        .filter(CommentCol::CarId.eq(tesla.id))
        .count(&state.orm)
        .await?;
    assert_eq!(comments, 0);

    // The delete was audited.
    let deletes = AuditLogs::find()
        .filter(AuditCol::Action.eq("car_delete"))
        .filter(AuditCol::UserId.eq(seller.user_id))
        .count(&state.orm)
        .await?;
    assert_eq!(deletes, 1);

    Ok(())
}

#[tokio::test]
async fn catalog_pages_hold_twelve_cars_newest_year_first() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run catalog tests.");
            return Ok(());
        }
    };

    let _guard = DB_LOCK.lock().await;
    let state = setup_state(&database_url).await?;
    truncate_all(&state).await?;

    let seller = auth_user(create_user(&state, "dealer", ROLE_USER).await?, ROLE_USER);
    // 14 cars with repeated and out-of-order years.
    let years = [2001, 2024, 2010, 2024, 1995, 2018, 2010, 2022, 2003, 2015, 2020, 1999, 2012, 2024];
    for (n, year) in years.iter().enumerate() {
        car_service::create_car(
            &state,
            &seller,
            CarRequest {
                brand: Some("Toyota".into()),
                model: Some(format!("Corolla {n}")),
                price: Some(10_000 + n as i64),
                year: Some(*year),
                ..Default::default()
            },
        )
        .await?;
    }

    let page = |n: &str| CatalogQuery {
        q: None,
        page: Some(n.to_string()),
    };

    let first = catalog_service::list_catalog(&state, page("1")).await?;
    let meta = first.meta.expect("meta");
    assert_eq!(meta.total, Some(14));
    assert_eq!(meta.per_page, Some(12));
    assert_eq!(meta.total_pages, Some(2));
    let first = first.data.expect("catalog").items;
    assert_eq!(first.len(), 12);

    let second = catalog_service::list_catalog(&state, page("2"))
        .await?
        .data
        .expect("catalog")
        .items;
    assert_eq!(second.len(), 2);

    let all_years: Vec<i32> = first.iter().chain(second.iter()).map(|c| c.year).collect();
    assert!(all_years.windows(2).all(|w| w[0] >= w[1]), "{all_years:?}");
    assert_eq!(all_years.first(), Some(&2024));
    assert_eq!(all_years.last(), Some(&1995));

    let mut ids: Vec<Uuid> = first.iter().chain(second.iter()).map(|c| c.id).collect();
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 14);

    let err = catalog_service::list_catalog(&state, page("3"))
        .await
        .expect_err("page 3 of 2");
    assert!(matches!(err, AppError::NotFound));

    Ok(())
}

#[tokio::test]
async fn register_and_login_flow() -> anyhow::Result<()> {
    let database_url = match std::env::var("TEST_DATABASE_URL")
        .or_else(|_| std::env::var("DATABASE_URL"))
    {
        Ok(url) => url,
        Err(_) => {
            eprintln!("Skipping test: set TEST_DATABASE_URL or DATABASE_URL to run auth tests.");
            return Ok(());
        }
    };

    let _guard = DB_LOCK.lock().await;
    let state = setup_state(&database_url).await?;
    let username = format!("buyer-{}", Uuid::new_v4().simple());

    let user = auth_service::register_user(&state, register_request(&username))
        .await?
        .data
        .expect("user");
    assert_eq!(user.role, ROLE_USER);

    let profiles = UserProfiles::find()
        .filter(ProfileCol::UserId.eq(user.id))
        .count(&state.orm)
        .await?;
    assert_eq!(profiles, 1);

    let err = auth_service::register_user(&state, register_request(&username))
        .await
        .expect_err("duplicate username");
    match err {
        AppError::Validation(fields) => assert!(fields.contains("username")),
        other => panic!("unexpected error: {other:?}"),
    }

    let login = auth_service::login_user(
        &state,
        LoginRequest {
            username: username.clone(),
            password: "correct-horse".into(),
        },
    )
    .await?
    .data
    .expect("token");
    assert!(login.token.starts_with("Bearer "));

    let err = auth_service::login_user(
        &state,
        LoginRequest {
            username,
            password: "wrong-password".into(),
        },
    )
    .await
    .expect_err("bad password");
    assert!(matches!(err, AppError::BadRequest(_)));

    Ok(())
}

fn register_request(username: &str) -> RegisterRequest {
    RegisterRequest {
        username: username.to_string(),
        password: "correct-horse".into(),
        password_confirm: "correct-horse".into(),
        favorite_brand: Some("Tesla".into()),
        ..Default::default()
    }
}

async fn setup_state(database_url: &str) -> anyhow::Result<AppState> {
    let pool = create_pool(database_url).await?;
    let config = AppConfig {
        database_url: database_url.to_string(),
        host: "127.0.0.1".into(),
        port: 0,
        jwt_secret: "flow-test-secret".into(),
        jwt_ttl_hours: 1,
        media_root: PathBuf::from("media"),
    };
    let state = AppState::new(pool, config);
    run_migrations(&state.orm).await?;
    Ok(state)
}

fn auth_user(user_id: Uuid, role: &str) -> AuthUser {
    AuthUser {
        user_id,
        role: role.to_string(),
    }
}

async fn create_user(state: &AppState, prefix: &str, role: &str) -> anyhow::Result<Uuid> {
    let id = Uuid::new_v4();
    UserActive {
        id: Set(id),
        username: Set(format!("{prefix}-{}", id.simple())),
        email: Set(None),
        password_hash: Set("hash".into()),
        role: Set(role.to_string()),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await?;
    Ok(id)
}

async fn truncate_all(state: &AppState) -> anyhow::Result<()> {
    state
        .orm
        .execute(Statement::from_string(
            state.orm.get_database_backend(),
            "TRUNCATE comment_hashtags, comments, car_images, purchases, cars, hashtags, user_profiles, users, audit_logs CASCADE",
        ))
        .await?;
    Ok(())
}
