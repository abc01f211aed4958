use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::LockType;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    dto::{
        cars::{CarDraft, CarList, CarRequest, EditCarForm, color_labels},
        forms::{FormSchema, car_form},
    },
    entity::{
        car_images::{ActiveModel as CarImageActive, Column as ImageCol, Entity as CarImages},
        cars::{ActiveModel as CarActive, Column as CarCol, Entity as Cars, Model as CarModel},
        comment_hashtags::{Column as CommentHashtagCol, Entity as CommentHashtags},
        comments::{Column as CommentCol, Entity as Comments},
        purchases::{Column as PurchaseCol, Entity as Purchases},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_owner},
    models::{Car, CarImage, car_from_entity, image_from_entity},
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn find_car<C: ConnectionTrait>(conn: &C, id: Uuid) -> AppResult<CarModel> {
    Cars::find_by_id(id)
        .one(conn)
        .await?
        .ok_or(AppError::NotFound)
}

/// Load the images of every car in one query, keeping the cars' order.
pub async fn attach_images<C: ConnectionTrait>(conn: &C, cars: Vec<CarModel>) -> AppResult<Vec<Car>> {
    if cars.is_empty() {
        return Ok(Vec::new());
    }

    let ids: Vec<Uuid> = cars.iter().map(|c| c.id).collect();
    let images = CarImages::find()
        .filter(ImageCol::CarId.is_in(ids))
        .order_by_asc(ImageCol::CreatedAt)
        .order_by_asc(ImageCol::Id)
        .all(conn)
        .await?;

    let mut by_car: HashMap<Uuid, Vec<CarImage>> = HashMap::new();
    for image in images {
        by_car
            .entry(image.car_id)
            .or_default()
            .push(image_from_entity(image));
    }

    Ok(cars
        .into_iter()
        .map(|car| {
            let images = by_car.remove(&car.id).unwrap_or_default();
            car_from_entity(car, images)
        })
        .collect())
}

pub async fn car_with_images<C: ConnectionTrait>(conn: &C, car: CarModel) -> AppResult<Car> {
    attach_images(conn, vec![car])
        .await?
        .into_iter()
        .next()
        .ok_or(AppError::NotFound)
}

pub async fn insert_images<C: ConnectionTrait>(
    conn: &C,
    car_id: Uuid,
    images: &[String],
) -> AppResult<()> {
    if images.is_empty() {
        return Ok(());
    }
    let rows = images.iter().map(|image| CarImageActive {
        id: Set(Uuid::new_v4()),
        car_id: Set(car_id),
        image: Set(image.clone()),
        created_at: NotSet,
    });
    CarImages::insert_many(rows).exec(conn).await?;
    Ok(())
}

/// Every car, newest listing first.
pub async fn list_all_cars(state: &AppState) -> AppResult<ApiResponse<CarList>> {
    let cars = Cars::find()
        .order_by_desc(CarCol::CreatedAt)
        .order_by_asc(CarCol::Id)
        .all(&state.orm)
        .await?;
    let total = cars.len() as i64;
    let items = attach_images(&state.orm, cars).await?;
    Ok(ApiResponse::success(
        "Cars",
        CarList { items },
        Some(Meta::new(1, total, total)),
    ))
}

pub fn add_car_form() -> ApiResponse<FormSchema> {
    ApiResponse::success("Car form", car_form(), None)
}

pub async fn create_car(
    state: &AppState,
    user: &AuthUser,
    payload: CarRequest,
) -> AppResult<ApiResponse<Car>> {
    let draft = payload.validate_create()?;

    let txn = state.orm.begin().await?;
    let car = new_car(Uuid::new_v4(), Some(user.user_id), &draft)
        .insert(&txn)
        .await?;
    insert_images(&txn, car.id, &draft.images).await?;
    let car = car_with_images(&txn, car).await?;
    txn.commit().await?;

    tracing::info!(car_id = %car.id, user_id = %user.user_id, "car created");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "car_create",
        "cars",
        serde_json::json!({ "car_id": car.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Car created",
        car,
        Some(Meta::empty()),
    ))
}

pub async fn edit_car_form(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<EditCarForm>> {
    let car = find_car(&state.orm, id).await?;
    ensure_owner(user, car.owner_id)?;
    let car = car_with_images(&state.orm, car).await?;
    Ok(ApiResponse::success(
        "Edit car",
        EditCarForm {
            car,
            form: car_form(),
        },
        None,
    ))
}

pub async fn update_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
    payload: CarRequest,
) -> AppResult<ApiResponse<Car>> {
    let txn = state.orm.begin().await?;

    let existing = Cars::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, existing.owner_id)?;
    let changes = payload.validate_update()?;

    let mut active: CarActive = existing.into();
    if let Some(brand) = changes.brand {
        active.brand = Set(brand.as_str().to_string());
    }
    if let Some(model) = changes.model {
        active.model = Set(model);
    }
    if let Some(description) = changes.description {
        active.description = Set(description);
    }
    if let Some(price) = changes.price {
        active.price = Set(price);
    }
    if let Some(category) = changes.category {
        active.category = Set(category.as_str().to_string());
    }
    if let Some(condition) = changes.condition {
        active.condition = Set(condition.as_str().to_string());
    }
    if let Some(year) = changes.year {
        active.year = Set(year);
    }
    if let Some(mileage) = changes.mileage {
        active.mileage = Set(mileage);
    }
    if let Some(color) = changes.color {
        active.color = Set(color.as_str().to_string());
    }
    if let Some(colors) = changes.available_colors {
        active.available_colors = Set(color_labels(&colors));
    }
    if let Some(engine) = changes.engine {
        active.engine = Set(engine);
    }
    if let Some(fuel_type) = changes.fuel_type {
        active.fuel_type = Set(fuel_type.as_str().to_string());
    }
    if let Some(drivetrain) = changes.drivetrain {
        active.drivetrain = Set(drivetrain.as_str().to_string());
    }
    if let Some(horsepower) = changes.horsepower {
        active.horsepower = Set(horsepower);
    }
    if let Some(torque) = changes.torque {
        active.torque = Set(torque);
    }
    if let Some(transmission) = changes.transmission {
        active.transmission = Set(transmission.as_str().to_string());
    }
    if let Some(top_speed) = changes.top_speed {
        active.top_speed = Set(top_speed);
    }
    if let Some(acceleration) = changes.acceleration {
        active.acceleration = Set(acceleration);
    }
    if let Some(document) = changes.document {
        active.document = Set(document);
    }
    active.updated_at = Set(Utc::now().into());

    let car = active.update(&txn).await?;
    insert_images(&txn, car.id, &changes.images).await?;
    let car = car_with_images(&txn, car).await?;
    txn.commit().await?;

    tracing::info!(car_id = %car.id, user_id = %user.user_id, "car updated");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "car_update",
        "cars",
        serde_json::json!({ "car_id": car.id, "images_added": changes.images.len() }),
    )
    .await;

    Ok(ApiResponse::success("Updated", car, Some(Meta::empty())))
}

pub async fn delete_car_confirmation(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Car>> {
    let car = find_car(&state.orm, id).await?;
    ensure_owner(user, car.owner_id)?;
    let car = car_with_images(&state.orm, car).await?;
    Ok(ApiResponse::success("Confirm delete", car, None))
}

/// Remove a car together with everything that hangs off it, in one transaction.
pub async fn delete_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let txn = state.orm.begin().await?;

    let car = Cars::find_by_id(id)
        .lock(LockType::Update)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    ensure_owner(user, car.owner_id)?;

    let comment_ids: Vec<Uuid> = Comments::find()
        .select_only()
        .column(CommentCol::Id)
        .filter(CommentCol::CarId.eq(id))
        .into_tuple()
        .all(&txn)
        .await?;
    if !comment_ids.is_empty() {
        CommentHashtags::delete_many()
            .filter(CommentHashtagCol::CommentId.is_in(comment_ids))
            .exec(&txn)
            .await?;
    }
    let comments = Comments::delete_many()
        .filter(CommentCol::CarId.eq(id))
        .exec(&txn)
        .await?;
    let images = CarImages::delete_many()
        .filter(ImageCol::CarId.eq(id))
        .exec(&txn)
        .await?;
    let purchases = Purchases::delete_many()
        .filter(PurchaseCol::CarId.eq(id))
        .exec(&txn)
        .await?;
    Cars::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;

    tracing::info!(car_id = %id, user_id = %user.user_id, "car deleted");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "car_delete",
        "cars",
        serde_json::json!({ "car_id": id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Deleted",
        serde_json::json!({
            "car_id": id,
            "images_removed": images.rows_affected,
            "comments_removed": comments.rows_affected,
            "purchases_removed": purchases.rows_affected,
        }),
        Some(Meta::empty()),
    ))
}

pub fn new_car(id: Uuid, owner_id: Option<Uuid>, draft: &CarDraft) -> CarActive {
    CarActive {
        id: Set(id),
        owner_id: Set(owner_id),
        brand: Set(draft.brand.as_str().to_string()),
        model: Set(draft.model.clone()),
        description: Set(draft.description.clone()),
        price: Set(draft.price),
        category: Set(draft.category.as_str().to_string()),
        condition: Set(draft.condition.as_str().to_string()),
        year: Set(draft.year),
        mileage: Set(draft.mileage),
        color: Set(draft.color.as_str().to_string()),
        available_colors: Set(color_labels(&draft.available_colors)),
        engine: Set(draft.engine.clone()),
        fuel_type: Set(draft.fuel_type.as_str().to_string()),
        drivetrain: Set(draft.drivetrain.as_str().to_string()),
        horsepower: Set(draft.horsepower),
        torque: Set(draft.torque),
        transmission: Set(draft.transmission.as_str().to_string()),
        top_speed: Set(draft.top_speed),
        acceleration: Set(draft.acceleration),
        document: Set(draft.document.clone()),
        created_at: NotSet,
        updated_at: NotSet,
    }
}
