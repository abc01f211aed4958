use sea_orm::ActiveValue::NotSet;
use sea_orm::sea_query::Expr;
use sea_orm::sea_query::extension::postgres::PgExpr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

use crate::{
    audit,
    choices::{Category, Condition as CarCondition},
    dto::{
        admin::{AdminCarQuery, CarSortBy},
        cars::CarList,
        catalog::like_pattern,
    },
    entity::{
        car_images::{Column as ImageCol, Entity as CarImages},
        cars::{ActiveModel as CarActive, Column as CarCol, Entity as Cars},
    },
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::Car,
    response::{ApiResponse, Meta},
    routes::params::SortOrder,
    services::car_service::{attach_images, car_with_images, insert_images},
    state::AppState,
};

const COPY_SUFFIX: &str = " (Copy)";
const MAX_MODEL: usize = 100;

pub async fn list_cars(
    state: &AppState,
    user: &AuthUser,
    query: AdminCarQuery,
) -> AppResult<ApiResponse<CarList>> {
    ensure_admin(user)?;
    let (page, limit, offset) = query.pagination().normalize();
    let mut condition = Condition::all();

    if let Some(search) = query.q.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        let pattern = like_pattern(search);
        condition = condition.add(
            Condition::any()
                .add(Expr::col(CarCol::Brand).ilike(pattern.clone()))
                .add(Expr::col(CarCol::Model).ilike(pattern.clone()))
                .add(Expr::col(CarCol::Description).ilike(pattern.clone()))
                .add(Expr::col(CarCol::Color).ilike(pattern.clone()))
                .add(Expr::col(CarCol::Engine).ilike(pattern)),
        );
    }

    if let Some(raw) = query.category.as_deref().filter(|s| !s.is_empty()) {
        let category = Category::parse(raw.trim())
            .ok_or_else(|| AppError::field("category", "Select a valid choice."))?;
        condition = condition.add(CarCol::Category.eq(category.as_str()));
    }

    if let Some(raw) = query.condition.as_deref().filter(|s| !s.is_empty()) {
        let car_condition = CarCondition::parse(raw.trim())
            .ok_or_else(|| AppError::field("condition", "Select a valid choice."))?;
        condition = condition.add(CarCol::Condition.eq(car_condition.as_str()));
    }

    if let Some(year) = query.year {
        condition = condition.add(CarCol::Year.eq(year));
    }

    let sort_col = match query.sort_by.unwrap_or(CarSortBy::Year) {
        CarSortBy::Year => CarCol::Year,
        CarSortBy::Price => CarCol::Price,
        CarSortBy::CreatedAt => CarCol::CreatedAt,
    };

    let mut finder = Cars::find().filter(condition);
    finder = match query.sort_order.unwrap_or(SortOrder::Desc) {
        SortOrder::Asc => finder.order_by_asc(sort_col),
        SortOrder::Desc => finder.order_by_desc(sort_col),
    };
    finder = finder.order_by_asc(CarCol::Id);

    let total = finder.clone().count(&state.orm).await? as i64;

    let cars = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(&state.orm)
        .await?;
    let items = attach_images(&state.orm, cars).await?;

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success("Cars", CarList { items }, Some(meta)))
}

/// Copy a listing and its image references. The copy keeps the original owner.
pub async fn duplicate_car(
    state: &AppState,
    user: &AuthUser,
    id: Uuid,
) -> AppResult<ApiResponse<Car>> {
    ensure_admin(user)?;

    let txn = state.orm.begin().await?;
    let original = Cars::find_by_id(id)
        .one(&txn)
        .await?
        .ok_or(AppError::NotFound)?;
    let images: Vec<String> = CarImages::find()
        .select_only()
        .column(ImageCol::Image)
        .filter(ImageCol::CarId.eq(id))
        .order_by_asc(ImageCol::CreatedAt)
        .order_by_asc(ImageCol::Id)
        .into_tuple()
        .all(&txn)
        .await?;

    let mut copy: CarActive = original.clone().into();
    copy.id = Set(Uuid::new_v4());
    copy.model = Set(copy_model_name(&original.model));
    copy.created_at = NotSet;
    copy.updated_at = NotSet;
    let copy = copy.insert(&txn).await?;
    insert_images(&txn, copy.id, &images).await?;
    let car = car_with_images(&txn, copy).await?;
    txn.commit().await?;

    tracing::info!(source_id = %id, car_id = %car.id, "car duplicated");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "car_duplicate",
        "cars",
        serde_json::json!({ "source_id": id, "car_id": car.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Car duplicated",
        car,
        Some(Meta::empty()),
    ))
}

/// Append the copy suffix, trimming the base so the result still fits the column.
fn copy_model_name(model: &str) -> String {
    let room = MAX_MODEL - COPY_SUFFIX.chars().count();
    let base: String = model.chars().take(room).collect();
    format!("{}{}", base.trim_end(), COPY_SUFFIX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_name_is_suffixed() {
        assert_eq!(copy_model_name("Model S"), "Model S (Copy)");
    }

    #[test]
    fn copy_name_fits_the_column() {
        let long = "x".repeat(MAX_MODEL);
        let name = copy_model_name(&long);
        assert_eq!(name.chars().count(), MAX_MODEL);
        assert!(name.ends_with(COPY_SUFFIX));
    }
}
