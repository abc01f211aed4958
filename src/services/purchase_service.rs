use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, Set};
use uuid::Uuid;

use crate::{
    audit,
    entity::purchases::ActiveModel as PurchaseActive,
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Purchase, purchase_from_entity},
    response::{ApiResponse, Meta},
    services::car_service::find_car,
    state::AppState,
};

pub async fn purchase_car(
    state: &AppState,
    user: &AuthUser,
    car_id: Uuid,
) -> AppResult<ApiResponse<Purchase>> {
    let car = find_car(&state.orm, car_id).await?;
    if car.owner_id == Some(user.user_id) {
        return Err(AppError::BadRequest("You cannot purchase your own car".into()));
    }

    let purchase = PurchaseActive {
        id: Set(Uuid::new_v4()),
        car_id: Set(car.id),
        buyer_id: Set(user.user_id),
        purchased_at: NotSet,
    }
    .insert(&state.orm)
    .await?;

    tracing::info!(purchase_id = %purchase.id, car_id = %car.id, buyer_id = %user.user_id, "car purchased");
    audit::record(
        &state.pool,
        Some(user.user_id),
        "car_purchase",
        "purchases",
        serde_json::json!({ "purchase_id": purchase.id, "car_id": car.id }),
    )
    .await;

    Ok(ApiResponse::success(
        "Purchase recorded",
        purchase_from_entity(purchase),
        Some(Meta::empty()),
    ))
}
