use sea_orm::{ColumnTrait, EntityTrait, QueryFilter, QueryOrder};
use uuid::Uuid;

use crate::{
    dto::profile::ProfileView,
    entity::{
        cars::{Column as CarCol, Entity as Cars},
        purchases::{Column as PurchaseCol, Entity as Purchases},
        user_profiles::{Column as ProfileCol, Entity as UserProfiles},
        users::Entity as Users,
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{profile_from_entity, purchase_from_entity, user_from_entity},
    response::ApiResponse,
    services::car_service::attach_images,
    state::AppState,
};

/// A user's public profile with the cars they own. Contact details and purchases are only
/// shown to the user themselves.
pub async fn get_profile(
    state: &AppState,
    viewer: &AuthUser,
    user_id: Uuid,
) -> AppResult<ApiResponse<ProfileView>> {
    let user = Users::find_by_id(user_id)
        .one(&state.orm)
        .await?
        .ok_or(AppError::NotFound)?;
    let own = viewer.user_id == user.id;

    let profile = UserProfiles::find()
        .filter(ProfileCol::UserId.eq(user.id))
        .one(&state.orm)
        .await?
        .map(profile_from_entity)
        .map(|mut profile| {
            if !own {
                profile.phone = None;
                profile.address = None;
            }
            profile
        });

    let cars = Cars::find()
        .filter(CarCol::OwnerId.eq(user.id))
        .order_by_desc(CarCol::Year)
        .order_by_asc(CarCol::Id)
        .all(&state.orm)
        .await?;
    let cars = attach_images(&state.orm, cars).await?;

    let purchases = if own {
        let rows = Purchases::find()
            .filter(PurchaseCol::BuyerId.eq(user.id))
            .order_by_desc(PurchaseCol::PurchasedAt)
            .all(&state.orm)
            .await?;
        Some(rows.into_iter().map(purchase_from_entity).collect())
    } else {
        None
    };

    Ok(ApiResponse::success(
        "Profile",
        ProfileView {
            user: user_from_entity(user),
            profile,
            cars,
            purchases,
        },
        None,
    ))
}
