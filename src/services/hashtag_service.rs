use sea_orm::ActiveValue::NotSet;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};
use uuid::Uuid;

use crate::{
    audit,
    dto::admin::{CreateHashtagRequest, HashtagList},
    entity::hashtags::{ActiveModel as HashtagActive, Column as HashtagCol, Entity as Hashtags},
    error::{AppError, AppResult},
    middleware::auth::{AuthUser, ensure_admin},
    models::{Hashtag, hashtag_from_entity},
    response::{ApiResponse, Meta},
    state::AppState,
};

const NAME_TAKEN: &str = "Hashtag with this name already exists.";

pub async fn list_hashtags(state: &AppState) -> AppResult<ApiResponse<HashtagList>> {
    let items = Hashtags::find()
        .order_by_asc(HashtagCol::Name)
        .all(&state.orm)
        .await?
        .into_iter()
        .map(hashtag_from_entity)
        .collect();
    Ok(ApiResponse::success("Hashtags", HashtagList { items }, None))
}

pub async fn create_hashtag(
    state: &AppState,
    user: &AuthUser,
    payload: CreateHashtagRequest,
) -> AppResult<ApiResponse<Hashtag>> {
    ensure_admin(user)?;
    let name = payload.validate()?;

    let existing = Hashtags::find()
        .filter(HashtagCol::Name.eq(name.as_str()))
        .one(&state.orm)
        .await?;
    if existing.is_some() {
        return Err(AppError::field("name", NAME_TAKEN));
    }

    let hashtag = HashtagActive {
        id: Set(Uuid::new_v4()),
        name: Set(name),
        created_at: NotSet,
    }
    .insert(&state.orm)
    .await
    .map_err(|err| match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::field("name", NAME_TAKEN),
        _ => AppError::OrmError(err),
    })?;

    audit::record(
        &state.pool,
        Some(user.user_id),
        "hashtag_create",
        "hashtags",
        serde_json::json!({ "hashtag_id": hashtag.id, "name": hashtag.name }),
    )
    .await;

    Ok(ApiResponse::success(
        "Hashtag created",
        hashtag_from_entity(hashtag),
        Some(Meta::empty()),
    ))
}
