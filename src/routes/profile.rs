use axum::{
    Json, Router,
    extract::State,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::profile::ProfileView,
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::extract::PathId,
    services::profile_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/profile/{user_id}", get(get_profile))
}

#[utoipa::path(
    get,
    path = "/profile/{user_id}",
    params(
        ("user_id" = Uuid, Path, description = "User ID")
    ),
    responses(
        (status = 200, description = "Profile and owned cars", body = ApiResponse<ProfileView>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "User not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn get_profile(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(user_id): PathId,
) -> AppResult<Json<ApiResponse<ProfileView>>> {
    let resp = profile_service::get_profile(&state, &user, user_id).await?;
    Ok(Json(resp))
}
