use axum::{Json, extract::State};

use crate::{
    dto::admin::HashtagList, error::AppResult, response::ApiResponse,
    services::hashtag_service, state::AppState,
};

#[utoipa::path(
    get,
    path = "/hashtags",
    responses(
        (status = 200, description = "All hashtags by name", body = ApiResponse<HashtagList>)
    ),
    tag = "Catalog"
)]
pub async fn list_hashtags(
    State(state): State<AppState>,
) -> AppResult<Json<ApiResponse<HashtagList>>> {
    let resp = hashtag_service::list_hashtags(&state).await?;
    Ok(Json(resp))
}
