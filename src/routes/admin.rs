use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::{
        admin::{AdminCarQuery, CreateHashtagRequest},
        cars::CarList,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::{Car, Hashtag},
    response::ApiResponse,
    routes::extract::{JsonBody, PathId},
    services::{admin_service, hashtag_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/admin/cars", get(list_cars))
        .route("/admin/cars/{id}/duplicate", post(duplicate_car))
        .route("/admin/hashtags", post(create_hashtag))
}

#[utoipa::path(
    get,
    path = "/admin/cars",
    params(AdminCarQuery),
    responses(
        (status = 200, description = "Search cars (admin only)", body = ApiResponse<CarList>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Unknown category or condition filter")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_cars(
    State(state): State<AppState>,
    user: AuthUser,
    Query(query): Query<AdminCarQuery>,
) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = admin_service::list_cars(&state, &user, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/admin/cars/{id}/duplicate",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 201, description = "Duplicated car", body = ApiResponse<Car>),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn duplicate_car(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<(StatusCode, Json<ApiResponse<Car>>)> {
    let resp = admin_service::duplicate_car(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/admin/hashtags",
    request_body = CreateHashtagRequest,
    responses(
        (status = 201, description = "Hashtag created", body = ApiResponse<Hashtag>),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Invalid or duplicate name")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_hashtag(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CreateHashtagRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Hashtag>>)> {
    let resp = hashtag_service::create_hashtag(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
