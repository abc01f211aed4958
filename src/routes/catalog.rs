use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    routing::{get, post},
};
use uuid::Uuid;

use crate::{
    dto::catalog::{CarDetail, CatalogPage, CatalogQuery, CommentRequest},
    error::AppResult,
    middleware::auth::AuthUser,
    models::Purchase,
    response::ApiResponse,
    routes::extract::{JsonBody, PathId},
    services::{catalog_service, purchase_service},
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/catalog", get(list_catalog))
        .route("/catalog/{id}", get(car_detail).post(add_comment))
        .route("/catalog/{id}/purchase", post(purchase_car))
}

#[utoipa::path(
    get,
    path = "/catalog",
    params(CatalogQuery),
    responses(
        (status = 200, description = "One page of 12 cars, newest year first", body = ApiResponse<CatalogPage>),
        (status = 404, description = "Invalid or out-of-range page")
    ),
    tag = "Catalog"
)]
pub async fn list_catalog(
    State(state): State<AppState>,
    Query(query): Query<CatalogQuery>,
) -> AppResult<Json<ApiResponse<CatalogPage>>> {
    let resp = catalog_service::list_catalog(&state, query).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/catalog/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car with comments", body = ApiResponse<CarDetail>),
        (status = 404, description = "Car not found")
    ),
    tag = "Catalog"
)]
pub async fn car_detail(
    State(state): State<AppState>,
    PathId(id): PathId,
) -> AppResult<Json<ApiResponse<CarDetail>>> {
    let resp = catalog_service::car_detail(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/catalog/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = CommentRequest,
    responses(
        (status = 201, description = "Comment added; refreshed detail", body = ApiResponse<CarDetail>),
        (status = 401, description = "Missing or invalid token"),
        (status = 404, description = "Car not found"),
        (status = 422, description = "Invalid comment or unknown hashtag")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn add_comment(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<CommentRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<CarDetail>>)> {
    let resp = catalog_service::add_comment(&state, &user, id, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    post,
    path = "/catalog/{id}/purchase",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 201, description = "Purchase recorded", body = ApiResponse<Purchase>),
        (status = 400, description = "Buyer owns the car"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn purchase_car(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<(StatusCode, Json<ApiResponse<Purchase>>)> {
    let resp = purchase_service::purchase_car(&state, &user, id).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}
