use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::get,
};
use uuid::Uuid;

use crate::{
    dto::{
        cars::{CarRequest, EditCarForm},
        forms::FormSchema,
    },
    error::AppResult,
    middleware::auth::AuthUser,
    models::Car,
    response::ApiResponse,
    routes::extract::{JsonBody, PathId},
    services::car_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/car/add", get(add_car_form).post(create_car))
        .route("/car/edit/{id}", get(edit_car_form).post(update_car))
        .route("/car/delete/{id}", get(delete_car_confirmation).post(delete_car))
}

#[utoipa::path(
    get,
    path = "/car/add",
    responses(
        (status = 200, description = "Car form", body = ApiResponse<FormSchema>),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn add_car_form(_user: AuthUser) -> Json<ApiResponse<FormSchema>> {
    Json(car_service::add_car_form())
}

#[utoipa::path(
    post,
    path = "/car/add",
    request_body = CarRequest,
    responses(
        (status = 201, description = "Car created", body = ApiResponse<Car>),
        (status = 401, description = "Missing or invalid token"),
        (status = 422, description = "Invalid car fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn create_car(
    State(state): State<AppState>,
    user: AuthUser,
    JsonBody(payload): JsonBody<CarRequest>,
) -> AppResult<(StatusCode, Json<ApiResponse<Car>>)> {
    let resp = car_service::create_car(&state, &user, payload).await?;
    Ok((StatusCode::CREATED, Json(resp)))
}

#[utoipa::path(
    get,
    path = "/car/edit/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Current car with its form", body = ApiResponse<EditCarForm>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn edit_car_form(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<Json<ApiResponse<EditCarForm>>> {
    let resp = car_service::edit_car_form(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/car/edit/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    request_body = CarRequest,
    responses(
        (status = 200, description = "Updated car", body = ApiResponse<Car>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Car not found"),
        (status = 422, description = "Invalid car fields")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn update_car(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
    JsonBody(payload): JsonBody<CarRequest>,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = car_service::update_car(&state, &user, id, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/car/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Car pending deletion", body = ApiResponse<Car>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn delete_car_confirmation(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<Json<ApiResponse<Car>>> {
    let resp = car_service::delete_car_confirmation(&state, &user, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/car/delete/{id}",
    params(
        ("id" = Uuid, Path, description = "Car ID")
    ),
    responses(
        (status = 200, description = "Deleted car with its images and comments", body = ApiResponse<serde_json::Value>),
        (status = 403, description = "Not the owner"),
        (status = 404, description = "Car not found")
    ),
    security(("bearer_auth" = [])),
    tag = "Cars"
)]
pub async fn delete_car(
    State(state): State<AppState>,
    user: AuthUser,
    PathId(id): PathId,
) -> AppResult<Json<ApiResponse<serde_json::Value>>> {
    let resp = car_service::delete_car(&state, &user, id).await?;
    Ok(Json(resp))
}
