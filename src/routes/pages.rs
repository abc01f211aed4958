use axum::{Json, extract::State};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    dto::cars::CarList,
    error::AppResult,
    response::{ApiResponse, Meta},
    services::car_service,
    state::AppState,
};

#[derive(Serialize, ToSchema)]
pub struct AboutData {
    pub name: String,
    pub description: String,
    pub version: String,
}

#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "All listed cars", body = ApiResponse<CarList>)
    ),
    tag = "Pages"
)]
pub async fn home(State(state): State<AppState>) -> AppResult<Json<ApiResponse<CarList>>> {
    let resp = car_service::list_all_cars(&state).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/about",
    responses(
        (status = 200, description = "About Apex Motors", body = ApiResponse<AboutData>)
    ),
    tag = "Pages"
)]
pub async fn about() -> Json<ApiResponse<AboutData>> {
    let data = AboutData {
        name: "Apex Motors".to_string(),
        description: "A marketplace for buying and selling performance and everyday cars."
            .to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };
    Json(ApiResponse::success("About", data, Some(Meta::empty())))
}
