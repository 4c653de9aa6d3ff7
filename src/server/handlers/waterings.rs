use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::database::entities::waterings;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::NewWatering;

#[utoipa::path(
    post,
    path = "/waterings",
    request_body = NewWatering,
    responses(
        (status = 200, description = "Watering recorded", body = waterings::Model),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn create_watering(
    State(state): State<AppState>,
    Json(payload): Json<NewWatering>,
) -> Result<Json<waterings::Model>, ApiError> {
    let watering = state.watering_service().create(payload).await?;
    Ok(Json(watering))
}

#[utoipa::path(
    get,
    path = "/waterings",
    responses(
        (status = 200, description = "All waterings", body = [waterings::Model])
    )
)]
pub async fn list_waterings(
    State(state): State<AppState>,
) -> Result<Json<Vec<waterings::Model>>, ApiError> {
    let waterings = state.watering_service().list().await?;
    Ok(Json(waterings))
}

#[utoipa::path(
    delete,
    path = "/waterings/{id}",
    params(
        ("id" = i32, Path, description = "Watering ID")
    ),
    responses(
        (status = 204, description = "Watering deleted"),
        (status = 404, description = "Watering not found")
    )
)]
pub async fn delete_watering(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.watering_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
