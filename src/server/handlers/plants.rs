use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use tracing::debug;

use crate::database::entities::{notes, photos, plants, waterings};
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::{
    NewPlant, PageQuery, PlantDetail, PlantUpdate, NOTES_PAGE_LIMIT, PHOTOS_PAGE_LIMIT,
    WATERINGS_PAGE_LIMIT,
};

#[utoipa::path(
    post,
    path = "/plants",
    request_body = NewPlant,
    responses(
        (status = 200, description = "Plant created", body = plants::Model),
        (status = 400, description = "Invalid plant name"),
        (status = 404, description = "Parent plant not found")
    )
)]
pub async fn create_plant(
    State(state): State<AppState>,
    Json(payload): Json<NewPlant>,
) -> Result<Json<plants::Model>, ApiError> {
    let plant = state.plant_service().create(payload).await?;
    Ok(Json(plant))
}

#[utoipa::path(
    get,
    path = "/plants",
    responses(
        (status = 200, description = "All plants with their photos", body = [PlantDetail])
    )
)]
pub async fn list_plants(State(state): State<AppState>) -> Result<Json<Vec<PlantDetail>>, ApiError> {
    let plants = state.plant_service().list().await?;
    debug!("Listing {} plants", plants.len());
    Ok(Json(plants))
}

#[utoipa::path(
    get,
    path = "/plants/{id}",
    params(
        ("id" = i32, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Plant found", body = PlantDetail),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn get_plant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<PlantDetail>, ApiError> {
    let plant = state.plant_service().get(id).await?;
    Ok(Json(plant))
}

#[utoipa::path(
    patch,
    path = "/plants/{id}",
    params(
        ("id" = i32, Path, description = "Plant ID")
    ),
    request_body = PlantUpdate,
    responses(
        (status = 200, description = "Plant updated", body = plants::Model),
        (status = 404, description = "Plant or new parent not found")
    )
)]
pub async fn update_plant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<PlantUpdate>,
) -> Result<Json<plants::Model>, ApiError> {
    let plant = state.plant_service().update(id, payload).await?;
    Ok(Json(plant))
}

#[utoipa::path(
    delete,
    path = "/plants/{id}",
    params(
        ("id" = i32, Path, description = "Plant ID")
    ),
    responses(
        (status = 204, description = "Plant and its waterings, photos and notes deleted"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn delete_plant(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.plant_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[utoipa::path(
    get,
    path = "/plants/{id}/children",
    params(
        ("id" = i32, Path, description = "Plant ID")
    ),
    responses(
        (status = 200, description = "Plants propagated from this one", body = [plants::Model]),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn list_plant_children(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<Vec<plants::Model>>, ApiError> {
    let children = state.plant_service().children(id).await?;
    Ok(Json(children))
}

#[utoipa::path(
    get,
    path = "/plants/{id}/photos",
    params(
        ("id" = i32, Path, description = "Plant ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Most recent photos first (default limit 1)", body = [photos::Model]),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn list_plant_photos(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<photos::Model>>, ApiError> {
    let photos = state
        .photo_service()
        .list_for_plant(id, page.resolve(PHOTOS_PAGE_LIMIT))
        .await?;
    Ok(Json(photos))
}

#[utoipa::path(
    get,
    path = "/plants/{id}/waterings",
    params(
        ("id" = i32, Path, description = "Plant ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Most recent waterings first (default limit 3)", body = [waterings::Model]),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn list_plant_waterings(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<waterings::Model>>, ApiError> {
    let waterings = state
        .watering_service()
        .list_for_plant(id, page.resolve(WATERINGS_PAGE_LIMIT))
        .await?;
    Ok(Json(waterings))
}

#[utoipa::path(
    get,
    path = "/plants/{id}/notes",
    params(
        ("id" = i32, Path, description = "Plant ID"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Most recent notes first (default limit 3)", body = [notes::Model]),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn list_plant_notes(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(page): Query<PageQuery>,
) -> Result<Json<Vec<notes::Model>>, ApiError> {
    let notes = state
        .note_service()
        .list_for_plant(id, page.resolve(NOTES_PAGE_LIMIT))
        .await?;
    Ok(Json(notes))
}
