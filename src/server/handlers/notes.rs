use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};

use crate::database::entities::notes;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::{NewNote, NoteUpdate};

#[utoipa::path(
    post,
    path = "/notes",
    request_body = NewNote,
    responses(
        (status = 200, description = "Note created", body = notes::Model),
        (status = 400, description = "Note empty or too long"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn create_note(
    State(state): State<AppState>,
    Json(payload): Json<NewNote>,
) -> Result<Json<notes::Model>, ApiError> {
    let note = state.note_service().create(payload).await?;
    Ok(Json(note))
}

#[utoipa::path(
    get,
    path = "/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    responses(
        (status = 200, description = "Note found", body = notes::Model),
        (status = 404, description = "Note not found")
    )
)]
pub async fn get_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Json<notes::Model>, ApiError> {
    let note = state.note_service().get(id).await?;
    Ok(Json(note))
}

#[utoipa::path(
    patch,
    path = "/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    request_body = NoteUpdate,
    responses(
        (status = 200, description = "Note updated", body = notes::Model),
        (status = 404, description = "Note or target plant not found")
    )
)]
pub async fn update_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(payload): Json<NoteUpdate>,
) -> Result<Json<notes::Model>, ApiError> {
    let note = state.note_service().update(id, payload).await?;
    Ok(Json(note))
}

#[utoipa::path(
    delete,
    path = "/notes/{id}",
    params(
        ("id" = i32, Path, description = "Note ID")
    ),
    responses(
        (status = 204, description = "Note deleted"),
        (status = 404, description = "Note not found")
    )
)]
pub async fn delete_note(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.note_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
