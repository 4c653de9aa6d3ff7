use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::NaiveDate;
use utoipa::ToSchema;

use crate::database::entities::photos;
use crate::server::app::AppState;
use crate::server::error::ApiError;
use crate::services::NewPhoto;

/// Multipart form accepted by `POST /photos`
#[derive(ToSchema)]
#[allow(dead_code)]
pub struct PhotoUpload {
    plant_id: i32,
    /// `YYYY-MM-DD`
    #[schema(value_type = String, format = Date)]
    date: NaiveDate,
    /// Image bytes; the field may also be named `file`
    #[schema(value_type = String, format = Binary)]
    photo: Vec<u8>,
}

#[utoipa::path(
    post,
    path = "/photos",
    request_body(content = PhotoUpload, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Photo stored", body = photos::Model),
        (status = 400, description = "Missing or malformed form field"),
        (status = 404, description = "Plant not found")
    )
)]
pub async fn upload_photo(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<photos::Model>, ApiError> {
    let mut plant_id: Option<i32> = None;
    let mut date: Option<NaiveDate> = None;
    let mut file_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Invalid multipart body: {}", e)))?
    {
        let key = field.name().unwrap_or("").to_string();
        match key.as_str() {
            "plant_id" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                let parsed = raw
                    .trim()
                    .parse::<i32>()
                    .map_err(|_| ApiError::bad_request(format!("Invalid plant_id '{}'", raw)))?;
                plant_id = Some(parsed);
            }
            "date" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?;
                let parsed = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|_| ApiError::bad_request(format!("Invalid date '{}'", raw)))?;
                date = Some(parsed);
            }
            "photo" | "file" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::bad_request(e.to_string()))?
                    .to_vec();
                file_bytes = Some(bytes);
            }
            _ => {}
        }
    }

    let plant_id = plant_id.ok_or_else(|| ApiError::bad_request("Missing field 'plant_id'"))?;
    let date = date.ok_or_else(|| ApiError::bad_request("Missing field 'date'"))?;
    let file_bytes = file_bytes.ok_or_else(|| ApiError::bad_request("Missing field 'photo'"))?;

    let photo = state
        .photo_service()
        .create(NewPhoto { plant_id, date }, &file_bytes)
        .await?;
    Ok(Json(photo))
}

#[utoipa::path(
    get,
    path = "/photos",
    responses(
        (status = 200, description = "All photos", body = [photos::Model])
    )
)]
pub async fn list_photos(
    State(state): State<AppState>,
) -> Result<Json<Vec<photos::Model>>, ApiError> {
    let photos = state.photo_service().list().await?;
    Ok(Json(photos))
}

#[utoipa::path(
    delete,
    path = "/photos/{id}",
    params(
        ("id" = i32, Path, description = "Photo ID")
    ),
    responses(
        (status = 204, description = "Photo deleted and its file archived"),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn delete_photo(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state.photo_service().delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
