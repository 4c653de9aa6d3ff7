use utoipa::OpenApi;

use crate::database::entities::{notes, photos, plants, waterings, HealthStatus};
use crate::server::handlers::{
    notes as note_handlers, photos as photo_handlers, plants as plant_handlers,
    waterings as watering_handlers,
};
use crate::services::{NewNote, NewPlant, NewWatering, NoteUpdate, PlantDetail, PlantUpdate};

/// OpenAPI document assembled from the `#[utoipa::path]` annotations on the handlers
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Conservatory API",
        description = "Houseplant records: plants, waterings, photos and notes"
    ),
    paths(
        plant_handlers::create_plant,
        plant_handlers::list_plants,
        plant_handlers::get_plant,
        plant_handlers::update_plant,
        plant_handlers::delete_plant,
        plant_handlers::list_plant_children,
        plant_handlers::list_plant_photos,
        plant_handlers::list_plant_waterings,
        plant_handlers::list_plant_notes,
        watering_handlers::create_watering,
        watering_handlers::list_waterings,
        watering_handlers::delete_watering,
        photo_handlers::upload_photo,
        photo_handlers::list_photos,
        photo_handlers::delete_photo,
        note_handlers::create_note,
        note_handlers::get_note,
        note_handlers::update_note,
        note_handlers::delete_note,
    ),
    components(schemas(
        plants::Model,
        waterings::Model,
        photos::Model,
        notes::Model,
        HealthStatus,
        NewPlant,
        PlantUpdate,
        PlantDetail,
        NewWatering,
        NewNote,
        NoteUpdate,
        photo_handlers::PhotoUpload,
    ))
)]
pub struct ApiDoc;
