use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use tracing::info;

use crate::database::entities::photos;
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::services::pagination::Page;
use crate::services::plant_service::require_plant;
use crate::services::PhotoStorage;

/// Metadata sent alongside an uploaded image
#[derive(Debug, Clone)]
pub struct NewPhoto {
    pub plant_id: i32,
    pub date: NaiveDate,
}

#[derive(Clone)]
pub struct PhotoService {
    db: DatabaseConnection,
    storage: PhotoStorage,
}

impl PhotoService {
    pub fn new(db: DatabaseConnection, storage: PhotoStorage) -> Self {
        Self { db, storage }
    }

    /// Save the image under a name derived from the date and plant name,
    /// then record it.
    ///
    /// Two photos of the same plant on the same date share a file name: the
    /// later upload replaces the earlier file, and both records point at it.
    pub async fn create(&self, input: NewPhoto, bytes: &[u8]) -> ServiceResult<photos::Model> {
        let plant = require_plant(&self.db, input.plant_id).await?;

        let file_name = PhotoStorage::file_name_for(input.date, &plant.name);
        self.storage.store(&file_name, bytes).await?;

        let photo = photos::ActiveModel {
            plant_id: Set(plant.id),
            date: Set(input.date),
            path: Set(PhotoStorage::public_path(&file_name)),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Stored photo {} for plant {} at {} ({} bytes)",
            photo.id,
            plant.id,
            photo.path,
            bytes.len()
        );
        Ok(photo)
    }

    pub async fn list(&self) -> ServiceResult<Vec<photos::Model>> {
        Ok(photos::Entity::find()
            .order_by_asc(photos::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// One page of a plant's photos, most recent first
    pub async fn list_for_plant(&self, plant_id: i32, page: Page) -> ServiceResult<Vec<photos::Model>> {
        require_plant(&self.db, plant_id).await?;

        Ok(photos::Entity::find()
            .filter(photos::Column::PlantId.eq(plant_id))
            .order_by_desc(photos::Column::Date)
            .order_by_desc(photos::Column::Id)
            .offset(page.start)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    /// Delete the record, then try to archive its file.
    ///
    /// The record deletion is authoritative: a failed file move is logged
    /// and does not fail the call.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let photo = photos::Entity::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or_else(|| ServiceError::not_found(EntityKind::Photo, id))?;

        photos::Entity::delete_by_id(photo.id).exec(&self.db).await?;
        info!("Deleted photo {}", photo.id);

        self.storage.archive_best_effort(&photo.path).await;
        Ok(())
    }
}
