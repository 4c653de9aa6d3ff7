use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::database::entities::notes;
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::services::pagination::Page;
use crate::services::plant_service::require_plant;
use crate::services::ValidationService;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewNote {
    pub plant_id: i32,
    pub date: NaiveDate,
    pub note: String,
}

/// Partial update for a note; absent fields are left as stored
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct NoteUpdate {
    pub plant_id: Option<i32>,
    pub date: Option<NaiveDate>,
    pub note: Option<String>,
}

impl NoteUpdate {
    pub fn is_empty(&self) -> bool {
        self.plant_id.is_none() && self.date.is_none() && self.note.is_none()
    }

    pub fn apply_to(self, note: &mut notes::ActiveModel) {
        if let Some(plant_id) = self.plant_id {
            note.plant_id = Set(plant_id);
        }
        if let Some(date) = self.date {
            note.date = Set(date);
        }
        if let Some(text) = self.note {
            note.note = Set(text);
        }
    }
}

async fn require_note(db: &DatabaseConnection, id: i32) -> ServiceResult<notes::Model> {
    notes::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Note, id))
}

#[derive(Clone)]
pub struct NoteService {
    db: DatabaseConnection,
}

impl NoteService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewNote) -> ServiceResult<notes::Model> {
        let text = ValidationService::validate_note_text(&input.note)?;
        require_plant(&self.db, input.plant_id).await?;

        let note = notes::ActiveModel {
            plant_id: Set(input.plant_id),
            date: Set(input.date),
            note: Set(text),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!("Added note {} to plant {}", note.id, note.plant_id);
        Ok(note)
    }

    pub async fn get(&self, id: i32) -> ServiceResult<notes::Model> {
        require_note(&self.db, id).await
    }

    /// One page of a plant's notes, most recent first
    pub async fn list_for_plant(&self, plant_id: i32, page: Page) -> ServiceResult<Vec<notes::Model>> {
        require_plant(&self.db, plant_id).await?;

        Ok(notes::Entity::find()
            .filter(notes::Column::PlantId.eq(plant_id))
            .order_by_desc(notes::Column::Date)
            .order_by_desc(notes::Column::Id)
            .offset(page.start)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    pub async fn update(&self, id: i32, mut changes: NoteUpdate) -> ServiceResult<notes::Model> {
        let note = require_note(&self.db, id).await?;

        if changes.is_empty() {
            return Ok(note);
        }

        if let Some(text) = changes.note.take() {
            changes.note = Some(ValidationService::validate_note_text(&text)?);
        }

        // Moving a note to another plant requires that plant to exist
        if let Some(plant_id) = changes.plant_id {
            if plant_id != note.plant_id {
                require_plant(&self.db, plant_id).await?;
            }
        }

        let mut active: notes::ActiveModel = note.into();
        changes.apply_to(&mut active);

        let note = active.update(&self.db).await?;
        debug!("Updated note {}", note.id);
        Ok(note)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let result = notes::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(EntityKind::Note, id));
        }

        info!("Deleted note {}", id);
        Ok(())
    }
}
