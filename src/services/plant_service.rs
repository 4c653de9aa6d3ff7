use chrono::{Local, NaiveDate};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, LoaderTrait,
    QueryFilter, QueryOrder, Set, TransactionTrait,
};
use serde::{Deserialize, Deserializer, Serialize};
use tracing::{debug, info};
use utoipa::ToSchema;

use crate::database::entities::{notes, photos, plants, waterings, HealthStatus};
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::services::{PhotoStorage, ValidationService};

/// Fields accepted when registering a plant
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewPlant {
    pub name: String,
    pub nickname: Option<String>,
    pub scientific: Option<String>,
    pub watering_frequency_days: Option<i32>,
    /// Defaults to today
    pub acquisition_date: Option<NaiveDate>,
    /// Defaults to `healthy`
    pub health_status: Option<HealthStatus>,
    pub parent_id: Option<i32>,
}

impl NewPlant {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            nickname: None,
            scientific: None,
            watering_frequency_days: None,
            acquisition_date: None,
            health_status: None,
            parent_id: None,
        }
    }
}

/// Partial update for a plant.
///
/// An absent field is left untouched. Nullable attributes use a nested
/// `Option` so that an explicit `null` clears the stored value.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct PlantUpdate {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub nickname: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<String>)]
    pub scientific: Option<Option<String>>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub watering_frequency_days: Option<Option<i32>>,
    pub acquisition_date: Option<NaiveDate>,
    pub health_status: Option<HealthStatus>,
    #[serde(default, deserialize_with = "present")]
    #[schema(value_type = Option<i32>)]
    pub parent_id: Option<Option<i32>>,
}

/// Marks a field as present, keeping a JSON `null` as `Some(None)`
fn present<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

impl PlantUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.nickname.is_none()
            && self.scientific.is_none()
            && self.watering_frequency_days.is_none()
            && self.acquisition_date.is_none()
            && self.health_status.is_none()
            && self.parent_id.is_none()
    }

    /// Copy every populated field onto `plant`
    pub fn apply_to(self, plant: &mut plants::ActiveModel) {
        if let Some(name) = self.name {
            plant.name = Set(name);
        }
        if let Some(nickname) = self.nickname {
            plant.nickname = Set(nickname);
        }
        if let Some(scientific) = self.scientific {
            plant.scientific = Set(scientific);
        }
        if let Some(days) = self.watering_frequency_days {
            plant.watering_frequency_days = Set(days);
        }
        if let Some(date) = self.acquisition_date {
            plant.acquisition_date = Set(date);
        }
        if let Some(status) = self.health_status {
            plant.health_status = Set(status);
        }
        if let Some(parent_id) = self.parent_id {
            plant.parent_id = Set(parent_id);
        }
    }
}

/// A plant together with its photos, most recent first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PlantDetail {
    pub id: i32,
    pub name: String,
    pub nickname: Option<String>,
    pub scientific: Option<String>,
    pub watering_frequency_days: Option<i32>,
    pub acquisition_date: NaiveDate,
    pub health_status: HealthStatus,
    pub parent_id: Option<i32>,
    pub photos: Vec<photos::Model>,
}

impl PlantDetail {
    pub fn from_parts(plant: plants::Model, photos: Vec<photos::Model>) -> Self {
        Self {
            id: plant.id,
            name: plant.name,
            nickname: plant.nickname,
            scientific: plant.scientific,
            watering_frequency_days: plant.watering_frequency_days,
            acquisition_date: plant.acquisition_date,
            health_status: plant.health_status,
            parent_id: plant.parent_id,
            photos,
        }
    }
}

/// The calendar day used for defaulted dates
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Load a plant or fail with NotFound. Usable inside a transaction.
pub async fn require_plant<C>(conn: &C, id: i32) -> ServiceResult<plants::Model>
where
    C: ConnectionTrait,
{
    plants::Entity::find_by_id(id)
        .one(conn)
        .await?
        .ok_or_else(|| ServiceError::not_found(EntityKind::Plant, id))
}

#[derive(Clone)]
pub struct PlantService {
    db: DatabaseConnection,
    storage: PhotoStorage,
}

impl PlantService {
    pub fn new(db: DatabaseConnection, storage: PhotoStorage) -> Self {
        Self { db, storage }
    }

    /// Register a plant, filling in the acquisition date and health status
    pub async fn create(&self, input: NewPlant) -> ServiceResult<plants::Model> {
        let name = ValidationService::validate_plant_name(&input.name)?;

        if let Some(parent_id) = input.parent_id {
            require_plant(&self.db, parent_id).await?;
        }

        let plant = plants::ActiveModel {
            name: Set(name),
            nickname: Set(input.nickname),
            scientific: Set(input.scientific),
            watering_frequency_days: Set(input.watering_frequency_days),
            acquisition_date: Set(input.acquisition_date.unwrap_or_else(today)),
            health_status: Set(input.health_status.unwrap_or_default()),
            parent_id: Set(input.parent_id),
            ..Default::default()
        };

        let plant = plant.insert(&self.db).await?;
        info!("Created plant {} ({})", plant.id, plant.name);
        Ok(plant)
    }

    /// All plants with their photos. Photos are fetched in one batched query.
    pub async fn list(&self) -> ServiceResult<Vec<PlantDetail>> {
        let plants = plants::Entity::find()
            .order_by_asc(plants::Column::Id)
            .all(&self.db)
            .await?;

        let photos = plants
            .load_many(
                photos::Entity::find()
                    .order_by_desc(photos::Column::Date)
                    .order_by_desc(photos::Column::Id),
                &self.db,
            )
            .await?;

        Ok(plants
            .into_iter()
            .zip(photos)
            .map(|(plant, photos)| PlantDetail::from_parts(plant, photos))
            .collect())
    }

    pub async fn get(&self, id: i32) -> ServiceResult<PlantDetail> {
        let plant = require_plant(&self.db, id).await?;

        let photos = photos::Entity::find()
            .filter(photos::Column::PlantId.eq(id))
            .order_by_desc(photos::Column::Date)
            .order_by_desc(photos::Column::Id)
            .all(&self.db)
            .await?;

        Ok(PlantDetail::from_parts(plant, photos))
    }

    /// Plants propagated from `id`
    pub async fn children(&self, id: i32) -> ServiceResult<Vec<plants::Model>> {
        require_plant(&self.db, id).await?;

        let children = plants::Entity::find()
            .filter(plants::Column::ParentId.eq(id))
            .order_by_asc(plants::Column::Id)
            .all(&self.db)
            .await?;

        Ok(children)
    }

    /// Apply only the fields present in `changes`
    pub async fn update(&self, id: i32, mut changes: PlantUpdate) -> ServiceResult<plants::Model> {
        let plant = require_plant(&self.db, id).await?;

        if changes.is_empty() {
            return Ok(plant);
        }

        if let Some(name) = changes.name.take() {
            changes.name = Some(ValidationService::validate_plant_name(&name)?);
        }

        if let Some(Some(parent_id)) = changes.parent_id {
            ValidationService::validate_parent(id, parent_id)?;
            require_plant(&self.db, parent_id).await?;
        }

        let mut active: plants::ActiveModel = plant.into();
        changes.apply_to(&mut active);

        let plant = active.update(&self.db).await?;
        debug!("Updated plant {}", plant.id);
        Ok(plant)
    }

    /// Remove a plant and everything it owns in one transaction.
    ///
    /// Children are kept with their parent link cleared. Photo files are
    /// archived after the commit.
    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let txn = self.db.begin().await?;

        require_plant(&txn, id).await?;

        let owned_photos = photos::Entity::find()
            .filter(photos::Column::PlantId.eq(id))
            .all(&txn)
            .await?;

        let removed_waterings = waterings::Entity::delete_many()
            .filter(waterings::Column::PlantId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        photos::Entity::delete_many()
            .filter(photos::Column::PlantId.eq(id))
            .exec(&txn)
            .await?;

        let removed_notes = notes::Entity::delete_many()
            .filter(notes::Column::PlantId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        let orphaned = plants::Entity::update_many()
            .col_expr(plants::Column::ParentId, Expr::value(Option::<i32>::None))
            .filter(plants::Column::ParentId.eq(id))
            .exec(&txn)
            .await?
            .rows_affected;

        plants::Entity::delete_by_id(id).exec(&txn).await?;

        txn.commit().await?;

        info!(
            "Deleted plant {} with {} waterings, {} photos, {} notes; {} children orphaned",
            id,
            removed_waterings,
            owned_photos.len(),
            removed_notes,
            orphaned
        );

        for photo in owned_photos {
            self.storage.archive_best_effort(&photo.path).await;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use tempfile::TempDir;

    async fn service() -> (PlantService, TempDir) {
        let root = TempDir::new().unwrap();
        let storage = PhotoStorage::new(root.path().join("photos"), root.path().join("deleted"));
        (PlantService::new(setup_test_db().await, storage), root)
    }

    #[tokio::test]
    async fn test_create_applies_defaults() {
        let (service, _root) = service().await;

        let plant = service.create(NewPlant::named("Fern")).await.unwrap();

        assert_eq!(plant.name, "Fern");
        assert_eq!(plant.acquisition_date, today());
        assert_eq!(plant.health_status, HealthStatus::Healthy);
        assert_eq!(plant.parent_id, None);
    }

    #[tokio::test]
    async fn test_create_with_missing_parent_fails() {
        let (service, _root) = service().await;

        let mut input = NewPlant::named("Cutting");
        input.parent_id = Some(99);
        let err = service.create(input).await.unwrap_err();

        assert!(err.is_not_found());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_partial_update_touches_only_present_fields() {
        let (service, _root) = service().await;
        let mut input = NewPlant::named("Monstera");
        input.nickname = Some("Monty".to_string());
        input.scientific = Some("Monstera deliciosa".to_string());
        let plant = service.create(input).await.unwrap();

        let changes: PlantUpdate =
            serde_json::from_str(r#"{"nickname": null, "health_status": "sick"}"#).unwrap();
        let updated = service.update(plant.id, changes).await.unwrap();

        assert_eq!(updated.nickname, None);
        assert_eq!(updated.health_status, HealthStatus::Sick);
        assert_eq!(updated.scientific.as_deref(), Some("Monstera deliciosa"));
        assert_eq!(updated.name, "Monstera");
    }

    #[tokio::test]
    async fn test_update_rejects_self_parent() {
        let (service, _root) = service().await;
        let plant = service.create(NewPlant::named("Pothos")).await.unwrap();

        let changes = PlantUpdate {
            parent_id: Some(Some(plant.id)),
            ..Default::default()
        };
        let err = service.update(plant.id, changes).await.unwrap_err();

        assert!(matches!(err, ServiceError::Validation(_)));
    }

    #[tokio::test]
    async fn test_delete_orphans_children() {
        let (service, _root) = service().await;
        let parent = service.create(NewPlant::named("Spider plant")).await.unwrap();
        let mut input = NewPlant::named("Spiderette");
        input.parent_id = Some(parent.id);
        let child = service.create(input).await.unwrap();

        assert_eq!(service.children(parent.id).await.unwrap().len(), 1);

        service.delete(parent.id).await.unwrap();

        let child = service.get(child.id).await.unwrap();
        assert_eq!(child.parent_id, None);
        assert!(service.get(parent.id).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_delete_removes_owned_records() {
        let (service, _root) = service().await;
        let plant = service.create(NewPlant::named("Jade")).await.unwrap();
        let day = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

        for text in ["Repotted", "New growth", "Pruned"] {
            notes::ActiveModel {
                plant_id: Set(plant.id),
                date: Set(day),
                note: Set(text.to_string()),
                ..Default::default()
            }
            .insert(&service.db)
            .await
            .unwrap();
        }
        waterings::ActiveModel {
            plant_id: Set(plant.id),
            date: Set(day),
            ..Default::default()
        }
        .insert(&service.db)
        .await
        .unwrap();

        service.delete(plant.id).await.unwrap();

        assert!(notes::Entity::find().all(&service.db).await.unwrap().is_empty());
        assert!(waterings::Entity::find().all(&service.db).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_plant_is_not_found() {
        let (service, _root) = service().await;
        let err = service.delete(12).await.unwrap_err();
        assert_eq!(err.to_string(), "Plant with id 12 not found.");
    }
}
