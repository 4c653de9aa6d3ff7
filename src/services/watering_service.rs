use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set,
};
use serde::Deserialize;
use tracing::info;
use utoipa::ToSchema;

use crate::database::entities::waterings;
use crate::errors::{EntityKind, ServiceError, ServiceResult};
use crate::services::pagination::Page;
use crate::services::plant_service::require_plant;

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct NewWatering {
    pub plant_id: i32,
    pub date: NaiveDate,
}

/// Waterings are append-only: there is no update
#[derive(Clone)]
pub struct WateringService {
    db: DatabaseConnection,
}

impl WateringService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, input: NewWatering) -> ServiceResult<waterings::Model> {
        require_plant(&self.db, input.plant_id).await?;

        let watering = waterings::ActiveModel {
            plant_id: Set(input.plant_id),
            date: Set(input.date),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        info!(
            "Recorded watering {} for plant {} on {}",
            watering.id, watering.plant_id, watering.date
        );
        Ok(watering)
    }

    pub async fn list(&self) -> ServiceResult<Vec<waterings::Model>> {
        Ok(waterings::Entity::find()
            .order_by_asc(waterings::Column::Id)
            .all(&self.db)
            .await?)
    }

    /// One page of a plant's waterings, most recent first
    pub async fn list_for_plant(
        &self,
        plant_id: i32,
        page: Page,
    ) -> ServiceResult<Vec<waterings::Model>> {
        require_plant(&self.db, plant_id).await?;

        Ok(waterings::Entity::find()
            .filter(waterings::Column::PlantId.eq(plant_id))
            .order_by_desc(waterings::Column::Date)
            .order_by_desc(waterings::Column::Id)
            .offset(page.start)
            .limit(page.limit)
            .all(&self.db)
            .await?)
    }

    pub async fn delete(&self, id: i32) -> ServiceResult<()> {
        let result = waterings::Entity::delete_by_id(id).exec(&self.db).await?;

        if result.rows_affected == 0 {
            return Err(ServiceError::not_found(EntityKind::Watering, id));
        }

        info!("Deleted watering {}", id);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::test_utils::setup_test_db;
    use crate::services::{NewPlant, PhotoStorage, PlantService};

    fn day(month: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, month, d).unwrap()
    }

    async fn plant(db: &DatabaseConnection, name: &str) -> i32 {
        PlantService::new(db.clone(), PhotoStorage::new("photos", "deleted_photos"))
            .create(NewPlant::named(name))
            .await
            .unwrap()
            .id
    }

    #[tokio::test]
    async fn test_create_for_missing_plant_creates_nothing() {
        let db = setup_test_db().await;
        let service = WateringService::new(db);

        let err = service
            .create(NewWatering {
                plant_id: 404,
                date: day(1, 1),
            })
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert!(service.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_page_is_date_descending_window() {
        let db = setup_test_db().await;
        let plant_id = plant(&db, "Fern").await;
        let service = WateringService::new(db);

        for d in [day(1, 1), day(3, 1), day(2, 1), day(4, 1)] {
            service
                .create(NewWatering { plant_id, date: d })
                .await
                .unwrap();
        }

        let page = service
            .list_for_plant(plant_id, Page::new(1, 2))
            .await
            .unwrap();

        let dates: Vec<NaiveDate> = page.iter().map(|w| w.date).collect();
        assert_eq!(dates, vec![day(3, 1), day(2, 1)]);
    }

    #[tokio::test]
    async fn test_listing_for_missing_plant_is_not_found() {
        let db = setup_test_db().await;
        let service = WateringService::new(db);

        let err = service
            .list_for_plant(5, Page::new(0, 3))
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Plant with id 5 not found.");
    }

    #[tokio::test]
    async fn test_delete_missing_watering() {
        let db = setup_test_db().await;
        let service = WateringService::new(db);

        let err = service.delete(8).await.unwrap_err();

        assert_eq!(err.to_string(), "Watering with id 8 not found.");
    }
}
