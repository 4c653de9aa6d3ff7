use async_graphql::*;
use chrono::NaiveDate;

use crate::graphql::client::ListedPhoto;

#[derive(SimpleObject, Clone, Debug)]
pub struct Photo {
    pub id: i32,
    pub plant_id: i32,
    pub date: NaiveDate,
    pub path: String,
}

impl From<ListedPhoto> for Photo {
    fn from(photo: ListedPhoto) -> Self {
        Self {
            id: photo.id,
            plant_id: photo.plant_id,
            date: photo.date,
            path: photo.path,
        }
    }
}
