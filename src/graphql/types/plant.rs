use async_graphql::*;

use crate::graphql::client::ListedPlant;
use crate::graphql::types::Photo;

#[derive(SimpleObject, Clone, Debug)]
pub struct Plant {
    pub id: i32,
    pub name: String,
    pub photos: Vec<Photo>,
}

impl From<ListedPlant> for Plant {
    fn from(plant: ListedPlant) -> Self {
        Self {
            id: plant.id,
            name: plant.name,
            photos: plant.photos.into_iter().map(Photo::from).collect(),
        }
    }
}
