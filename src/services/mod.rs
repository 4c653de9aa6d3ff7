pub mod note_service;
pub mod pagination;
pub mod photo_service;
pub mod photo_storage;
pub mod plant_service;
pub mod validation;
pub mod watering_service;

pub use note_service::*;
pub use pagination::*;
pub use photo_service::*;
pub use photo_storage::*;
pub use plant_service::*;
pub use validation::*;
pub use watering_service::*;
