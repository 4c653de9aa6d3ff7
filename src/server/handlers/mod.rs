pub mod health;
pub mod notes;
pub mod photos;
pub mod plants;
pub mod waterings;
