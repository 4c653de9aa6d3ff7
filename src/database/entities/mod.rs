pub mod notes;
pub mod photos;
pub mod plants;
pub mod waterings;

pub use plants::HealthStatus;
