pub mod photo;
pub mod plant;

pub use photo::*;
pub use plant::*;
