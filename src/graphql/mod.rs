//! Read-only GraphQL view over the REST plant listing.
//!
//! The resolvers hold no database handle; they fetch `GET /plants` from the
//! running API and reshape the result.

pub mod client;
pub mod context;
pub mod queries;
pub mod schema;
pub mod types;

pub use client::PlantsClient;
pub use context::*;
pub use schema::*;
