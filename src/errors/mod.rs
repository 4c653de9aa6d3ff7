//! Domain error types for the plant record service
//!
//! Service operations return [`ServiceError`]. The HTTP layer maps each
//! variant onto a status code; see `server::error`.
//!
//! # Examples
//!
//! ```rust
//! use conservatory::errors::{EntityKind, ServiceError};
//!
//! let err = ServiceError::not_found(EntityKind::Plant, 7);
//! assert!(err.is_not_found());
//! assert_eq!(err.to_string(), "Plant with id 7 not found.");
//! ```

pub mod service;

pub use service::{EntityKind, ServiceError};

/// Result type alias for service operations
pub type ServiceResult<T> = Result<T, ServiceError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_service_result_alias() {
        let result: ServiceResult<i32> = Err(ServiceError::not_found(EntityKind::Note, 3));
        assert!(result.is_err());
    }
}
