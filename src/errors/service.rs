use std::fmt;

use thiserror::Error;

/// The kinds of record the service stores
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EntityKind {
    Plant,
    Watering,
    Photo,
    Note,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            EntityKind::Plant => "Plant",
            EntityKind::Watering => "Watering",
            EntityKind::Photo => "Photo",
            EntityKind::Note => "Note",
        };
        f.write_str(name)
    }
}

/// Errors raised by the CRUD services
#[derive(Error, Debug)]
pub enum ServiceError {
    /// A record, or the plant it references, does not exist
    #[error("{entity} with id {id} not found.")]
    NotFound { entity: EntityKind, id: i32 },

    /// Payload passed shape checks but breaks a field rule
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ServiceError {
    pub fn not_found(entity: EntityKind, id: i32) -> Self {
        ServiceError::NotFound { entity, id }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ServiceError::Validation(message.into())
    }

    /// Check if this is a not found error (404)
    pub fn is_not_found(&self) -> bool {
        matches!(self, ServiceError::NotFound { .. })
    }

    /// Check if this is a client error (400-series)
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            ServiceError::NotFound { .. } | ServiceError::Validation(_)
        )
    }

    /// Get error code for API responses
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::NotFound { .. } => "not_found",
            ServiceError::Validation(_) => "validation_failed",
            ServiceError::Database(_) | ServiceError::Io(_) => "internal_error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_error() {
        let err = ServiceError::not_found(EntityKind::Watering, 42);
        assert_eq!(err.to_string(), "Watering with id 42 not found.");
        assert!(err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "not_found");
    }

    #[test]
    fn test_validation_error() {
        let err = ServiceError::validation("name must not be empty");
        assert!(!err.is_not_found());
        assert!(err.is_client_error());
        assert_eq!(err.error_code(), "validation_failed");
    }

    #[test]
    fn test_io_error_is_internal() {
        let err: ServiceError =
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied").into();
        assert!(!err.is_client_error());
        assert_eq!(err.error_code(), "internal_error");
    }
}
