use crate::errors::{ServiceError, ServiceResult};

pub const MAX_PLANT_NAME_CHARS: usize = 30;
pub const MAX_NOTE_CHARS: usize = 300;

/// Field rules that the store enforces only loosely
pub struct ValidationService;

impl ValidationService {
    /// Trim and length-check a plant name
    pub fn validate_plant_name(name: &str) -> ServiceResult<String> {
        let trimmed = name.trim();

        if trimmed.is_empty() {
            return Err(ServiceError::validation("Plant name cannot be empty"));
        }

        if trimmed.chars().count() > MAX_PLANT_NAME_CHARS {
            return Err(ServiceError::validation(format!(
                "Plant name is too long (max {} characters)",
                MAX_PLANT_NAME_CHARS
            )));
        }

        Ok(trimmed.to_string())
    }

    /// Note text keeps its inner whitespace, only the length is checked
    pub fn validate_note_text(note: &str) -> ServiceResult<String> {
        if note.trim().is_empty() {
            return Err(ServiceError::validation("Note cannot be empty"));
        }

        if note.chars().count() > MAX_NOTE_CHARS {
            return Err(ServiceError::validation(format!(
                "Note is too long (max {} characters)",
                MAX_NOTE_CHARS
            )));
        }

        Ok(note.to_string())
    }

    pub fn validate_parent(plant_id: i32, parent_id: i32) -> ServiceResult<()> {
        if plant_id == parent_id {
            return Err(ServiceError::validation(format!(
                "Plant {} cannot be its own parent",
                plant_id
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plant_name_is_trimmed() {
        assert_eq!(
            ValidationService::validate_plant_name("  Fern ").unwrap(),
            "Fern"
        );
    }

    #[test]
    fn test_plant_name_limits() {
        assert!(ValidationService::validate_plant_name("   ").is_err());
        assert!(ValidationService::validate_plant_name(&"a".repeat(30)).is_ok());
        assert!(ValidationService::validate_plant_name(&"a".repeat(31)).is_err());
        // Counted in characters, not bytes
        assert!(ValidationService::validate_plant_name(&"é".repeat(30)).is_ok());
    }

    #[test]
    fn test_note_limits() {
        assert!(ValidationService::validate_note_text("").is_err());
        assert_eq!(
            ValidationService::validate_note_text(" repotted ").unwrap(),
            " repotted "
        );
        assert!(ValidationService::validate_note_text(&"x".repeat(301)).is_err());
    }

    #[test]
    fn test_self_parent_rejected() {
        assert!(ValidationService::validate_parent(4, 4).is_err());
        assert!(ValidationService::validate_parent(4, 5).is_ok());
    }
}
