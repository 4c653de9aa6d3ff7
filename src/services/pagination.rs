use serde::Deserialize;
use utoipa::IntoParams;

pub const PHOTOS_PAGE_LIMIT: u64 = 1;
pub const WATERINGS_PAGE_LIMIT: u64 = 3;
pub const NOTES_PAGE_LIMIT: u64 = 3;

/// SQLite binds offsets and limits as signed 64-bit integers
pub const MAX_PAGE_VALUE: u64 = i64::MAX as u64;

/// `?start=&limit=` as sent by clients; either may be omitted
#[derive(Debug, Clone, Copy, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Number of records to skip, most recent first
    pub start: Option<u64>,
    /// Maximum number of records to return
    pub limit: Option<u64>,
}

impl PageQuery {
    pub fn resolve(self, default_limit: u64) -> Page {
        Page {
            start: self.start.unwrap_or(0).min(MAX_PAGE_VALUE),
            limit: self.limit.unwrap_or(default_limit).min(MAX_PAGE_VALUE),
        }
    }
}

/// Offset window over a date-descending listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub start: u64,
    pub limit: u64,
}

impl Page {
    pub fn new(start: u64, limit: u64) -> Self {
        Self { start, limit }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_apply_per_listing() {
        let query = PageQuery::default();
        assert_eq!(query.resolve(PHOTOS_PAGE_LIMIT), Page::new(0, 1));
        assert_eq!(query.resolve(WATERINGS_PAGE_LIMIT), Page::new(0, 3));
    }

    #[test]
    fn test_explicit_values_win() {
        let query = PageQuery {
            start: Some(1),
            limit: Some(2),
        };
        assert_eq!(query.resolve(NOTES_PAGE_LIMIT), Page::new(1, 2));
    }

    #[test]
    fn test_values_beyond_sqlite_range_are_clamped() {
        let query = PageQuery {
            start: Some(u64::MAX),
            limit: Some(9_223_372_036_854_775_808),
        };
        assert_eq!(
            query.resolve(WATERINGS_PAGE_LIMIT),
            Page::new(MAX_PAGE_VALUE, MAX_PAGE_VALUE)
        );
    }
}
