//! Shared query parameter types for API handlers.

use serde::Deserialize;
use textsum_core::pagination::{ListOptions, SortDirection, SortField, MAX_LIMIT};
use validator::Validate;

/// Query parameters of `GET /api/history`
/// (`?page=&limit=&sortBy=&sortType=&title=`).
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    #[validate(range(min = 1, message = "page must be at least 1"))]
    pub page: Option<i64>,
    #[validate(range(min = 1, max = MAX_LIMIT, message = "limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    pub sort_by: Option<SortField>,
    pub sort_type: Option<SortDirection>,
    /// Case-insensitive substring of the title.
    pub title: Option<String>,
}

impl HistoryQuery {
    pub fn list_options(&self) -> ListOptions {
        ListOptions::from_parts(self.page, self.limit, self.sort_by, self.sort_type)
    }

    /// The title filter, ignoring blank input.
    pub fn title_filter(&self) -> Option<String> {
        self.title
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
    }
}

#[cfg(test)]
mod tests {
    use textsum_core::pagination::DEFAULT_LIMIT;

    use super::*;

    #[test]
    fn defaults_when_absent() {
        let q = HistoryQuery::default();
        assert!(q.validate().is_ok());
        let opts = q.list_options();
        assert_eq!(opts.page, 1);
        assert_eq!(opts.limit, DEFAULT_LIMIT);
        assert_eq!(opts.sort_by, SortField::CreatedAt);
        assert_eq!(opts.sort_direction, SortDirection::Desc);
    }

    #[test]
    fn limit_bounds_are_validated() {
        let zero = HistoryQuery {
            limit: Some(0),
            ..HistoryQuery::default()
        };
        assert!(zero.validate().is_err());

        let too_big = HistoryQuery {
            limit: Some(101),
            ..HistoryQuery::default()
        };
        assert!(too_big.validate().is_err());

        let max = HistoryQuery {
            limit: Some(100),
            ..HistoryQuery::default()
        };
        assert!(max.validate().is_ok());
    }

    #[test]
    fn page_zero_is_invalid() {
        let q = HistoryQuery {
            page: Some(0),
            ..HistoryQuery::default()
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn blank_title_is_no_filter() {
        let q = HistoryQuery {
            title: Some("   ".into()),
            ..HistoryQuery::default()
        };
        assert!(q.title_filter().is_none());
    }
}
