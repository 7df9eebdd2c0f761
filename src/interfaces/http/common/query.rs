//! Shared list query parameters

use serde::Deserialize;
use utoipa::IntoParams;

use crate::shared::search::filter_term;
use crate::shared::PageRequest;

/// `?page=&itemsPerPage=&filterName=`
///
/// Kept as raw strings; junk values fall back to defaults instead of
/// rejecting the request.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// Page number, starting at 1
    pub page: Option<String>,
    /// Page size; only a positive integer replaces the default
    pub items_per_page: Option<String>,
    /// Case-insensitive name prefix
    pub filter_name: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self, default_items_per_page: u64) -> PageRequest {
        PageRequest::from_query(
            self.page.as_deref(),
            self.items_per_page.as_deref(),
            default_items_per_page,
        )
    }

    pub fn filter(&self) -> Option<&str> {
        filter_term(self.filter_name.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_to_missing_values() {
        let query = ListQuery::default();
        let page = query.page_request(10).window(0);
        assert_eq!((page.page, page.items_per_page), (1, 10));
        assert_eq!(query.filter(), None);
    }

    #[test]
    fn values_are_read() {
        let query = ListQuery {
            page: Some("2".into()),
            items_per_page: Some("5".into()),
            filter_name: Some(" bug ".into()),
        };
        let page = query.page_request(10).window(12);
        assert_eq!((page.page, page.items_per_page, page.offset), (2, 5, 5));
        assert_eq!(query.filter(), Some("bug"));
    }
}
