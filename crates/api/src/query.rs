//! Query parameter types for the paged listing endpoints.
//!
//! Every parameter is optional; absent values fall back to the catalog
//! defaults. Numbers are signed so that negative input reaches
//! [`PageRequest::new`] and is reported as an invalid page request.

use movieflix_core::error::CoreError;
use movieflix_core::paging::{
    PageRequest, Sort, DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, DEFAULT_SORT_BY, DEFAULT_SORT_DIR,
};
use serde::Deserialize;

/// `?pageNumber=&pageSize=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
}

impl PageParams {
    pub fn to_request(&self) -> Result<PageRequest, CoreError> {
        PageRequest::new(
            self.page_number.unwrap_or(DEFAULT_PAGE_NUMBER),
            self.page_size.unwrap_or(DEFAULT_PAGE_SIZE),
        )
    }
}

/// `?pageNumber=&pageSize=&sortBy=&dir=`
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SortedPageParams {
    pub page_number: Option<i64>,
    pub page_size: Option<i64>,
    pub sort_by: Option<String>,
    pub dir: Option<String>,
}

impl SortedPageParams {
    pub fn to_request(&self) -> Result<PageRequest, CoreError> {
        PageParams {
            page_number: self.page_number,
            page_size: self.page_size,
        }
        .to_request()
    }

    pub fn to_sort(&self) -> Result<Sort, CoreError> {
        Sort::parse(
            self.sort_by.as_deref().unwrap_or(DEFAULT_SORT_BY),
            self.dir.as_deref().unwrap_or(DEFAULT_SORT_DIR),
        )
    }
}

#[cfg(test)]
mod tests {
    use movieflix_core::paging::{SortDirection, SortField};

    use super::*;

    #[test]
    fn absent_params_use_defaults() {
        let params = SortedPageParams::default();
        let request = params.to_request().unwrap();
        assert_eq!(request.page_number(), 0);
        assert_eq!(request.page_size(), 10);
        assert_eq!(
            params.to_sort().unwrap(),
            Sort::new(SortField::Id, SortDirection::Asc)
        );
    }

    #[test]
    fn negative_page_number_is_rejected() {
        let params = PageParams {
            page_number: Some(-1),
            page_size: None,
        };
        assert!(matches!(
            params.to_request(),
            Err(CoreError::InvalidPageRequest(_))
        ));
    }
}
