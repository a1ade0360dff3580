//! Page requests, sort keys, and the page envelope returned to clients.

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

pub const DEFAULT_PAGE_NUMBER: i64 = 0;

pub const DEFAULT_PAGE_SIZE: i64 = 10;

pub const DEFAULT_SORT_BY: &str = "id";

pub const DEFAULT_SORT_DIR: &str = "asc";

// ---------------------------------------------------------------------------
// PageRequest
// ---------------------------------------------------------------------------

/// A zero-based page number and a strictly positive page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page_number: i64,
    page_size: i64,
}

impl PageRequest {
    pub fn new(page_number: i64, page_size: i64) -> Result<Self, CoreError> {
        if page_number < 0 {
            return Err(CoreError::InvalidPageRequest(format!(
                "pageNumber must not be negative (got {page_number})"
            )));
        }
        if page_size <= 0 {
            return Err(CoreError::InvalidPageRequest(format!(
                "pageSize must be greater than zero (got {page_size})"
            )));
        }
        Ok(Self {
            page_number,
            page_size,
        })
    }

    pub fn page_number(&self) -> i64 {
        self.page_number
    }

    pub fn page_size(&self) -> i64 {
        self.page_size
    }

    /// Number of records to skip. Saturates instead of overflowing.
    pub fn offset(&self) -> i64 {
        self.page_number.saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page_number: DEFAULT_PAGE_NUMBER,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

// ---------------------------------------------------------------------------
// Sorting
// ---------------------------------------------------------------------------

/// The record attributes a page may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Director,
    Studio,
    ReleaseYear,
}

impl SortField {
    /// Column name in the `movies` table.
    pub fn column(self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Title => "title",
            Self::Director => "director",
            Self::Studio => "studio",
            Self::ReleaseYear => "release_year",
        }
    }
}

impl FromStr for SortField {
    type Err = CoreError;

    /// Accepts the wire name (`movieId`, `releaseYear`) as well as the short
    /// or column form (`id`, `release_year`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "id" | "movieId" => Ok(Self::Id),
            "title" => Ok(Self::Title),
            "director" => Ok(Self::Director),
            "studio" => Ok(Self::Studio),
            "releaseYear" | "release_year" => Ok(Self::ReleaseYear),
            other => Err(CoreError::InvalidSortField(format!(
                "'{other}' is not sortable. Must be one of: id, title, director, studio, releaseYear"
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// `asc` in any case is ascending; every other value is descending.
    pub fn from_param(dir: &str) -> Self {
        if dir.eq_ignore_ascii_case("asc") {
            Self::Asc
        } else {
            Self::Desc
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Parse the `sortBy` / `dir` query pair.
    pub fn parse(sort_by: &str, dir: &str) -> Result<Self, CoreError> {
        Ok(Self::new(sort_by.parse()?, SortDirection::from_param(dir)))
    }
}

impl Default for Sort {
    fn default() -> Self {
        Self::new(SortField::Id, SortDirection::Asc)
    }
}

// ---------------------------------------------------------------------------
// Page
// ---------------------------------------------------------------------------

/// One slice of the catalog plus the numbers a client needs to navigate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "movieDtos")]
    pub items: Vec<T>,
    pub page_number: i64,
    pub page_size: i64,
    pub total_elements: i64,
    pub total_pages: i64,
    pub is_last: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_elements: i64) -> Self {
        let total_pages = total_pages(total_elements, request.page_size());
        Self {
            items,
            page_number: request.page_number(),
            page_size: request.page_size(),
            total_elements,
            total_pages,
            is_last: request.page_number() >= total_pages - 1,
        }
    }

    /// Project every item, keeping the paging metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page_number: self.page_number,
            page_size: self.page_size,
            total_elements: self.total_elements,
            total_pages: self.total_pages,
            is_last: self.is_last,
        }
    }
}

/// `ceil(total / page_size)`; `page_size` is already known to be positive.
fn total_pages(total_elements: i64, page_size: i64) -> i64 {
    if total_elements <= 0 {
        0
    } else {
        total_elements / page_size + i64::from(total_elements % page_size != 0)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[test]
    fn page_request_rejects_negative_number() {
        assert_matches!(
            PageRequest::new(-1, 10),
            Err(CoreError::InvalidPageRequest(_))
        );
    }

    #[test]
    fn page_request_rejects_zero_size() {
        assert_matches!(
            PageRequest::new(0, 0),
            Err(CoreError::InvalidPageRequest(_))
        );
        assert_matches!(
            PageRequest::new(0, -3),
            Err(CoreError::InvalidPageRequest(_))
        );
    }

    #[test]
    fn offset_is_number_times_size() {
        let req = PageRequest::new(3, 25).unwrap();
        assert_eq!(req.offset(), 75);
    }

    #[test]
    fn first_page_of_five_by_two() {
        let page = Page::new(vec!['A', 'B'], PageRequest::new(0, 2).unwrap(), 5);
        assert_eq!(page.total_pages, 3);
        assert!(!page.is_last);
    }

    #[test]
    fn third_page_of_five_by_two_is_last() {
        let page = Page::new(vec!['E'], PageRequest::new(2, 2).unwrap(), 5);
        assert_eq!(page.total_pages, 3);
        assert!(page.is_last);
    }

    #[test]
    fn empty_catalog_has_zero_pages_and_is_last() {
        let page: Page<char> = Page::new(vec![], PageRequest::default(), 0);
        assert_eq!(page.total_pages, 0);
        assert!(page.is_last);
    }

    #[test]
    fn maximum_page_size_yields_single_page() {
        let page = Page::new(vec!['A'; 5], PageRequest::new(0, i64::MAX).unwrap(), 5);
        assert_eq!(page.total_pages, 1);
        assert!(page.is_last);
        assert_eq!(total_pages(i64::MAX, i64::MAX), 1);
        assert_eq!(total_pages(i64::MAX, 2), i64::MAX / 2 + 1);
    }

    #[test]
    fn offset_saturates_for_huge_requests() {
        let req = PageRequest::new(2, i64::MAX).unwrap();
        assert_eq!(req.offset(), i64::MAX);
    }

    #[test]
    fn exact_multiple_has_no_trailing_page() {
        assert_eq!(total_pages(10, 5), 2);
        assert_eq!(total_pages(11, 5), 3);
    }

    #[test]
    fn sort_field_accepts_wire_and_column_names() {
        assert_eq!("movieId".parse::<SortField>().unwrap(), SortField::Id);
        assert_eq!("id".parse::<SortField>().unwrap(), SortField::Id);
        assert_eq!(
            "releaseYear".parse::<SortField>().unwrap(),
            SortField::ReleaseYear
        );
        assert_eq!(
            "release_year".parse::<SortField>().unwrap(),
            SortField::ReleaseYear
        );
    }

    #[test]
    fn sort_field_rejects_unknown_and_injection() {
        assert_matches!(
            "poster".parse::<SortField>(),
            Err(CoreError::InvalidSortField(_))
        );
        assert_matches!(
            "title; DROP TABLE movies".parse::<SortField>(),
            Err(CoreError::InvalidSortField(_))
        );
    }

    #[test]
    fn direction_is_case_insensitive_asc_else_desc() {
        assert_eq!(SortDirection::from_param("ASC"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("asc"), SortDirection::Asc);
        assert_eq!(SortDirection::from_param("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_param("sideways"), SortDirection::Desc);
    }

    #[test]
    fn page_serializes_with_wire_names() {
        let page = Page::new(vec![1], PageRequest::new(0, 1).unwrap(), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["movieDtos"], serde_json::json!([1]));
        assert_eq!(json["totalElements"], 1);
        assert_eq!(json["isLast"], true);
    }
}
