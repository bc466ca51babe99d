//! Page-number pagination over an already computed result list.

use serde::Deserialize;
use utoipa::IntoParams;

pub const DEFAULT_PAGE_SIZE: usize = 10;
pub const MAX_PAGE_SIZE: usize = 10;

#[derive(Debug, Default, Clone, Deserialize, IntoParams)]
pub struct PageParams {
    /// 1-based page number, or `last` (default: 1)
    pub page: Option<String>,
    /// Items per page (default: 10, max: 10). Values that are not a
    /// positive integer fall back to the default.
    #[param(value_type = Option<usize>)]
    pub page_size: Option<String>,
}

impl PageParams {
    fn page_size(&self) -> usize {
        self.page_size
            .as_deref()
            .and_then(|size| size.trim().parse::<usize>().ok())
            .filter(|&size| size > 0)
            .map_or(DEFAULT_PAGE_SIZE, |size| size.min(MAX_PAGE_SIZE))
    }

    fn page_number(&self, num_pages: usize) -> Result<usize, InvalidPage> {
        match self.page.as_deref().map(str::trim) {
            None => Ok(1),
            Some("last") => Ok(num_pages),
            Some(page) => page.parse().map_err(|_| InvalidPage),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidPage;

#[derive(Debug, Clone)]
pub struct Page<T> {
    /// Total number of items across all pages
    pub count: usize,
    pub next: Option<String>,
    pub previous: Option<String>,
    pub results: Vec<T>,
}

fn page_link(path: &str, page: usize, page_size: usize) -> String {
    format!("{}?page={}&page_size={}", path, page, page_size)
}

/// Cut one page out of `items`. Links point back at `path`.
///
/// Page 1 of an empty list is valid; any other page past the end is not.
pub fn paginate<T>(items: Vec<T>, params: &PageParams, path: &str) -> Result<Page<T>, InvalidPage> {
    let count = items.len();
    let page_size = params.page_size();
    let num_pages = count.div_ceil(page_size).max(1);
    let page = params.page_number(num_pages)?;

    if page == 0 || page > num_pages {
        return Err(InvalidPage);
    }

    let results: Vec<T> = items
        .into_iter()
        .skip((page - 1) * page_size)
        .take(page_size)
        .collect();

    Ok(Page {
        count,
        next: (page < num_pages).then(|| page_link(path, page + 1, page_size)),
        previous: (page > 1).then(|| page_link(path, page - 1, page_size)),
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PATH: &str = "/api/dishes/possible";

    fn params(page: Option<&str>, page_size: Option<&str>) -> PageParams {
        PageParams {
            page: page.map(String::from),
            page_size: page_size.map(String::from),
        }
    }

    #[test]
    fn test_first_page_defaults() {
        let page = paginate((1..=25).collect(), &PageParams::default(), PATH).unwrap();
        assert_eq!(page.count, 25);
        assert_eq!(page.results, (1..=10).collect::<Vec<_>>());
        assert_eq!(
            page.next.as_deref(),
            Some("/api/dishes/possible?page=2&page_size=10")
        );
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_last_page() {
        let page = paginate((1..=25).collect(), &params(Some("3"), None), PATH).unwrap();
        assert_eq!(page.results, vec![21, 22, 23, 24, 25]);
        assert!(page.next.is_none());
        assert_eq!(
            page.previous.as_deref(),
            Some("/api/dishes/possible?page=2&page_size=10")
        );
    }

    #[test]
    fn test_page_size_is_capped() {
        let page = paginate((1..=25).collect(), &params(None, Some("50")), PATH).unwrap();
        assert_eq!(page.results.len(), MAX_PAGE_SIZE);

        let page = paginate((1..=25).collect(), &params(Some("2"), Some("5")), PATH).unwrap();
        assert_eq!(page.results, vec![6, 7, 8, 9, 10]);
        assert_eq!(
            page.next.as_deref(),
            Some("/api/dishes/possible?page=3&page_size=5")
        );
    }

    #[test]
    fn test_invalid_page_size_falls_back_to_default() {
        for size in ["0", "-3", "ten", ""] {
            let page = paginate((1..=25).collect(), &params(Some("2"), Some(size)), PATH).unwrap();
            assert_eq!(page.results, (11..=20).collect::<Vec<_>>(), "page_size={:?}", size);
        }
    }

    #[test]
    fn test_last_page_keyword() {
        let page = paginate((1..=25).collect(), &params(Some("last"), None), PATH).unwrap();
        assert_eq!(page.results, vec![21, 22, 23, 24, 25]);
    }

    #[test]
    fn test_empty_first_page_is_valid() {
        let page = paginate(Vec::<i32>::new(), &PageParams::default(), PATH).unwrap();
        assert_eq!(page.count, 0);
        assert!(page.results.is_empty());
        assert!(page.next.is_none());
        assert!(page.previous.is_none());
    }

    #[test]
    fn test_out_of_range_pages() {
        for page in ["0", "2", "two", "-1", "1.0", ""] {
            assert_eq!(
                paginate(vec![1, 2, 3], &params(Some(page), None), PATH).unwrap_err(),
                InvalidPage,
                "page={:?}",
                page
            );
        }
        assert_eq!(
            paginate(Vec::<i32>::new(), &params(Some("2"), None), PATH).unwrap_err(),
            InvalidPage
        );
    }
}
