//! Shared API model types

use serde::{Deserialize, Serialize};

/// Paginated result wrapper
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub total_count: u64,
    pub page_number: u64,
    pub pages_available: u64,
    pub page_items: Vec<T>,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self {
            total_count: 0,
            page_number: 1,
            pages_available: 0,
            page_items: vec![],
        }
    }
}

impl<T> Page<T> {
    pub fn new(total_count: u64, page_number: u64, page_size: u64, page_items: Vec<T>) -> Self {
        Self {
            total_count,
            page_number,
            pages_available: if page_size > 0 {
                (total_count as f64 / page_size as f64).ceil() as u64
            } else {
                0
            },
            page_items,
        }
    }

    pub fn empty() -> Self {
        Self::default()
    }
}

/// Offset/limit search envelope used by the project search endpoint
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SearchResult<T> {
    pub projects: Vec<T>,
    pub total: u64,
    pub limit: u64,
    pub offset: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_computes_pages_available() {
        let page = Page::new(45, 2, 20, vec![1, 2, 3]);
        assert_eq!(page.pages_available, 3);
        assert_eq!(page.page_number, 2);
        assert_eq!(page.total_count, 45);
    }

    #[test]
    fn test_page_zero_page_size() {
        let page: Page<i32> = Page::new(10, 1, 0, vec![]);
        assert_eq!(page.pages_available, 0);
    }

    #[test]
    fn test_page_default_is_empty() {
        let page: Page<String> = Page::empty();
        assert_eq!(page.total_count, 0);
        assert!(page.page_items.is_empty());
    }
}
