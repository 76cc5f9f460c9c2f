use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct Pagination {
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

/// A resolved page window: 1-based page, clamped limit and row offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub page: i64,
    pub limit: i64,
    pub offset: i64,
}

impl Pagination {
    pub fn resolve(self, default_limit: i64, max_limit: i64) -> Page {
        let page = self.page.unwrap_or(1).max(1);
        let limit = self.limit.unwrap_or(default_limit).clamp(1, max_limit);
        Page {
            page,
            limit,
            offset: (page - 1).saturating_mul(limit),
        }
    }
}

impl Page {
    pub fn pages(&self, total: i64) -> i64 {
        total.saturating_add(self.limit - 1) / self.limit
    }
}

/// `{items, total, page, pages}` envelope; the items key differs per resource
/// so handlers flatten this next to their own list.
#[derive(Debug, Serialize)]
pub struct PageInfo {
    pub total: i64,
    pub page: i64,
    pub pages: i64,
}

impl PageInfo {
    pub fn new(window: Page, total: i64) -> Self {
        Self {
            total,
            page: window.page,
            pages: window.pages(total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_inputs() {
        let window = Pagination {
            page: Some(0),
            limit: Some(1000),
        }
        .resolve(10, 100);
        assert_eq!(
            window,
            Page {
                page: 1,
                limit: 100,
                offset: 0
            }
        );

        let window = Pagination {
            page: Some(3),
            limit: None,
        }
        .resolve(10, 100);
        assert_eq!(window.offset, 20);
    }

    #[test]
    fn pages_rounds_up() {
        let window = Pagination::default().resolve(10, 100);
        assert_eq!(window.pages(0), 0);
        assert_eq!(window.pages(10), 1);
        assert_eq!(window.pages(11), 2);
    }

    #[test]
    fn huge_page_saturates_instead_of_overflowing() {
        let window = Pagination {
            page: Some(i64::MAX),
            limit: Some(10),
        }
        .resolve(10, 100);
        assert_eq!(window.offset, i64::MAX);
        assert_eq!(window.pages(i64::MAX), i64::MAX / 10);
    }
}
