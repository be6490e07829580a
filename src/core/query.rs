//! Pagination parameters and metadata

use serde::{Deserialize, Serialize};

/// Query parameters for paginated order endpoints
///
/// Both values are optional on the wire; [`PaginationParams::resolve`] applies
/// defaults and bounds.
///
/// # Example
/// ```rust,ignore
/// GET  /api/orders?currentPage=2&pageSize=10
/// POST /api/orders-listing?currentPage=1
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// Page number (starts at 1)
    pub current_page: Option<i64>,

    /// Number of orders per page
    pub page_size: Option<i64>,
}

impl PaginationParams {
    /// Apply the configured default page size and clamp both values
    ///
    /// Pages below 1 clamp to 1, sizes clamp to `[1, max_page_size]`.
    pub fn resolve(&self, default_page_size: u64, max_page_size: u64) -> PageRequest {
        let max_page_size = max_page_size.max(1);
        let current_page = self.current_page.unwrap_or(1).max(1) as u64;
        let page_size = self
            .page_size
            .map(|size| size.max(1) as u64)
            .unwrap_or(default_page_size)
            .clamp(1, max_page_size);

        PageRequest {
            current_page,
            page_size,
        }
    }
}

/// A resolved, always-valid page window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub current_page: u64,
    pub page_size: u64,
}

impl PageRequest {
    pub fn new(current_page: u64, page_size: u64) -> Self {
        Self {
            current_page: current_page.max(1),
            page_size: page_size.max(1),
        }
    }

    /// Number of records to skip before this page
    pub fn skip(&self) -> u64 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> u64 {
        self.page_size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(1, 8)
    }
}

/// Pagination metadata returned next to a page of orders
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationMeta {
    /// Total number of matching orders
    pub total_count: u64,

    /// Current page number (starts at 1)
    pub current_page: u64,

    /// Number of orders per page
    pub page_size: u64,
}

impl PaginationMeta {
    pub fn new(page: PageRequest, total_count: u64) -> Self {
        Self {
            total_count,
            current_page: page.current_page,
            page_size: page.page_size,
        }
    }
}
