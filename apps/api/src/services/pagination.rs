//! Offset pagination for list queries
//!
//! Pages are 1-based with a fixed size taken from configuration. A missing,
//! zero or negative page number selects the first page.

/// Page size used when none is configured
pub const DEFAULT_PAGE_SIZE: u32 = 2;

/// A resolved page request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    page: u32,
    size: u32,
}

impl PageRequest {
    /// Normalize a caller-supplied page number against the fixed page size
    pub fn new(page: Option<i32>, size: u32) -> Self {
        let page = page
            .filter(|p| *p > 0)
            .and_then(|p| u32::try_from(p).ok())
            .unwrap_or(1);
        Self {
            page,
            size: size.max(1),
        }
    }

    /// 1-based page number
    pub fn page(&self) -> u32 {
        self.page
    }

    /// Rows to skip
    #[inline]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.size)
    }

    /// Rows to return
    #[inline]
    pub fn limit(&self) -> i64 {
        i64::from(self.size)
    }
}
