//! Pagination control state
//!
//! The backend does the slicing; the client only needs to know where it is
//! and which way it may move.

/// Pagination control derived from the current page and page count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    /// Current page number (1-indexed)
    pub page: u64,
    /// Total number of pages
    pub total_pages: u64,
}

impl Pager {
    pub fn new(page: u64, total_pages: u64) -> Self {
        Self { page, total_pages }
    }

    /// The control is only rendered when there is somewhere to go
    pub fn is_visible(&self) -> bool {
        self.total_pages > 1
    }

    pub fn can_go_previous(&self) -> bool {
        self.page > 1
    }

    pub fn can_go_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// Target of the "previous" button, if enabled
    pub fn previous(&self) -> Option<u64> {
        self.can_go_previous().then(|| self.page - 1)
    }

    /// Target of the "next" button, if enabled
    pub fn next(&self) -> Option<u64> {
        self.can_go_next().then(|| self.page + 1)
    }
}
