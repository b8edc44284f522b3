use serde::Serialize;

/// Fixed page size for note listings
pub const NOTES_PER_PAGE: u32 = 10;

/// One page of an ordered listing. Pages are 1-based.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u32,
    pub per_page: u32,
    pub total: i64,
}

impl<T> Page<T> {
    /// Clamp a requested page number into the valid range start
    pub fn normalize(page: u32) -> u32 {
        page.max(1)
    }

    /// Row offset for a page
    pub fn offset(page: u32, per_page: u32) -> i64 {
        (Self::normalize(page) as i64 - 1) * per_page as i64
    }

    /// Last page number; an empty listing still has page 1
    pub fn last_page(&self) -> u32 {
        if self.total <= 0 || self.per_page == 0 {
            return 1;
        }
        let per_page = self.per_page as i64;
        ((self.total + per_page - 1) / per_page) as u32
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.last_page()
    }
}
