//! Pagination utilities for service layer
//!
//! Pages are zero-based slices of an already ordered list.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE_SIZE: u32 = 3;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 0-based page index
    pub page_number: u32,
    /// items per page, at least 1
    pub page_size: u32,
}

impl Pagination {
    pub fn new(page_number: u32, page_size: u32) -> Result<Self, ServiceError> {
        if page_size == 0 {
            return Err(ServiceError::InvalidRequest("pageSize must be >= 1".into()));
        }
        Ok(Self { page_number, page_size })
    }

    /// Offset of the first element on this page.
    pub fn offset(&self) -> usize {
        (self.page_number as usize).saturating_mul(self.page_size as usize)
    }

    /// Elements `[offset, offset + page_size)` clipped to the list; empty past the end.
    pub fn apply<T>(&self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.page_size as usize)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page_number: 0, page_size: DEFAULT_PAGE_SIZE } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page_number, 0);
        assert_eq!(d.page_size, 3);
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(Pagination::new(0, 0).is_err());
        assert!(Pagination::new(4, 1).is_ok());
    }

    #[test]
    fn last_page_is_partial() {
        let items: Vec<u32> = (0..7).collect();
        assert_eq!(Pagination::new(0, 3).unwrap().apply(items.clone()), vec![0, 1, 2]);
        assert_eq!(Pagination::new(2, 3).unwrap().apply(items), vec![6]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..6).collect();
        assert!(Pagination::new(2, 3).unwrap().apply(items.clone()).is_empty());
        assert!(Pagination::new(u32::MAX, u32::MAX).unwrap().apply(items).is_empty());
    }

    #[test]
    fn pages_reassemble_the_list() {
        let items: Vec<u32> = (0..11).collect();
        let mut seen = Vec::new();
        for page in 0.. {
            let chunk = Pagination::new(page, 4).unwrap().apply(items.clone());
            if chunk.is_empty() { break; }
            seen.extend(chunk);
        }
        assert_eq!(seen, items);
    }
}
