use shared::domain::{page_count, DEFAULT_TOTAL_RECORDS, PAGE_SIZE};

use crate::error::BrowseError;

/// Page position over a collection of assumed fixed size. The total is never
/// read back from the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    index: usize,
    total_records: usize,
}

impl Default for Paginator {
    fn default() -> Self {
        Self::new(DEFAULT_TOTAL_RECORDS)
    }
}

impl Paginator {
    pub fn new(total_records: usize) -> Self {
        Self {
            index: 0,
            total_records,
        }
    }

    /// 0-based page index.
    pub fn index(&self) -> usize {
        self.index
    }

    /// 1-based page number sent to the source.
    pub fn page_number(&self) -> usize {
        self.index + 1
    }

    /// Offset of the first record on the current page.
    pub fn first(&self) -> usize {
        self.index * PAGE_SIZE
    }

    pub fn total_records(&self) -> usize {
        self.total_records
    }

    pub fn page_count(&self) -> usize {
        page_count(self.total_records)
    }

    pub fn check(&self, index: usize) -> Result<(), BrowseError> {
        let page_count = self.page_count();
        if index >= page_count {
            return Err(BrowseError::PageOutOfRange { index, page_count });
        }
        Ok(())
    }

    pub fn set_index(&mut self, index: usize) -> Result<(), BrowseError> {
        self.check(index)?;
        self.index = index;
        Ok(())
    }

    pub fn next_index(&self) -> Option<usize> {
        let next = self.index + 1;
        (next < self.page_count()).then_some(next)
    }

    pub fn prev_index(&self) -> Option<usize> {
        self.index.checked_sub(1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_paginator_spans_ten_pages_of_twelve() {
        let paginator = Paginator::default();
        assert_eq!(paginator.page_count(), 10);
        assert_eq!(paginator.page_number(), 1);
        assert_eq!(paginator.first(), 0);
        assert_eq!(paginator.prev_index(), None);
        assert_eq!(paginator.next_index(), Some(1));
    }

    #[test]
    fn last_page_has_no_successor_and_out_of_range_is_rejected() {
        let mut paginator = Paginator::default();
        paginator.set_index(9).expect("last page");
        assert_eq!(paginator.first(), 108);
        assert_eq!(paginator.next_index(), None);

        let err = paginator.set_index(10).expect_err("out of range");
        assert!(matches!(
            err,
            BrowseError::PageOutOfRange {
                index: 10,
                page_count: 10
            }
        ));
        assert_eq!(paginator.index(), 9);
    }

    #[test]
    fn partial_trailing_page_still_counts() {
        assert_eq!(Paginator::new(121).page_count(), 11);
        assert_eq!(Paginator::new(0).page_count(), 0);
    }
}
