//! Pagination stage.
//!
//! Pages are 1-based. Requesting a page past the end (or page 0) is not an
//! error; the window is simply empty.

use serde::Serialize;

/// Default number of display rows per page.
pub const DEFAULT_PAGE_SIZE: usize = 25;

/// Snapshot of the pagination state of a display sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageSummary {
    /// Current 1-based page.
    pub page: usize,
    pub page_size: usize,
    /// Length of the display sequence, group headers included.
    pub total_items: usize,
    /// `ceil(total_items / page_size)`; 0 when there are no items.
    pub total_pages: usize,
}

/// Number of pages needed for `total_items` at `page_size` per page.
///
/// ```
/// use tabula::total_pages;
///
/// assert_eq!(total_pages(7, 3), 3);
/// assert_eq!(total_pages(6, 3), 2);
/// assert_eq!(total_pages(0, 3), 0);
/// ```
pub fn total_pages(total_items: usize, page_size: usize) -> usize {
    total_items.div_ceil(page_size.max(1))
}

/// Index range of `page` within a sequence of `len` items, clamped to bounds.
pub fn page_bounds(len: usize, page: usize, page_size: usize) -> std::ops::Range<usize> {
    let page_size = page_size.max(1);
    let Some(index) = page.checked_sub(1) else {
        return 0..0;
    };
    let start = index.saturating_mul(page_size).min(len);
    let end = start.saturating_add(page_size).min(len);
    start..end
}

/// The slice of `items` shown on `page`.
///
/// ```
/// use tabula::page_window;
///
/// let items: Vec<u32> = (0..7).collect();
/// assert_eq!(page_window(&items, 1, 3), &[0, 1, 2]);
/// assert_eq!(page_window(&items, 3, 3), &[6]);
/// assert!(page_window(&items, 4, 3).is_empty());
/// ```
pub fn page_window<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    &items[page_bounds(items.len(), page, page_size)]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_over_seven_items() {
        let items: Vec<usize> = (0..7).collect();
        assert_eq!(page_window(&items, 1, 3), &[0, 1, 2]);
        assert_eq!(page_window(&items, 2, 3), &[3, 4, 5]);
        assert_eq!(page_window(&items, 3, 3), &[6]);
        assert!(page_window(&items, 4, 3).is_empty());
        assert_eq!(total_pages(items.len(), 3), 3);
    }

    #[test]
    fn page_zero_is_empty() {
        let items = [1, 2, 3];
        assert!(page_window(&items, 0, 2).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items = [1, 2, 3];
        assert!(page_window(&items, usize::MAX, usize::MAX).is_empty());
    }

    #[test]
    fn zero_page_size_behaves_as_one() {
        let items = [1, 2, 3];
        assert_eq!(page_window(&items, 2, 0), &[2]);
        assert_eq!(total_pages(3, 0), 3);
    }

    #[test]
    fn empty_sequence_has_no_pages() {
        let items: [u8; 0] = [];
        assert_eq!(total_pages(0, 10), 0);
        assert!(page_window(&items, 1, 10).is_empty());
    }
}
