//! Client-side pagination — a pure view over the full record slice.
//!
//! There is no server paging contract: the whole collection is already in
//! memory and a page is just the contiguous slice
//! `[(page - 1) * size, page * size)`. Out-of-range requests yield an empty
//! slice, never an error.

/// Returns the 1-based `page` of `items`, `page_size` items per page.
///
/// A page past the end, page `0`, or a zero page size all produce an empty
/// slice.
///
/// # Examples
///
/// ```
/// use vitrine::page::slice;
///
/// let items: Vec<u32> = (0..25).collect();
/// assert_eq!(slice(&items, 2, 8), &items[8..16]);
/// assert!(slice(&items, 99, 8).is_empty());
/// ```
pub fn slice<T>(items: &[T], page: usize, page_size: usize) -> &[T] {
    if page == 0 || page_size == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= items.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(items.len());
    &items[start..end]
}

/// Page arithmetic for UI widgets: total pages and page clamping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    total_items: usize,
    page_size: usize,
}

impl Pager {
    /// Creates a pager over `total_items` items. A zero `page_size` is
    /// clamped to one.
    pub fn new(total_items: usize, page_size: usize) -> Self {
        Self {
            total_items,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn total_items(&self) -> usize {
        self.total_items
    }

    /// Number of pages; at least one, so an empty collection still renders
    /// page 1 of 1.
    pub fn total_pages(&self) -> usize {
        self.total_items.div_ceil(self.page_size).max(1)
    }

    /// Clamps a requested page into `1..=total_pages()`.
    pub fn clamp(&self, page: usize) -> usize {
        page.clamp(1, self.total_pages())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_twenty_five() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(slice(&items, 2, 8), &items[8..16]);
    }

    #[test]
    fn last_page_is_short() {
        let items: Vec<u32> = (0..25).collect();
        assert_eq!(slice(&items, 4, 8), &items[24..25]);
    }

    #[test]
    fn page_past_the_end_is_empty() {
        let items: Vec<u32> = (0..25).collect();
        assert!(slice(&items, 5, 8).is_empty());
        assert!(slice(&items, usize::MAX, 8).is_empty());
    }

    #[test]
    fn degenerate_inputs_are_empty() {
        let items = [1, 2, 3];
        assert!(slice(&items, 0, 8).is_empty());
        assert!(slice(&items, 1, 0).is_empty());
        assert!(slice::<u32>(&[], 1, 8).is_empty());
    }

    #[test]
    fn pager_total_pages() {
        assert_eq!(Pager::new(25, 8).total_pages(), 4);
        assert_eq!(Pager::new(24, 8).total_pages(), 3);
        assert_eq!(Pager::new(0, 8).total_pages(), 1);
    }

    #[test]
    fn pager_clamps_requests() {
        let pager = Pager::new(25, 8);
        assert_eq!(pager.clamp(0), 1);
        assert_eq!(pager.clamp(3), 3);
        assert_eq!(pager.clamp(99), 4);
    }
}
