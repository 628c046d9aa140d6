/// Offset/limit windowing over an ordered collection.
///
/// The same abstraction backs the Pokemon catalog proxy and any other
/// paginated query: the upstream supplies a total count, the window supplies
/// the slice bounds, and the navigation flags fall out of the arithmetic.
use crate::domain::Page;

pub const DEFAULT_LIMIT: i64 = 20;
pub const DEFAULT_OFFSET: i64 = 0;

/// Coerced offset/limit pair for one query.
///
/// Malformed or non-positive values are clamped to the defaults rather than
/// rejected; leniency here is a deliberate choice, not an oversight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationWindow {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationWindow {
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l,
            _ => DEFAULT_LIMIT,
        };
        let offset = match offset {
            Some(o) if o >= 0 => o,
            _ => DEFAULT_OFFSET,
        };
        Self { limit, offset }
    }

    /// Build a page from a pre-sliced window and the upstream total.
    ///
    /// The window end is computed with checked arithmetic: an offset/limit
    /// pair too large for i64 means the window is past any total, never a
    /// panic.
    pub fn page<T>(&self, items: Vec<T>, total: u64) -> Page<T> {
        Page {
            items,
            total,
            has_next: self
                .offset
                .checked_add(self.limit)
                .is_some_and(|end| (end as u64) < total),
            has_previous: self.offset - self.limit >= 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_unset() {
        let w = PaginationWindow::new(None, None);
        assert_eq!(w.limit, 20);
        assert_eq!(w.offset, 0);
    }

    #[test]
    fn non_positive_values_coerce_to_defaults() {
        let w = PaginationWindow::new(Some(0), Some(-5));
        assert_eq!(w.limit, 20);
        assert_eq!(w.offset, 0);
        let w = PaginationWindow::new(Some(-1), Some(10));
        assert_eq!(w.limit, 20);
        assert_eq!(w.offset, 10);
    }

    #[test]
    fn middle_page_has_both_directions() {
        let w = PaginationWindow::new(Some(20), Some(20));
        let page = w.page(vec![(); 20], 45);
        assert!(page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn last_partial_page_has_no_next() {
        let w = PaginationWindow::new(Some(20), Some(40));
        let page = w.page(vec![(); 5], 45);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }

    #[test]
    fn first_page_has_no_previous() {
        let w = PaginationWindow::new(Some(20), Some(0));
        let page = w.page(vec![(); 20], 45);
        assert!(page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn window_past_the_end_is_empty_not_a_panic() {
        let w = PaginationWindow::new(Some(20), Some(40));
        let page = w.page(Vec::<()>::new(), 5);
        assert!(page.items.is_empty());
        assert_eq!(page.total, 5);
        assert!(!page.has_next);
    }

    #[test]
    fn extreme_window_values_do_not_overflow() {
        let w = PaginationWindow::new(Some(i64::MAX), Some(i64::MAX));
        let page = w.page(Vec::<()>::new(), 45);
        assert!(!page.has_next);
        assert!(page.has_previous);
    }
}
