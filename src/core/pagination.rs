use serde::Serialize;

use crate::core::errors::ExpenseError;

/// One page of a listing. Page numbers start at 1.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
}

impl<T> Page<T> {
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            page_size: self.page_size,
            total_items: self.total_items,
            total_pages: self.total_pages,
        }
    }
}

/// Slices `items` into `page_size` chunks and returns chunk number `page`.
///
/// A page outside `1..=total_pages` comes back with no items rather than an
/// error, so a listing can step past the end harmlessly.
pub fn paginate<T: Clone>(
    items: &[T],
    page: usize,
    page_size: usize,
) -> Result<Page<T>, ExpenseError> {
    if page_size == 0 {
        return Err(ExpenseError::InvalidInput(
            "page size must be greater than zero".into(),
        ));
    }
    let total_items = items.len();
    let total_pages = total_items.div_ceil(page_size);
    let slice: &[T] = if page == 0 || page > total_pages {
        &[]
    } else {
        let start = (page - 1) * page_size;
        let end = (start + page_size).min(total_items);
        &items[start..end]
    };
    Ok(Page {
        items: slice.to_vec(),
        page,
        page_size,
        total_items,
        total_pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_split_with_ceiling_division() {
        let items: Vec<u32> = (1..=12).collect();
        let first = paginate(&items, 1, 5).unwrap();
        assert_eq!(first.items, vec![1, 2, 3, 4, 5]);
        assert_eq!(first.total_pages, 3);
        assert!(first.has_next());
        assert!(!first.has_previous());

        let last = paginate(&items, 3, 5).unwrap();
        assert_eq!(last.items, vec![11, 12]);
        assert!(!last.has_next());
        assert!(last.has_previous());
    }

    #[test]
    fn out_of_range_pages_are_empty() {
        let items: Vec<u32> = (1..=12).collect();
        assert!(paginate(&items, 0, 5).unwrap().items.is_empty());
        assert!(paginate(&items, 4, 5).unwrap().items.is_empty());

        let none: Vec<u32> = Vec::new();
        let page = paginate(&none, 1, 5).unwrap();
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn zero_page_size_is_rejected() {
        assert!(matches!(
            paginate(&[1, 2, 3], 1, 0),
            Err(ExpenseError::InvalidInput(_))
        ));
    }
}
