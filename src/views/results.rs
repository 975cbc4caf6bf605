/// Client-side pagination over an already fetched result list.
///
/// Pages are 1-based. Selecting a page outside `1..=page_count` clamps to
/// the nearest valid page; an empty result list has a single empty page.
#[derive(Debug, Clone)]
pub struct ResultsPage<T> {
    items: Vec<T>,
    page_size: usize,
    current: usize,
}

impl<T> ResultsPage<T> {
    pub fn new(items: Vec<T>, page_size: usize) -> Self {
        Self {
            items,
            page_size: page_size.max(1),
            current: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Never zero: an empty list still has its one (empty) page
    pub fn page_count(&self) -> usize {
        self.items.len().div_ceil(self.page_size).max(1)
    }

    pub fn current_page(&self) -> usize {
        self.current
    }

    /// Items on the current page
    pub fn items(&self) -> &[T] {
        let start = (self.current - 1) * self.page_size;
        let end = (start + self.page_size).min(self.items.len());
        self.items.get(start..end).unwrap_or(&[])
    }

    pub fn all(&self) -> &[T] {
        &self.items
    }

    /// Jump to `page`, clamped into range. Returns the page actually selected.
    pub fn select_page(&mut self, page: usize) -> usize {
        self.current = page.clamp(1, self.page_count());
        self.current
    }

    pub fn has_next(&self) -> bool {
        self.current < self.page_count()
    }

    pub fn has_previous(&self) -> bool {
        self.current > 1
    }

    pub fn next(&mut self) -> usize {
        self.select_page(self.current + 1)
    }

    pub fn previous(&mut self) -> usize {
        self.select_page(self.current.saturating_sub(1))
    }
}
