/// Results requested per search page.
pub const RESULTS_PER_PAGE: u32 = 12;

/// Maximum number of numbered page buttons shown around the current page.
pub const MAX_VISIBLE_PAGES: u32 = 5;

pub fn total_pages(total_results: u32) -> u32 {
    total_results.div_ceil(RESULTS_PER_PAGE)
}

/// Offset of the first result on a 1-based page.
pub fn page_offset(page: u32) -> u32 {
    page.saturating_sub(1) * RESULTS_PER_PAGE
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageItem {
    Previous { target: u32, enabled: bool },
    Page { number: u32, current: bool },
    Ellipsis,
    Next { target: u32, enabled: bool },
}

impl PageItem {
    /// Page to navigate to when the item is activated, if it is actionable.
    pub fn target(&self) -> Option<u32> {
        match *self {
            PageItem::Previous { target, enabled } | PageItem::Next { target, enabled } => {
                enabled.then_some(target)
            }
            PageItem::Page { number, .. } => Some(number),
            PageItem::Ellipsis => None,
        }
    }

    pub fn is_current(&self) -> bool {
        matches!(self, PageItem::Page { current: true, .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    pub current: u32,
    pub total_pages: u32,
}

impl Pagination {
    pub fn new(current: u32, total_pages: u32) -> Self {
        Self {
            current: current.clamp(1, total_pages.max(1)),
            total_pages,
        }
    }

    /// Navigation controls, or `None` when there is at most one page.
    pub fn items(&self) -> Option<Vec<PageItem>> {
        if self.total_pages <= 1 {
            return None;
        }
        let window = self.window();
        let (first, last) = (*window.start(), *window.end());

        let mut items = vec![PageItem::Previous {
            target: self.current.saturating_sub(1).max(1),
            enabled: self.current > 1,
        }];
        if first > 1 {
            items.push(self.page(1));
            if first > 2 {
                items.push(PageItem::Ellipsis);
            }
        }
        items.extend(window.map(|number| self.page(number)));
        if last < self.total_pages {
            if last < self.total_pages - 1 {
                items.push(PageItem::Ellipsis);
            }
            items.push(self.page(self.total_pages));
        }
        items.push(PageItem::Next {
            target: (self.current + 1).min(self.total_pages),
            enabled: self.current < self.total_pages,
        });
        Some(items)
    }

    fn page(&self, number: u32) -> PageItem {
        PageItem::Page {
            number,
            current: number == self.current,
        }
    }

    fn window(&self) -> std::ops::RangeInclusive<u32> {
        let mut start = self.current.saturating_sub(MAX_VISIBLE_PAGES / 2).max(1);
        let end = (start + MAX_VISIBLE_PAGES - 1).min(self.total_pages);
        // Near the end the window slides left to stay full.
        if end - start + 1 < MAX_VISIBLE_PAGES {
            start = end.saturating_sub(MAX_VISIBLE_PAGES - 1).max(1);
        }
        start..=end
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0), 0);
        assert_eq!(total_pages(12), 1);
        assert_eq!(total_pages(13), 2);
    }

    #[test]
    fn offset_is_zero_based() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(3), 24);
        assert_eq!(page_offset(0), 0);
    }
}
