use serde::Serialize;

pub const DEFAULT_PAGE_SIZE: usize = 20;

/// Page metadata for one result set. `page` is 1-based and is never adjusted
/// here; callers keep it in range through the navigation helpers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageInfo {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    /// At least 1, even for an empty result.
    pub total_pages: usize,
    start: usize,
    end: usize,
}

impl PageInfo {
    pub fn new(total_items: usize, page_size: usize, page: usize) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_items.div_ceil(page_size).max(1);
        // page 0 is out of range like any page past the end
        let start = match page {
            0 => total_items,
            p => (p - 1).saturating_mul(page_size).min(total_items),
        };
        let end = start.saturating_add(page_size).min(total_items);
        Self {
            page,
            page_size,
            total_items,
            total_pages,
            start,
            end,
        }
    }

    /// Half-open index range of the visible slice.
    pub fn bounds(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    /// 1-based inclusive range for "showing X-Y" text; `None` when nothing is visible.
    pub fn display_range(&self) -> Option<(usize, usize)> {
        (self.end > self.start).then(|| (self.start + 1, self.end))
    }

    pub fn summary(&self) -> String {
        match self.display_range() {
            Some((from, to)) => format!("Показано {}-{} из {}", from, to, self.total_items),
            None => "Нет данных".to_string(),
        }
    }

    pub fn label(&self) -> String {
        format!("Страница {} из {}", self.page, self.total_pages)
    }

    /// Navigation is only offered when there is somewhere to go.
    pub fn has_controls(&self) -> bool {
        self.total_pages > 1
    }

    pub fn is_first(&self) -> bool {
        self.page <= 1
    }

    pub fn is_last(&self) -> bool {
        self.page >= self.total_pages
    }
}

pub fn paginate<'a, T>(items: &'a [T], info: &PageInfo) -> &'a [T] {
    let range = info.bounds();
    let end = range.end.min(items.len());
    let start = range.start.min(end);
    &items[start..end]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn twenty_two_items_span_two_pages() {
        let first = PageInfo::new(22, 20, 1);
        assert_eq!(first.total_pages, 2);
        assert_eq!(first.display_range(), Some((1, 20)));
        assert_eq!(first.summary(), "Показано 1-20 из 22");
        let second = PageInfo::new(22, 20, 2);
        assert_eq!(second.display_range(), Some((21, 22)));
        assert_eq!(second.label(), "Страница 2 из 2");
        assert!(second.is_last());
    }

    #[test]
    fn empty_result_is_one_page_of_nothing() {
        let info = PageInfo::new(0, 20, 1);
        assert_eq!(info.total_pages, 1);
        assert_eq!(info.display_range(), None);
        assert_eq!(info.summary(), "Нет данных");
        assert!(!info.has_controls());
        assert!(paginate::<u8>(&[], &info).is_empty());
    }

    #[test]
    fn out_of_range_page_is_not_renumbered() {
        let items: Vec<usize> = (0..5).collect();
        let info = PageInfo::new(items.len(), 20, 3);
        assert_eq!(info.page, 3);
        assert!(paginate(&items, &info).is_empty());
    }

    #[test]
    fn page_zero_shows_nothing() {
        let items: Vec<usize> = (0..5).collect();
        let info = PageInfo::new(items.len(), 20, 0);
        assert_eq!(info.page, 0);
        assert!(paginate(&items, &info).is_empty());
        assert_eq!(info.display_range(), None);
        assert_eq!(info.summary(), "Нет данных");
    }

    #[test]
    fn pages_cover_every_item_exactly_once() {
        for total in 0..=125usize {
            let items: Vec<usize> = (0..total).collect();
            let pages = PageInfo::new(total, DEFAULT_PAGE_SIZE, 1).total_pages;
            let mut seen = Vec::new();
            for page in 1..=pages {
                let info = PageInfo::new(total, DEFAULT_PAGE_SIZE, page);
                let slice = paginate(&items, &info);
                assert!(slice.len() <= DEFAULT_PAGE_SIZE);
                seen.extend_from_slice(slice);
            }
            assert_eq!(seen, items, "total = {total}");
        }
    }
}
