/// One page of a longer list, 1-based
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a, T> {
    pub items: &'a [T],
    pub current_page: usize,
    pub total_pages: usize,
    pub total_items: usize,
}

impl<'a, T> Page<'a, T> {
    /// Slice `page_num` out of `items`. An empty list has a single empty page.
    pub fn of(items: &'a [T], page_num: usize, items_per_page: usize) -> Result<Self, String> {
        let per_page = items_per_page.max(1);
        let total_pages = ((items.len() + per_page - 1) / per_page).max(1);

        if page_num < 1 || page_num > total_pages {
            return Err(format!(
                "❌ Invalid page number. This list has {} page(s)",
                total_pages
            ));
        }

        let start = ((page_num - 1) * per_page).min(items.len());
        let end = std::cmp::min(start + per_page, items.len());

        Ok(Page {
            items: &items[start..end],
            current_page: page_num,
            total_pages,
            total_items: items.len(),
        })
    }

    /// Offset of the first item of this page in the full list
    pub fn first_index(&self, items_per_page: usize) -> usize {
        (self.current_page - 1) * items_per_page.max(1)
    }
}
