use crate::models::PageResponse;

pub fn total_pages(len: usize, page_size: usize) -> usize {
    len.div_ceil(page_size.max(1))
}

/// Pulls `page` back into `1..=total_pages`, or 1 when there are no pages.
pub fn clamp_page(page: usize, total_pages: usize) -> usize {
    page.clamp(1, total_pages.max(1))
}

/// Slices one 1-based page out of an already filtered and sorted sequence.
/// Page 0 and pages past the end yield an empty slice; `total_pages` is
/// always computed from the full sequence.
pub fn paginate<T: Clone>(items: &[T], page: usize, page_size: usize) -> PageResponse<T> {
    let page_size = page_size.max(1);
    let total_items = items.len();
    let total_pages = total_pages(total_items, page_size);

    let page_items = if page == 0 {
        Vec::new()
    } else {
        let start = (page - 1).saturating_mul(page_size).min(total_items);
        let end = page.saturating_mul(page_size).min(total_items);
        items[start..end].to_vec()
    };

    PageResponse {
        items: page_items,
        page,
        total_pages,
        total_items,
    }
}

#[cfg(test)]
mod tests {
    use super::{clamp_page, paginate, total_pages};

    #[test]
    fn thirteen_items_split_into_three_pages_of_six() {
        let items: Vec<u32> = (1..=13).collect();
        let first = paginate(&items, 1, 6);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.items, vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(paginate(&items, 2, 6).items.len(), 6);
        assert_eq!(paginate(&items, 3, 6).items, vec![13]);

        let past_end = paginate(&items, 4, 6);
        assert!(past_end.items.is_empty());
        assert_eq!(past_end.total_pages, 3);
        assert_eq!(past_end.total_items, 13);
    }

    #[test]
    fn pages_concatenate_back_to_the_input() {
        for len in [0usize, 1, 5, 6, 7, 12, 19] {
            let items: Vec<usize> = (0..len).collect();
            let pages = total_pages(len, 6);
            let rebuilt: Vec<usize> = (1..=pages)
                .flat_map(|page| paginate(&items, page, 6).items)
                .collect();
            assert_eq!(rebuilt, items, "len {}", len);
        }
    }

    #[test]
    fn empty_input_has_zero_pages() {
        let items: Vec<u8> = Vec::new();
        let page = paginate(&items, 1, 6);
        assert_eq!(page.total_pages, 0);
        assert!(page.items.is_empty());
    }

    #[test]
    fn page_zero_and_huge_pages_are_empty() {
        let items: Vec<u8> = vec![1, 2, 3];
        assert!(paginate(&items, 0, 6).items.is_empty());
        assert!(paginate(&items, usize::MAX, 6).items.is_empty());
    }

    #[test]
    fn zero_page_size_is_treated_as_one() {
        let items = vec!['a', 'b'];
        let page = paginate(&items, 2, 0);
        assert_eq!(page.items, vec!['b']);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn clamp_keeps_page_inside_known_range() {
        assert_eq!(clamp_page(0, 3), 1);
        assert_eq!(clamp_page(5, 3), 3);
        assert_eq!(clamp_page(2, 3), 2);
        assert_eq!(clamp_page(4, 0), 1);
    }
}
