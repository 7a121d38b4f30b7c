//! Page arithmetic and the page-number list shown under a listing.

use qna_board_api::{PageLink, PageResponse};

/// Consecutive page numbers shown around the current page.
pub const WINDOW: i64 = 10;
/// How many pages of the window sit before the current page.
const LEAD: i64 = 4;

pub fn total_pages(total_items: i64, per_page: i64) -> i64 {
    if total_items <= 0 || per_page <= 0 {
        return 0;
    }
    (total_items + per_page - 1) / per_page
}

/// Page links for `current` out of `total` pages.
///
/// Up to [`WINDOW`] pages are all listed. Beyond that a window of [`WINDOW`]
/// pages starts [`LEAD`] before the current one, and the first and last pages
/// are pinned with an ellipsis over any gap.
pub fn page_links(current: i64, total: i64) -> Vec<PageLink> {
    if total <= 0 {
        return Vec::new();
    }
    if total <= WINDOW {
        return (1..=total).map(|number| PageLink::Page { number }).collect();
    }

    let start = (current - LEAD).clamp(1, total - WINDOW + 1);
    let end = start + WINDOW - 1;

    let mut links = Vec::with_capacity((WINDOW + 4) as usize);
    if start > 1 {
        links.push(PageLink::Page { number: 1 });
        if start > 2 {
            links.push(PageLink::Ellipsis);
        }
    }
    links.extend((start..=end).map(|number| PageLink::Page { number }));
    if end < total {
        if end < total - 1 {
            links.push(PageLink::Ellipsis);
        }
        links.push(PageLink::Page { number: total });
    }
    links
}

/// Wraps a fetched slice with its paging metadata.
pub fn build_page<T>(items: Vec<T>, page: i64, per_page: i64, total_items: i64) -> PageResponse<T> {
    let total_pages = total_pages(total_items, per_page);
    PageResponse {
        items,
        page,
        per_page,
        total_items,
        total_pages,
        page_links: page_links(page, total_pages),
    }
}
