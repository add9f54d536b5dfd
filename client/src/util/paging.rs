//! One-based pagination over in-memory lists.

#[cfg(test)]
#[path = "paging_test.rs"]
mod paging_test;

/// Number of pages needed for `len` items; an empty list still has one page.
pub fn page_count(len: usize, per_page: usize) -> usize {
    len.div_ceil(per_page.max(1)).max(1)
}

/// Clamp a requested page into `1..=page_count`.
pub fn clamp_page(page: usize, len: usize, per_page: usize) -> usize {
    page.clamp(1, page_count(len, per_page))
}

/// Items shown on `page`, after clamping it into range.
pub fn page_slice<T>(items: &[T], page: usize, per_page: usize) -> &[T] {
    let per_page = per_page.max(1);
    let page = clamp_page(page, items.len(), per_page);
    let start = ((page - 1) * per_page).min(items.len());
    let end = (start + per_page).min(items.len());
    &items[start..end]
}
