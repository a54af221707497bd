use serde::{Deserialize, Serialize};

/// Number of page buttons shown around the current page.
pub const DEFAULT_WINDOW_WIDTH: usize = 5;

/// Derived page navigation state for one list result.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageMetadata {
    pub page_count: usize,
    /// Requested page clamped into `1..=page_count`.
    pub current_page: usize,
    pub has_next: bool,
    pub has_prev: bool,
    /// Consecutive page numbers to render, centered on `current_page`.
    pub window: Vec<usize>,
}

pub fn compute(total: usize, page_size: usize, current_page: usize) -> PageMetadata {
    compute_with_window(total, page_size, current_page, DEFAULT_WINDOW_WIDTH)
}

pub fn compute_with_window(
    total: usize,
    page_size: usize,
    current_page: usize,
    window_width: usize,
) -> PageMetadata {
    let page_count = calculate_page_count(total, page_size);
    let current_page = clamp_page(current_page, page_count);

    PageMetadata {
        page_count,
        current_page,
        has_next: current_page < page_count,
        has_prev: current_page > 1,
        window: visible_window(current_page, page_count, window_width),
    }
}

pub fn clamp_page(page: usize, page_count: usize) -> usize {
    page.max(1).min(page_count.max(1))
}

pub fn calculate_page_count(total: usize, page_size: usize) -> usize {
    let per_page = page_size.max(1);
    if total == 0 {
        1
    } else {
        let numerator = total.saturating_add(per_page - 1);
        usize::max(numerator / per_page, 1)
    }
}

fn visible_window(current: usize, page_count: usize, width: usize) -> Vec<usize> {
    let width = width.max(1).min(page_count);
    let mut start = current.saturating_sub(width / 2).max(1);
    let mut end = start + width - 1;
    if end > page_count {
        end = page_count;
        start = end + 1 - width;
    }
    (start..=end).collect()
}
