use crate::models::candidate::Candidate;
use crate::models::page::SearchResultPage;

/// Directory search page size. Fixed per mode, not user-settable.
pub const DIRECTORY_PAGE_SIZE: u32 = 10;
/// Applied-candidate search page size.
pub const APPLIED_PAGE_SIZE: u32 = 50;

/// Slices the matched set into one page. Totals are computed over the whole
/// set; an out-of-range page number clamps to the last valid page and the
/// clamped number is reported back through the returned page.
pub fn paginate(matched: &[Candidate], page_size: u32, page_number: u32) -> SearchResultPage {
    debug_assert!(page_size > 0);
    let total_count = matched.len() as u64;
    let total_pages = (total_count.div_ceil(page_size as u64)).max(1) as u32;
    let page_number = page_number.clamp(1, total_pages);

    let start = ((page_number - 1) * page_size) as usize;
    let end = (start + page_size as usize).min(matched.len());
    let items = if start < matched.len() {
        matched[start..end].to_vec()
    } else {
        Vec::new()
    };

    SearchResultPage {
        items,
        page_number,
        page_size,
        total_count,
        total_pages,
    }
}
