use crate::models::candidate::Candidate;
use serde::Serialize;

/// One page of matched candidates plus the totals computed over the full
/// matched set. `page_number` is always within `[1, total_pages]` and
/// `total_pages` is at least 1 even for an empty result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResultPage {
    pub items: Vec<Candidate>,
    pub page_number: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub total_pages: u32,
}

impl SearchResultPage {
    pub fn empty(page_size: u32) -> Self {
        Self {
            items: Vec::new(),
            page_number: 1,
            page_size,
            total_count: 0,
            total_pages: 1,
        }
    }

    pub fn has_next(&self) -> bool {
        self.page_number < self.total_pages
    }

    pub fn has_previous(&self) -> bool {
        self.page_number > 1
    }
}
