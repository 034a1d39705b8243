use crate::error::{Error, Result, GENERIC_REMOTE_FAILURE};
use crate::models::candidate::Candidate;
use crate::models::page::SearchResultPage;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct PaginationMeta {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub total: Option<u64>,
    pub pages: Option<u32>,
}

/// Success shape of every candidate listing endpoint. All fields are
/// declared optional and checked in `into_page`; shape violations become
/// `MalformedResponse` instead of silently defaulting.
#[derive(Debug, Clone, Deserialize)]
pub struct CandidateListResponse {
    pub success: Option<bool>,
    pub data: Option<Vec<Candidate>>,
    pub pagination: Option<PaginationMeta>,
    pub message: Option<String>,
}

/// Failure shape: `{ "message": ... }`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RemoteErrorBody {
    pub message: Option<String>,
}

impl CandidateListResponse {
    /// Validates the body into a result page. The applied-candidate endpoint
    /// omits pagination metadata; the requested page and size fill in there.
    pub fn into_page(self, requested_page: u32, page_size: u32) -> Result<SearchResultPage> {
        if self.success == Some(false) {
            return Err(Error::RemoteFailure(
                self.message
                    .unwrap_or_else(|| GENERIC_REMOTE_FAILURE.to_string()),
            ));
        }

        let items = self
            .data
            .ok_or_else(|| Error::MalformedResponse("missing data array".to_string()))?;

        let (page_number, page_size, total_count, total_pages) = match self.pagination {
            Some(meta) => {
                let total = meta
                    .total
                    .ok_or_else(|| Error::MalformedResponse("pagination missing total".to_string()))?;
                let pages = meta
                    .pages
                    .ok_or_else(|| Error::MalformedResponse("pagination missing pages".to_string()))?;
                if pages == 0 {
                    return Err(Error::MalformedResponse(
                        "pagination reports zero pages".to_string(),
                    ));
                }
                let page = meta.page.unwrap_or(requested_page);
                if page == 0 || page > pages {
                    return Err(Error::MalformedResponse(format!(
                        "pagination reports page {} of {}",
                        page, pages
                    )));
                }
                (page, meta.limit.unwrap_or(page_size), total, pages)
            }
            None => (
                requested_page.max(1),
                page_size,
                items.len() as u64,
                requested_page.max(1),
            ),
        };

        Ok(SearchResultPage {
            items,
            page_number,
            page_size,
            total_count,
            total_pages,
        })
    }
}
