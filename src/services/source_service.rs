use crate::context::SessionContext;
use crate::error::Result;
use crate::models::candidate::Candidate;
use crate::models::page::SearchResultPage;
use crate::models::query::Query;
use crate::services::matcher_service::match_candidates;
use crate::services::pagination_service::{paginate, APPLIED_PAGE_SIZE, DIRECTORY_PAGE_SIZE};
use async_trait::async_trait;

/// The two search surfaces. They share one grammar and differ in corpus,
/// endpoint and page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchMode {
    /// The full candidate pool (any registered candidate).
    Directory,
    /// Only candidates who applied to the recruiter's own postings.
    Applied,
}

impl SearchMode {
    pub fn page_size(&self) -> u32 {
        match self {
            SearchMode::Directory => DIRECTORY_PAGE_SIZE,
            SearchMode::Applied => APPLIED_PAGE_SIZE,
        }
    }

    pub fn search_path(&self) -> &'static str {
        match self {
            SearchMode::Directory => "/api/recruiter/candidates/search",
            SearchMode::Applied => "/api/recruiter/applied-candidates/search",
        }
    }
}

/// One search issued by a session. `raw` is what travels to a remote backend
/// verbatim; `query` is what a local backend evaluates. Both describe the
/// same search, so swapping backends is behavior-preserving.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub mode: SearchMode,
    pub raw: String,
    pub query: Query,
    pub page: u32,
    pub page_size: u32,
}

/// Where candidates come from. The in-memory implementation defines the
/// matching semantics; the HTTP implementation delegates them to the server.
#[async_trait]
pub trait CandidateSource: Send + Sync {
    /// Unfiltered directory listing.
    async fn browse(
        &self,
        ctx: &SessionContext,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResultPage>;

    async fn search(&self, ctx: &SessionContext, request: &SearchRequest)
        -> Result<SearchResultPage>;
}

/// Local corpus backend: runs the matcher and paginator in process.
pub struct InMemoryCandidateSource {
    candidates: Vec<Candidate>,
}

impl InMemoryCandidateSource {
    pub fn new(candidates: Vec<Candidate>) -> Self {
        Self { candidates }
    }
}

#[async_trait]
impl CandidateSource for InMemoryCandidateSource {
    async fn browse(
        &self,
        _ctx: &SessionContext,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResultPage> {
        Ok(paginate(&self.candidates, page_size, page))
    }

    async fn search(
        &self,
        _ctx: &SessionContext,
        request: &SearchRequest,
    ) -> Result<SearchResultPage> {
        let matched = match_candidates(&self.candidates, &request.query);
        Ok(paginate(&matched, request.page_size, request.page))
    }
}
