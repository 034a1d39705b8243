use crate::context::SessionContext;
use crate::dto::remote_dto::{CandidateListResponse, RemoteErrorBody};
use crate::error::{Error, Result, GENERIC_REMOTE_FAILURE};
use crate::models::page::SearchResultPage;
use crate::services::source_service::{CandidateSource, SearchRequest};
use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

const CANDIDATES_PATH: &str = "/api/recruiter/candidates";

/// HTTP-backed candidate source. The server applies the same grammar as the
/// in-memory matcher, so the raw query string is passed through verbatim.
pub struct RemoteCandidateSource {
    client: Client,
    base_url: Url,
}

impl RemoteCandidateSource {
    pub fn new(client: Client, base_url: Url) -> Self {
        Self { client, base_url }
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid endpoint {}: {}", path, e)))
    }

    async fn fetch_page(
        &self,
        ctx: &SessionContext,
        url: Url,
        params: &[(&str, String)],
        requested_page: u32,
        page_size: u32,
    ) -> Result<SearchResultPage> {
        let token = ctx.bearer_token()?;
        let res = self
            .client
            .get(url)
            .query(params)
            .bearer_auth(token)
            .send()
            .await?;

        let status = res.status();
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                return Err(Error::Unauthorized);
            }
            let body: RemoteErrorBody = res.json().await.unwrap_or_default();
            tracing::warn!(%status, "candidate API returned an error");
            return Err(Error::RemoteFailure(
                body.message
                    .unwrap_or_else(|| GENERIC_REMOTE_FAILURE.to_string()),
            ));
        }

        let body: CandidateListResponse = res
            .json()
            .await
            .map_err(|e| Error::MalformedResponse(e.to_string()))?;
        body.into_page(requested_page, page_size)
    }
}

#[async_trait]
impl CandidateSource for RemoteCandidateSource {
    async fn browse(
        &self,
        ctx: &SessionContext,
        page: u32,
        page_size: u32,
    ) -> Result<SearchResultPage> {
        let url = self.endpoint(CANDIDATES_PATH)?;
        let params = [
            ("page", page.to_string()),
            ("limit", page_size.to_string()),
        ];
        self.fetch_page(ctx, url, &params, page, page_size).await
    }

    async fn search(
        &self,
        ctx: &SessionContext,
        request: &SearchRequest,
    ) -> Result<SearchResultPage> {
        let url = self.endpoint(request.mode.search_path())?;
        let params = [
            ("q", request.raw.clone()),
            ("page", request.page.to_string()),
            ("limit", request.page_size.to_string()),
        ];
        tracing::debug!(mode = ?request.mode, page = request.page, "remote candidate search");
        self.fetch_page(ctx, url, &params, request.page, request.page_size)
            .await
    }
}
