pub mod config;
pub mod context;
pub mod dto;
pub mod error;
pub mod models;
pub mod services;

use crate::context::SessionContext;
use crate::services::remote_service::RemoteCandidateSource;
use crate::services::session_service::SearchSession;
use crate::services::source_service::SearchMode;
use reqwest::Client;
use std::sync::Arc;

/// Client-side application state: one shared HTTP client behind one remote
/// source, and one session per search surface.
#[derive(Clone)]
pub struct AppState {
    pub directory: SearchSession<RemoteCandidateSource>,
    pub applied: SearchSession<RemoteCandidateSource>,
}

impl AppState {
    pub fn new(ctx: SessionContext) -> Self {
        let config = crate::config::get_config();
        let http_client = Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()
            .unwrap();

        let source = Arc::new(RemoteCandidateSource::new(
            http_client,
            config.api_base_url.clone(),
        ));

        Self {
            directory: SearchSession::new(SearchMode::Directory, source.clone(), ctx.clone()),
            applied: SearchSession::new(SearchMode::Applied, source, ctx),
        }
    }
}
