use crate::context::SessionContext;
use crate::error::{Error, Result};
use crate::models::candidate::Candidate;
use crate::models::page::SearchResultPage;
use crate::models::query::Query;
use crate::services::query_service::parse_query;
use crate::services::source_service::{CandidateSource, SearchMode, SearchRequest};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Idle,
    Searching,
    Results,
    Error,
}

/// Snapshot handed to the presentation layer after every transition. Always
/// internally consistent; a superseded request never produces one.
#[derive(Debug, Clone)]
pub struct SearchSessionState {
    pub phase: SessionPhase,
    pub raw_query: String,
    pub query: Option<Query>,
    pub page: Option<SearchResultPage>,
    pub error: Option<String>,
    pub loading: bool,
    /// Distinguishes "never searched" from "searched, zero results".
    pub searched: bool,
}

impl SearchSessionState {
    fn idle() -> Self {
        Self {
            phase: SessionPhase::Idle,
            raw_query: String::new(),
            query: None,
            page: None,
            error: None,
            loading: false,
            searched: false,
        }
    }

    pub fn results(&self) -> &[Candidate] {
        self.page.as_ref().map(|p| p.items.as_slice()).unwrap_or(&[])
    }

    /// Drives the enabled state of the "next" control.
    pub fn can_go_next(&self) -> bool {
        self.phase == SessionPhase::Results
            && !self.loading
            && self.page.as_ref().is_some_and(SearchResultPage::has_next)
    }

    pub fn can_go_previous(&self) -> bool {
        self.phase == SessionPhase::Results
            && !self.loading
            && self
                .page
                .as_ref()
                .is_some_and(SearchResultPage::has_previous)
    }
}

/// Receives state snapshots after every transition.
pub trait Presenter: Send + Sync {
    fn present(&self, state: &SearchSessionState);
}

struct Inner {
    state: SearchSessionState,
    /// Sequence number of the most recently issued mutation. A completion
    /// tagged with anything older is stale and gets discarded.
    latest_seq: u64,
}

/// Orchestrates parse -> match -> paginate -> present for one search view.
/// Created on entry to the view, discarded on leaving it. One logical
/// mutation runs at a time; overlapping submissions resolve
/// last-submission-wins.
pub struct SearchSession<S> {
    mode: SearchMode,
    ctx: SessionContext,
    source: Arc<S>,
    inner: Arc<Mutex<Inner>>,
    presenter: Option<Arc<dyn Presenter>>,
}

impl<S> Clone for SearchSession<S> {
    fn clone(&self) -> Self {
        Self {
            mode: self.mode,
            ctx: self.ctx.clone(),
            source: self.source.clone(),
            inner: self.inner.clone(),
            presenter: self.presenter.clone(),
        }
    }
}

impl<S: CandidateSource> SearchSession<S> {
    pub fn new(mode: SearchMode, source: Arc<S>, ctx: SessionContext) -> Self {
        Self {
            mode,
            ctx,
            source,
            inner: Arc::new(Mutex::new(Inner {
                state: SearchSessionState::idle(),
                latest_seq: 0,
            })),
            presenter: None,
        }
    }

    pub fn with_presenter(mut self, presenter: Arc<dyn Presenter>) -> Self {
        self.presenter = Some(presenter);
        self
    }

    pub fn mode(&self) -> SearchMode {
        self.mode
    }

    pub fn state(&self) -> SearchSessionState {
        self.lock().state.clone()
    }

    /// Submits a raw query. Missing credential short-circuits before any
    /// state mutation or network call; an empty query settles locally as an
    /// error; everything else is delegated to the source.
    pub async fn submit(&self, raw: &str) -> Result<SearchSessionState> {
        self.ctx.bearer_token()?;

        let seq = self.begin(Some(raw), true);
        let query = match parse_query(raw) {
            Ok(query) => query,
            Err(err) => return Ok(self.settle(seq, None, Err(err))),
        };

        tracing::debug!(mode = ?self.mode, query = %query, "search submitted");
        let request = SearchRequest {
            mode: self.mode,
            raw: raw.trim().to_string(),
            query: query.clone(),
            page: 1,
            page_size: self.mode.page_size(),
        };
        let outcome = self.source.search(&self.ctx, &request).await;
        self.resolve(seq, Some(query), outcome)
    }

    /// Directory mode: loads page 1 of the unfiltered pool, as on first
    /// entry to the view.
    pub async fn browse(&self) -> Result<SearchSessionState> {
        self.load_page(1).await
    }

    /// Directory mode: loads one page of the unfiltered pool.
    pub async fn load_page(&self, page: u32) -> Result<SearchSessionState> {
        self.ctx.bearer_token()?;
        if self.mode != SearchMode::Directory {
            tracing::warn!("browse requested outside directory mode");
            return Ok(self.state());
        }

        let seq = self.begin(Some(""), false);
        let outcome = self
            .source
            .browse(&self.ctx, page, self.mode.page_size())
            .await;
        self.resolve(seq, None, outcome)
    }

    /// Advances one page. No-op at the last page; the presenter disables the
    /// control via `can_go_next`, so a stale page number is never shown.
    pub async fn next_page(&self) -> Result<SearchSessionState> {
        self.turn_page(1).await
    }

    /// Goes back one page. No-op below page 1.
    pub async fn previous_page(&self) -> Result<SearchSessionState> {
        self.turn_page(-1).await
    }

    /// Explicit user reset. Never triggers a search; supersedes anything in
    /// flight so a late completion cannot resurrect the cleared state.
    pub fn clear(&self) -> SearchSessionState {
        let snapshot = {
            let mut inner = self.lock();
            inner.latest_seq += 1;
            inner.state = SearchSessionState::idle();
            inner.state.clone()
        };
        self.present(&snapshot);
        snapshot
    }

    async fn turn_page(&self, delta: i64) -> Result<SearchSessionState> {
        self.ctx.bearer_token()?;

        let (raw, query, target) = {
            let inner = self.lock();
            let state = &inner.state;
            if state.phase != SessionPhase::Results || state.loading {
                return Ok(state.clone());
            }
            let Some(page) = &state.page else {
                return Ok(state.clone());
            };
            let target = page.page_number as i64 + delta;
            if target < 1 || target > page.total_pages as i64 {
                return Ok(state.clone());
            }
            (state.raw_query.clone(), state.query.clone(), target as u32)
        };

        let seq = self.begin(None, false);
        let outcome = match &query {
            // Same parsed query, new page number; raw input is not re-parsed.
            Some(query) => {
                let request = SearchRequest {
                    mode: self.mode,
                    raw: raw.trim().to_string(),
                    query: query.clone(),
                    page: target,
                    page_size: self.mode.page_size(),
                };
                self.source.search(&self.ctx, &request).await
            }
            None => {
                self.source
                    .browse(&self.ctx, target, self.mode.page_size())
                    .await
            }
        };
        self.resolve(seq, None, outcome)
    }

    /// Enters `Searching` and issues a new sequence number, superseding any
    /// in-flight mutation.
    fn begin(&self, raw: Option<&str>, mark_searched: bool) -> u64 {
        let (seq, snapshot) = {
            let mut inner = self.lock();
            inner.latest_seq += 1;
            let state = &mut inner.state;
            state.phase = SessionPhase::Searching;
            state.loading = true;
            state.error = None;
            if mark_searched {
                state.searched = true;
            }
            if let Some(raw) = raw {
                state.raw_query = raw.to_string();
                state.query = None;
            }
            (inner.latest_seq, inner.state.clone())
        };
        self.present(&snapshot);
        seq
    }

    /// Routes a completed fetch. A rejected credential aborts the session
    /// and propagates, so the caller redirects to login instead of showing
    /// an error message; everything else settles into the state machine.
    fn resolve(
        &self,
        seq: u64,
        query: Option<Query>,
        outcome: Result<SearchResultPage>,
    ) -> Result<SearchSessionState> {
        match outcome {
            Err(Error::Unauthorized) => {
                self.abort(seq);
                Err(Error::Unauthorized)
            }
            other => Ok(self.settle(seq, query, other)),
        }
    }

    /// Discards the session after a mid-flight credential rejection.
    fn abort(&self, seq: u64) {
        let snapshot = {
            let mut inner = self.lock();
            if inner.latest_seq != seq {
                return;
            }
            inner.state = SearchSessionState::idle();
            inner.state.clone()
        };
        self.present(&snapshot);
    }

    /// Applies a completed fetch, unless a newer mutation superseded it.
    fn settle(
        &self,
        seq: u64,
        query: Option<Query>,
        outcome: Result<SearchResultPage>,
    ) -> SearchSessionState {
        let snapshot = {
            let mut inner = self.lock();
            if inner.latest_seq != seq {
                tracing::debug!(seq, latest = inner.latest_seq, "discarding stale result");
                return inner.state.clone();
            }
            let state = &mut inner.state;
            state.loading = false;
            match outcome {
                Ok(page) => {
                    state.phase = SessionPhase::Results;
                    state.page = Some(page);
                    state.error = None;
                    if query.is_some() {
                        state.query = query;
                    }
                }
                Err(err) => {
                    state.phase = SessionPhase::Error;
                    state.page = None;
                    state.error = Some(err.user_message());
                }
            }
            inner.state.clone()
        };
        self.present(&snapshot);
        snapshot
    }

    fn present(&self, snapshot: &SearchSessionState) {
        if let Some(presenter) = &self.presenter {
            presenter.present(snapshot);
        }
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().expect("session state lock poisoned")
    }
}
