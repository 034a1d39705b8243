use async_trait::async_trait;
use candidate_search::context::SessionContext;
use candidate_search::error::{Error, Result, GENERIC_REMOTE_FAILURE};
use candidate_search::models::candidate::{Candidate, StudentProfile};
use candidate_search::models::page::SearchResultPage;
use candidate_search::services::session_service::{
    Presenter, SearchSession, SearchSessionState, SessionPhase,
};
use candidate_search::services::source_service::{
    CandidateSource, InMemoryCandidateSource, SearchMode, SearchRequest,
};
use mockall::mock;
use std::sync::{Arc, Mutex};
use std::time::Duration;

mock! {
    Source {}

    #[async_trait]
    impl CandidateSource for Source {
        async fn browse(
            &self,
            ctx: &SessionContext,
            page: u32,
            page_size: u32,
        ) -> Result<SearchResultPage>;

        async fn search(
            &self,
            ctx: &SessionContext,
            request: &SearchRequest,
        ) -> Result<SearchResultPage>;
    }
}

fn ctx() -> SessionContext {
    SessionContext::authenticated("test-token")
}

fn dev_candidate(i: usize) -> Candidate {
    Candidate {
        id: format!("dev-{i}"),
        first_name: Some(format!("Dev{i}")),
        email: Some(format!("dev{i}@mail.com")),
        student_profile: Some(StudentProfile {
            headline: Some("Software developer".to_string()),
            summary: None,
        }),
        ..Default::default()
    }
}

fn analyst_candidate(i: usize) -> Candidate {
    Candidate {
        id: format!("analyst-{i}"),
        first_name: Some(format!("Analyst{i}")),
        email: Some(format!("analyst{i}@mail.com")),
        student_profile: Some(StudentProfile {
            headline: Some("Data analyst".to_string()),
            summary: None,
        }),
        ..Default::default()
    }
}

#[tokio::test]
async fn directory_search_paginates_and_guards_the_boundaries() {
    let mut pool: Vec<Candidate> = (0..23).map(dev_candidate).collect();
    pool.extend((0..5).map(analyst_candidate));
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let session = SearchSession::new(SearchMode::Directory, source, ctx());

    let state = session.submit("developer").await.unwrap();
    assert_eq!(state.phase, SessionPhase::Results);
    assert!(state.searched);
    let page = state.page.as_ref().unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.total_count, 23);
    assert_eq!(page.total_pages, 3);
    assert!(state.can_go_next());
    assert!(!state.can_go_previous());

    let state = session.next_page().await.unwrap();
    assert_eq!(state.page.as_ref().unwrap().page_number, 2);
    let state = session.next_page().await.unwrap();
    let page = state.page.as_ref().unwrap();
    assert_eq!(page.page_number, 3);
    assert_eq!(page.items.len(), 3);
    assert!(!state.can_go_next());

    // At the last page "next" is a no-op, not a clamped re-fetch.
    let state = session.next_page().await.unwrap();
    assert_eq!(state.page.as_ref().unwrap().page_number, 3);

    let state = session.previous_page().await.unwrap();
    assert_eq!(state.page.as_ref().unwrap().page_number, 2);
}

#[tokio::test]
async fn browse_lists_the_unfiltered_pool_without_marking_searched() {
    let pool: Vec<Candidate> = (0..15).map(dev_candidate).collect();
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let session = SearchSession::new(SearchMode::Directory, source, ctx());

    let state = session.browse().await.unwrap();
    assert_eq!(state.phase, SessionPhase::Results);
    assert!(!state.searched);
    assert_eq!(state.results().len(), 10);

    let state = session.next_page().await.unwrap();
    let page = state.page.as_ref().unwrap();
    assert_eq!(page.page_number, 2);
    assert_eq!(page.items.len(), 5);
}

#[tokio::test]
async fn phrase_query_matches_exactly_one_summary() {
    let full_stack = Candidate {
        id: "fs".to_string(),
        full_name: Some("Sam Doe".to_string()),
        student_profile: Some(StudentProfile {
            headline: None,
            summary: Some("Experienced Full Stack Developer".to_string()),
        }),
        ..Default::default()
    };
    let pool = vec![dev_candidate(0), full_stack, analyst_candidate(0)];
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let session = SearchSession::new(SearchMode::Applied, source, ctx());

    let state = session.submit(r#""full stack""#).await.unwrap();
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].id, "fs");
}

#[tokio::test]
async fn empty_query_settles_locally_as_an_error() {
    // No expectations: any call on the source would panic the test.
    let source = Arc::new(MockSource::new());
    let session = SearchSession::new(SearchMode::Applied, source, ctx());

    let state = session.submit("   ").await.unwrap();
    assert_eq!(state.phase, SessionPhase::Error);
    assert!(state.searched);
    assert!(!state.loading);
    assert!(state.results().is_empty());
    assert_eq!(state.error.as_deref(), Some("Please enter a search value."));
}

#[tokio::test]
async fn missing_credential_short_circuits_before_any_state_change() {
    let source = Arc::new(MockSource::new());
    let session = SearchSession::new(
        SearchMode::Directory,
        source,
        SessionContext::anonymous(),
    );

    let outcome = session.submit("rust").await;
    assert!(matches!(outcome, Err(Error::Unauthorized)));

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(!state.searched);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn rejected_credential_aborts_instead_of_recording_an_error() {
    let mut source = MockSource::new();
    source
        .expect_search()
        .returning(|_, _| Err(Error::Unauthorized));
    let session = SearchSession::new(SearchMode::Applied, Arc::new(source), ctx());

    let outcome = session.submit("rust").await;
    assert!(matches!(outcome, Err(Error::Unauthorized)));

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.error.is_none());
}

#[tokio::test]
async fn remote_failure_surfaces_the_server_message() {
    let mut source = MockSource::new();
    source
        .expect_search()
        .returning(|_, _| Err(Error::RemoteFailure("No access".to_string())));
    let session = SearchSession::new(SearchMode::Applied, Arc::new(source), ctx());

    let state = session.submit("rust").await.unwrap();
    assert_eq!(state.phase, SessionPhase::Error);
    assert_eq!(state.error.as_deref(), Some("No access"));
    assert!(state.searched);
    assert!(state.results().is_empty());
}

#[tokio::test]
async fn malformed_response_surfaces_the_generic_message() {
    let mut source = MockSource::new();
    source
        .expect_search()
        .returning(|_, _| Err(Error::MalformedResponse("data was a string".to_string())));
    let session = SearchSession::new(SearchMode::Applied, Arc::new(source), ctx());

    let state = session.submit("rust").await.unwrap();
    assert_eq!(state.phase, SessionPhase::Error);
    assert_eq!(state.error.as_deref(), Some(GENERIC_REMOTE_FAILURE));
}

#[tokio::test]
async fn clear_resets_to_idle_without_searching() {
    let pool = vec![dev_candidate(0)];
    let source = Arc::new(InMemoryCandidateSource::new(pool));
    let session = SearchSession::new(SearchMode::Directory, source, ctx());

    session.submit("developer").await.unwrap();
    let state = session.clear();
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.raw_query.is_empty());
    assert!(state.page.is_none());
    assert!(state.error.is_none());
    assert!(!state.searched);
}

/// Source whose "slow" query resolves after the "fast" one, so an older
/// submission completes last.
struct RacingSource;

fn one_result_page(id: &str) -> SearchResultPage {
    SearchResultPage {
        items: vec![Candidate {
            id: id.to_string(),
            ..Default::default()
        }],
        page_number: 1,
        page_size: 50,
        total_count: 1,
        total_pages: 1,
    }
}

#[async_trait]
impl CandidateSource for RacingSource {
    async fn browse(
        &self,
        _ctx: &SessionContext,
        _page: u32,
        _page_size: u32,
    ) -> Result<SearchResultPage> {
        Ok(SearchResultPage::empty(10))
    }

    async fn search(
        &self,
        _ctx: &SessionContext,
        request: &SearchRequest,
    ) -> Result<SearchResultPage> {
        if request.raw == "slow" {
            tokio::time::sleep(Duration::from_millis(50)).await;
            Ok(one_result_page("from-slow"))
        } else {
            Ok(one_result_page("from-fast"))
        }
    }
}

#[derive(Default)]
struct RecordingPresenter {
    states: Mutex<Vec<SearchSessionState>>,
}

impl Presenter for RecordingPresenter {
    fn present(&self, state: &SearchSessionState) {
        self.states.lock().unwrap().push(state.clone());
    }
}

#[tokio::test]
async fn later_submission_wins_over_an_earlier_unresolved_one() {
    let recorder = Arc::new(RecordingPresenter::default());
    let session = SearchSession::new(SearchMode::Applied, Arc::new(RacingSource), ctx())
        .with_presenter(recorder.clone());

    // "slow" is submitted first but resolves last; its result must be
    // discarded rather than overwrite the newer one.
    let (first, second) = tokio::join!(session.submit("slow"), session.submit("fast"));
    first.unwrap();
    second.unwrap();

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Results);
    assert_eq!(state.raw_query, "fast");
    assert_eq!(state.results().len(), 1);
    assert_eq!(state.results()[0].id, "from-fast");

    // The stale completion was never presented either.
    let presented = recorder.states.lock().unwrap();
    assert!(presented
        .iter()
        .all(|s| s.results().iter().all(|c| c.id != "from-slow")));
    assert!(presented.iter().any(|s| s.phase == SessionPhase::Results
        && s.results().first().is_some_and(|c| c.id == "from-fast")));
}

#[tokio::test]
async fn clear_supersedes_an_in_flight_search() {
    let session = SearchSession::new(SearchMode::Applied, Arc::new(RacingSource), ctx());

    let submit = session.submit("slow");
    let cleared = async {
        // Let the submission issue its request first.
        tokio::time::sleep(Duration::from_millis(10)).await;
        session.clear()
    };
    let (outcome, _) = tokio::join!(submit, cleared);
    outcome.unwrap();

    let state = session.state();
    assert_eq!(state.phase, SessionPhase::Idle);
    assert!(state.page.is_none());
    assert!(!state.searched);
}
