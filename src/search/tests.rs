use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::error::{FetchError, FetchFailureKind};
use crate::model::{REDIRECT_TAG, Record, TITLE_TAG, Tag};

struct StaticFetcher {
    records: Vec<Record>,
    calls: AtomicUsize,
    seen_values: Mutex<Vec<Vec<String>>>,
}

impl StaticFetcher {
    fn new(records: Vec<Record>) -> Self {
        Self {
            records,
            calls: AtomicUsize::new(0),
            seen_values: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Fetcher for StaticFetcher {
    fn fetch(&self, request: &GraphqlRequest) -> Result<Vec<Record>, FetchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.seen_values
            .lock()
            .expect("values lock")
            .push(request.variables.values.clone());
        Ok(self.records.clone())
    }
}

struct FailingFetcher;

impl Fetcher for FailingFetcher {
    fn fetch(&self, _request: &GraphqlRequest) -> Result<Vec<Record>, FetchError> {
        Err(FetchError::new(
            FetchFailureKind::Transport,
            "connection refused",
        ))
    }
}

fn redirecting(id: &str, redirect: &str) -> Record {
    Record {
        id: id.to_string(),
        tags: vec![Tag::new(REDIRECT_TAG, redirect)],
    }
}

fn ids(entries: &[ResultEntry]) -> Vec<&str> {
    entries.iter().map(ResultEntry::id).collect()
}

#[test]
fn run_search_normalizes_fetches_and_deduplicates() {
    let fetcher = StaticFetcher::new(vec![
        redirecting("1", "http://x.com"),
        redirecting("2", "http://x.com"),
        redirecting("3", "http://y.com"),
    ]);

    let entries = run_search("  git hub ", &fetcher).expect("search succeeds");
    assert_eq!(ids(&entries), vec!["1", "3"]);
    assert_eq!(fetcher.calls(), 1);
    assert_eq!(
        *fetcher.seen_values.lock().expect("values lock"),
        vec![vec!["github".to_string()]]
    );
}

#[test]
fn run_search_drops_records_without_redirect() {
    let fetcher = StaticFetcher::new(vec![Record {
        id: "1".to_string(),
        tags: vec![Tag::new(TITLE_TAG, "No redirect here")],
    }]);

    let entries = run_search("github", &fetcher).expect("search succeeds");
    assert!(entries.is_empty());
}

#[test]
fn blank_search_never_reaches_fetcher() {
    let fetcher = StaticFetcher::new(vec![redirecting("1", "http://x.com")]);

    for raw in ["", "  ", "\t\n"] {
        let err = run_search(raw, &fetcher).expect_err("blank query is rejected");
        assert!(matches!(err, SearchError::EmptyQuery));
    }

    let mut session = SearchSession::new();
    let err = session
        .search("  ", &fetcher)
        .expect_err("blank session search is rejected");
    assert_eq!(err.to_string(), "Please enter a search query.");
    assert_eq!(fetcher.calls(), 0);
    assert!(!session.is_loading());
    assert!(!session.is_empty_settled());
    assert!(matches!(session.last_error(), Some(SearchError::EmptyQuery)));
}

#[test]
fn fetch_failure_clears_loading_and_leaves_results_empty() {
    let mut session = SearchSession::new();
    let ok = StaticFetcher::new(vec![redirecting("1", "http://x.com")]);
    session.search("github", &ok).expect("first search succeeds");
    assert_eq!(session.results().len(), 1);

    let err = session
        .search("dapp", &FailingFetcher)
        .expect_err("failing fetch surfaces an error");
    assert!(matches!(err, SearchError::Fetch(_)));
    assert_eq!(
        err.to_string(),
        "An error occurred while fetching transactions."
    );
    assert!(!session.is_loading());
    assert_eq!(session.state(), SessionState::Settled);
    assert!(session.results().is_empty());
    assert!(session.last_error().is_some());
    assert!(!session.is_empty_settled());
}

#[test]
fn session_walks_idle_loading_settled() {
    let mut session = SearchSession::new();
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.last_query().is_none());

    let ticket = session.begin("weave").expect("ticket issued");
    assert!(session.is_loading());
    assert_eq!(ticket.request.variables.values, vec!["weave".to_string()]);

    let applied = session.complete(ticket.seq, Ok(Vec::new()));
    assert_eq!(applied, Completion::Applied);
    assert_eq!(session.state(), SessionState::Settled);
    assert!(session.is_empty_settled());
    assert_eq!(session.last_query(), Some("weave"));
}

#[test]
fn new_search_clears_previous_results_before_fetching() {
    let mut session = SearchSession::new();
    let ticket = session.begin("ao").expect("ticket issued");
    session.complete(
        ticket.seq,
        Ok(vec![ResultEntry::new(redirecting("1", "http://x.com"))]),
    );
    assert_eq!(session.results().len(), 1);

    let _next = session.begin("arweave").expect("second ticket issued");
    assert!(session.results().is_empty());
    assert!(session.is_loading());
}

#[test]
fn stale_completion_is_discarded() {
    let mut session = SearchSession::new();
    let older = session.begin("github").expect("first ticket");
    let newer = session.begin("dapp").expect("second ticket");
    assert!(newer.seq > older.seq);

    let stale = session.complete(
        older.seq,
        Ok(vec![ResultEntry::new(redirecting("old", "http://old.com"))]),
    );
    assert_eq!(stale, Completion::Stale);
    assert!(session.is_loading());
    assert!(session.results().is_empty());

    let applied = session.complete(
        newer.seq,
        Ok(vec![ResultEntry::new(redirecting("new", "http://new.com"))]),
    );
    assert_eq!(applied, Completion::Applied);
    assert_eq!(ids(session.results()), vec!["new"]);

    let late = session.complete(older.seq, Err(SearchError::EmptyQuery));
    assert_eq!(late, Completion::Stale);
    assert_eq!(ids(session.results()), vec!["new"]);
    assert!(session.last_error().is_none());
}

#[test]
fn blank_search_keeps_in_flight_request_loading() {
    let mut session = SearchSession::new();
    let ticket = session.begin("github").expect("ticket issued");

    session.begin(" ").expect_err("blank query is rejected");
    assert!(session.is_loading());

    assert_eq!(
        session.complete(ticket.seq, Ok(Vec::new())),
        Completion::Applied
    );
    assert!(!session.is_loading());
}
