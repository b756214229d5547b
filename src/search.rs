use tracing::{debug, info, warn};

use crate::dedup::dedupe_by_redirect;
use crate::error::SearchError;
use crate::fetch::Fetcher;
use crate::model::{GraphqlRequest, ResultEntry};
use crate::query::{build_request, is_blank};

/// Builds the query, fetches once, and de-duplicates by redirect.
pub fn run_search(raw: &str, fetcher: &dyn Fetcher) -> Result<Vec<ResultEntry>, SearchError> {
    let request = build_request(raw).ok_or(SearchError::EmptyQuery)?;
    execute(&request, fetcher)
}

pub fn execute(
    request: &GraphqlRequest,
    fetcher: &dyn Fetcher,
) -> Result<Vec<ResultEntry>, SearchError> {
    let records = fetcher.fetch(request)?;
    let fetched = records.len();
    let entries = dedupe_by_redirect(records);
    debug!(fetched, kept = entries.len(), "deduplicated records by redirect");
    Ok(entries)
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SessionState {
    Idle,
    Loading,
    Settled,
}

#[derive(Debug, Clone)]
pub struct SearchTicket {
    pub seq: u64,
    pub request: GraphqlRequest,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Completion {
    Applied,
    Stale,
}

/// Result list, loading flag and notification shown to a rendering surface.
///
/// Every `begin` issues a new sequence number; only the completion carrying the
/// latest one is applied.
#[derive(Debug)]
pub struct SearchSession {
    state: SessionState,
    results: Vec<ResultEntry>,
    last_error: Option<SearchError>,
    last_query: Option<String>,
    latest_seq: u64,
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

impl SearchSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            results: Vec::new(),
            last_error: None,
            last_query: None,
            latest_seq: 0,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn results(&self) -> &[ResultEntry] {
        &self.results
    }

    pub fn is_loading(&self) -> bool {
        self.state == SessionState::Loading
    }

    pub fn last_error(&self) -> Option<&SearchError> {
        self.last_error.as_ref()
    }

    pub fn last_query(&self) -> Option<&str> {
        self.last_query.as_deref()
    }

    /// Settled on a real query with nothing to show and no failure.
    pub fn is_empty_settled(&self) -> bool {
        self.state == SessionState::Settled
            && self.results.is_empty()
            && self.last_error.is_none()
            && self.last_query.as_deref().is_some_and(|query| !is_blank(query))
    }

    pub fn begin(&mut self, raw: &str) -> Result<SearchTicket, SearchError> {
        self.results.clear();
        self.last_error = None;
        self.last_query = Some(raw.to_string());

        let Some(request) = build_request(raw) else {
            // A blank search never supersedes one already in flight.
            if self.state != SessionState::Loading {
                self.state = SessionState::Settled;
            }
            self.last_error = Some(SearchError::EmptyQuery);
            return Err(SearchError::EmptyQuery);
        };

        self.latest_seq += 1;
        self.state = SessionState::Loading;
        info!(
            seq = self.latest_seq,
            values = ?request.variables.values,
            "search started"
        );

        Ok(SearchTicket {
            seq: self.latest_seq,
            request,
        })
    }

    pub fn complete(
        &mut self,
        seq: u64,
        outcome: Result<Vec<ResultEntry>, SearchError>,
    ) -> Completion {
        if seq != self.latest_seq {
            debug!(seq, latest = self.latest_seq, "discarding stale search response");
            return Completion::Stale;
        }

        self.state = SessionState::Settled;
        match outcome {
            Ok(entries) => {
                info!(seq, results = entries.len(), "search settled");
                self.results = entries;
                self.last_error = None;
            }
            Err(err) => {
                match &err {
                    SearchError::Fetch(failure) => warn!(
                        seq,
                        kind = %failure.kind,
                        reason = %failure.reason,
                        "search failed"
                    ),
                    SearchError::EmptyQuery => warn!(seq, error = %err, "search failed"),
                }
                self.last_error = Some(err);
            }
        }
        Completion::Applied
    }

    /// `begin`, fetch and `complete` on the calling thread.
    pub fn search(&mut self, raw: &str, fetcher: &dyn Fetcher) -> Result<(), SearchError> {
        let ticket = self.begin(raw)?;
        let outcome = run_search(raw, fetcher);
        let failure = outcome.as_ref().err().cloned();
        self.complete(ticket.seq, outcome);
        match failure {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod tests;
