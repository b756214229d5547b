use std::time::Duration;

use tracing::{debug, info};
use ureq::Agent;

use crate::error::{FetchError, FetchFailureKind};
use crate::model::{GraphqlRequest, GraphqlResponse, Record, SEARCH_TAG};

pub const DEFAULT_ENDPOINT: &str = "https://arweave.net/graphql";

/// Source of transaction records for a built query.
pub trait Fetcher: Send + Sync {
    fn fetch(&self, request: &GraphqlRequest) -> Result<Vec<Record>, FetchError>;
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub endpoint: String,
    /// `None` leaves the transport default in place.
    pub timeout: Option<Duration>,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout: None,
        }
    }
}

pub struct GraphqlFetcher {
    agent: Agent,
    endpoint: String,
}

impl GraphqlFetcher {
    pub fn new(config: FetchConfig) -> Self {
        let agent = match config.timeout {
            Some(timeout) => Agent::new_with_config(
                Agent::config_builder()
                    .timeout_global(Some(timeout))
                    .build(),
            ),
            None => Agent::new_with_defaults(),
        };

        Self {
            agent,
            endpoint: config.endpoint,
        }
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl Fetcher for GraphqlFetcher {
    fn fetch(&self, request: &GraphqlRequest) -> Result<Vec<Record>, FetchError> {
        let payload = serde_json::to_vec(request).map_err(|err| {
            FetchError::new(
                FetchFailureKind::Body,
                format!("failed serializing graphql request: {err}"),
            )
        })?;

        debug!(
            endpoint = %self.endpoint,
            tag = SEARCH_TAG,
            values = ?request.variables.values,
            "posting transaction query"
        );

        let response = self
            .agent
            .post(self.endpoint.as_str())
            .header("Content-Type", "application/json")
            .send(payload.as_slice())
            .map_err(|err| match err {
                ureq::Error::StatusCode(code) => FetchError::new(
                    FetchFailureKind::Status,
                    format!("endpoint {} responded with status {code}", self.endpoint),
                ),
                other => FetchError::new(
                    FetchFailureKind::Transport,
                    format!("failed querying {}: {other}", self.endpoint),
                ),
            })?;

        let body = response.into_body().read_to_string().map_err(|err| {
            FetchError::new(
                FetchFailureKind::Body,
                format!("failed reading graphql response body: {err}"),
            )
        })?;

        let records = decode_response(&body)?;
        info!(
            endpoint = %self.endpoint,
            records = records.len(),
            "transaction query returned"
        );
        Ok(records)
    }
}

/// Unwraps `data.transactions.edges[].node` from a GraphQL response body.
pub fn decode_response(body: &str) -> Result<Vec<Record>, FetchError> {
    let response: GraphqlResponse = serde_json::from_str(body).map_err(|err| {
        FetchError::new(
            FetchFailureKind::Decode,
            format!("failed parsing graphql response: {err}"),
        )
    })?;

    if let Some(errors) = response.errors.filter(|errors| !errors.is_empty()) {
        let messages = errors
            .into_iter()
            .map(|error| error.message)
            .collect::<Vec<_>>()
            .join("; ");
        return Err(FetchError::new(FetchFailureKind::Remote, messages));
    }

    let connection = response
        .data
        .and_then(|data| data.transactions)
        .ok_or_else(|| {
            FetchError::new(
                FetchFailureKind::Decode,
                "graphql response is missing data.transactions",
            )
        })?;

    Ok(connection.edges.into_iter().map(|edge| edge.node).collect())
}
