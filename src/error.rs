use std::fmt;

use thiserror::Error;

/// Where a fetch went wrong. Only used for diagnostics; callers treat every
/// [`FetchError`] the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchFailureKind {
    Transport,
    Status,
    Body,
    Decode,
    Remote,
}

impl FetchFailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Transport => "transport",
            Self::Status => "status",
            Self::Body => "body",
            Self::Decode => "decode",
            Self::Remote => "remote",
        }
    }
}

impl fmt::Display for FetchFailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure while fetching or decoding a transaction query.
#[derive(Debug, Clone, Error)]
#[error("failed to fetch transactions ({kind}): {reason}")]
pub struct FetchError {
    pub kind: FetchFailureKind,
    pub reason: String,
}

impl FetchError {
    pub fn new(kind: FetchFailureKind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, Error)]
pub enum SearchError {
    #[error("Please enter a search query.")]
    EmptyQuery,
    #[error("An error occurred while fetching transactions.")]
    Fetch(#[from] FetchError),
}
