use std::fmt;
use std::time::Duration;
use thiserror::Error;

/// The repository pattern could not be compiled.
#[derive(Error, Debug)]
#[error("invalid repository filter {pattern:?}: {source}")]
pub struct FilterError {
    pub pattern: String,
    #[source]
    pub source: regex::Error,
}

/// Which end of the time window failed to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WindowEndpoint {
    From,
    To,
}

impl fmt::Display for WindowEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WindowEndpoint::From => f.write_str("from"),
            WindowEndpoint::To => f.write_str("to"),
        }
    }
}

#[derive(Error, Debug)]
#[error("invalid `{endpoint}` timestamp {literal:?} (expected RFC 3339, e.g. 2022-01-01T00:00:00Z): {source}")]
pub struct TimeParseError {
    pub endpoint: WindowEndpoint,
    pub literal: String,
    #[source]
    pub source: chrono::ParseError,
}

/// Anything that went wrong talking to the GitHub API.
///
/// Callers in the aggregation engine treat every variant the same way: the
/// subject failed and the batch fails with it.
#[derive(Error, Debug)]
pub enum QueryError {
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("GitHub API returned status {status}: {body}")]
    Status { status: u16, body: String },
    #[error("GraphQL error: {0}")]
    Api(String),
    #[error("malformed response: {0}")]
    Malformed(String),
    #[error("user {0:?} not found")]
    UserNotFound(String),
    #[error("team {org}/{team} not found")]
    TeamNotFound { org: String, team: String },
    #[error("invalid {field}: {reason}")]
    InvalidInput { field: String, reason: String },
}

#[derive(Error, Debug)]
pub enum FanoutError {
    #[error("query for {login} failed: {source}")]
    Query {
        login: String,
        #[source]
        source: QueryError,
    },
    #[error("subject task terminated abnormally: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error("fan-out did not finish within {0:?}")]
    DeadlineExceeded(Duration),
}
