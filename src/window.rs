use crate::error::{TimeParseError, WindowEndpoint};
use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Days covered by the window when `--from` is omitted.
pub const DEFAULT_WINDOW_DAYS: i64 = 365;

/// Contribution window sent to the API. `from > to` is not rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl TimeRange {
    pub fn parse(from: &str, to: &str) -> Result<Self, TimeParseError> {
        Ok(Self {
            from: parse_endpoint(WindowEndpoint::From, from)?,
            to: parse_endpoint(WindowEndpoint::To, to)?,
        })
    }

    /// Fills in missing endpoints: `to` defaults to `now`, `from` to
    /// [`DEFAULT_WINDOW_DAYS`] before `to`.
    pub fn resolve(
        from: Option<&str>,
        to: Option<&str>,
        now: DateTime<Utc>,
    ) -> Result<Self, TimeParseError> {
        let from = from
            .map(|literal| parse_endpoint(WindowEndpoint::From, literal))
            .transpose()?;
        let to = to
            .map(|literal| parse_endpoint(WindowEndpoint::To, literal))
            .transpose()?
            .unwrap_or(now);
        let from = from.unwrap_or(to - Duration::days(DEFAULT_WINDOW_DAYS));
        Ok(Self { from, to })
    }

    pub fn from_wire(&self) -> String {
        self.from.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn to_wire(&self) -> String {
        self.to.to_rfc3339_opts(SecondsFormat::Secs, true)
    }

    pub fn describe(&self) -> String {
        format!("{} → {}", self.from_wire(), self.to_wire())
    }
}

fn parse_endpoint(endpoint: WindowEndpoint, literal: &str) -> Result<DateTime<Utc>, TimeParseError> {
    DateTime::parse_from_rfc3339(literal)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|source| TimeParseError {
            endpoint,
            literal: literal.to_string(),
            source,
        })
}
