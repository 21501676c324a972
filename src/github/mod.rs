use crate::error::QueryError;
use crate::window::TimeRange;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod client;
pub mod query;

pub use client::GitHubClient;

/// One `(repository, count)` entry of a contribution list, as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionRecord {
    pub repository: String,
    pub count: u64,
}

impl ContributionRecord {
    pub fn new(repository: impl Into<String>, count: u64) -> Self {
        Self {
            repository: repository.into(),
            count,
        }
    }
}

/// Everything one query returned for one subject over one window.
///
/// The lists are kept exactly as received; duplicates are merged later by
/// [`crate::aggregate::aggregate`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContributionSnapshot {
    pub login: String,
    pub display_name: String,
    pub commits: Vec<ContributionRecord>,
    pub pull_requests: Vec<ContributionRecord>,
    pub pull_request_reviews: Vec<ContributionRecord>,
}

/// Remote source of per-subject contribution snapshots.
#[async_trait]
pub trait ContributionSource: Send + Sync {
    async fn fetch(
        &self,
        login: &str,
        window: &TimeRange,
        max_per_kind: u32,
    ) -> Result<ContributionSnapshot, QueryError>;
}

/// Resolves an organization team to its member logins.
#[async_trait]
pub trait TeamDirectory: Send + Sync {
    async fn list_team_members(&self, org: &str, team_slug: &str)
        -> Result<Vec<String>, QueryError>;
}

/// Team members in ascending login order, ready to hand to the fan-out.
pub async fn team_subjects(
    directory: &dyn TeamDirectory,
    org: &str,
    team_slug: &str,
) -> Result<Vec<String>, QueryError> {
    let mut members = directory.list_team_members(org, team_slug).await?;
    members.sort();
    info!("Team {}/{} has {} members", org, team_slug, members.len());
    Ok(members)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedTeam(Vec<&'static str>);

    #[async_trait]
    impl TeamDirectory for FixedTeam {
        async fn list_team_members(
            &self,
            org: &str,
            team_slug: &str,
        ) -> Result<Vec<String>, QueryError> {
            if org != "acme" {
                return Err(QueryError::TeamNotFound {
                    org: org.to_string(),
                    team: team_slug.to_string(),
                });
            }
            Ok(self.0.iter().map(|s| s.to_string()).collect())
        }
    }

    #[tokio::test]
    async fn team_subjects_are_sorted_by_login() {
        let team = FixedTeam(vec!["zoe", "alice", "Bob", "carol"]);
        let subjects = team_subjects(&team, "acme", "platform").await.unwrap();
        assert_eq!(subjects, vec!["Bob", "alice", "carol", "zoe"]);
    }

    #[tokio::test]
    async fn team_lookup_errors_propagate() {
        let team = FixedTeam(vec!["alice"]);
        let err = team_subjects(&team, "nope", "platform").await.unwrap_err();
        assert!(matches!(err, QueryError::TeamNotFound { .. }));
    }
}
