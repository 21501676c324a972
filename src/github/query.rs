//! GraphQL documents and the response shapes they project into.

use super::{ContributionRecord, ContributionSnapshot};
use crate::error::QueryError;
use serde::Deserialize;

pub const CONTRIBUTIONS_QUERY: &str = r#"
query($user: String!, $maxRepos: Int!, $fromTime: DateTime!, $toTime: DateTime!) {
  user(login: $user) {
    login
    name
    contributionsCollection(from: $fromTime, to: $toTime) {
      commitContributionsByRepository(maxRepositories: $maxRepos) {
        repository { nameWithOwner }
        contributions { totalCount }
      }
      pullRequestContributionsByRepository(maxRepositories: $maxRepos) {
        repository { nameWithOwner }
        contributions { totalCount }
      }
      pullRequestReviewContributionsByRepository(maxRepositories: $maxRepos) {
        repository { nameWithOwner }
        contributions { totalCount }
      }
    }
  }
}
"#;

pub const TEAM_MEMBERS_QUERY: &str = r#"
query($org: String!, $team: String!) {
  organization(login: $org) {
    team(slug: $team) {
      members(first: 100) {
        nodes { login }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
}

impl<T> GraphQlResponse<T> {
    /// Any entry in `errors` fails the whole response, even alongside `data`.
    pub fn into_result(self) -> Result<T, QueryError> {
        if !self.errors.is_empty() {
            let messages: Vec<_> = self.errors.into_iter().map(|e| e.message).collect();
            return Err(QueryError::Api(messages.join("; ")));
        }
        self.data
            .ok_or_else(|| QueryError::Malformed("response carried neither data nor errors".into()))
    }
}

#[derive(Debug, Deserialize)]
pub struct UserData {
    user: Option<UserNode>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UserNode {
    login: String,
    name: Option<String>,
    contributions_collection: CollectionNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CollectionNode {
    commit_contributions_by_repository: Vec<RepositoryContributions>,
    pull_request_contributions_by_repository: Vec<RepositoryContributions>,
    pull_request_review_contributions_by_repository: Vec<RepositoryContributions>,
}

#[derive(Debug, Deserialize)]
struct RepositoryContributions {
    repository: RepositoryNode,
    contributions: CountNode,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    name_with_owner: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountNode {
    total_count: u64,
}

fn records(nodes: Vec<RepositoryContributions>) -> Vec<ContributionRecord> {
    nodes
        .into_iter()
        .map(|node| {
            ContributionRecord::new(node.repository.name_with_owner, node.contributions.total_count)
        })
        .collect()
}

impl UserData {
    pub fn into_snapshot(self, requested_login: &str) -> Result<ContributionSnapshot, QueryError> {
        let user = self
            .user
            .ok_or_else(|| QueryError::UserNotFound(requested_login.to_string()))?;
        let collection = user.contributions_collection;

        Ok(ContributionSnapshot {
            login: user.login,
            display_name: user.name.unwrap_or_default(),
            commits: records(collection.commit_contributions_by_repository),
            pull_requests: records(collection.pull_request_contributions_by_repository),
            pull_request_reviews: records(
                collection.pull_request_review_contributions_by_repository,
            ),
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TeamData {
    organization: Option<OrganizationNode>,
}

#[derive(Debug, Deserialize)]
struct OrganizationNode {
    team: Option<TeamNode>,
}

#[derive(Debug, Deserialize)]
struct TeamNode {
    members: MembersNode,
}

#[derive(Debug, Deserialize)]
struct MembersNode {
    nodes: Vec<MemberNode>,
}

#[derive(Debug, Deserialize)]
struct MemberNode {
    login: String,
}

impl TeamData {
    pub fn into_logins(self, org: &str, team: &str) -> Result<Vec<String>, QueryError> {
        let not_found = || QueryError::TeamNotFound {
            org: org.to_string(),
            team: team.to_string(),
        };
        let team_node = self.organization.ok_or_else(not_found)?.team.ok_or_else(not_found)?;
        Ok(team_node.members.nodes.into_iter().map(|m| m.login).collect())
    }
}
