use super::query::{GraphQlResponse, TeamData, UserData, CONTRIBUTIONS_QUERY, TEAM_MEMBERS_QUERY};
use super::{ContributionSnapshot, ContributionSource, TeamDirectory};
use crate::config::ApiConfig;
use crate::error::QueryError;
use crate::window::TimeRange;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};
use tracing::debug;

/// GitHub GraphQL client. The token is handed in at construction and only
/// lives here.
pub struct GitHubClient {
    endpoint: String,
    token: String,
    http: Client,
}

impl GitHubClient {
    pub fn new(api: &ApiConfig, token: impl Into<String>) -> Result<Self, QueryError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(QueryError::InvalidInput {
                field: "token".to_string(),
                reason: "must not be empty".to_string(),
            });
        }
        if api.endpoint.trim().is_empty() {
            return Err(QueryError::InvalidInput {
                field: "api.endpoint".to_string(),
                reason: "must not be empty".to_string(),
            });
        }

        let http = Client::builder()
            .timeout(api.timeout())
            .user_agent(api.user_agent.as_str())
            .build()?;

        Ok(Self {
            endpoint: api.endpoint.clone(),
            token,
            http,
        })
    }

    async fn execute<T: DeserializeOwned>(&self, query: &str, variables: Value) -> Result<T, QueryError> {
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.token)
            .json(&json!({ "query": query, "variables": variables }))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(QueryError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: GraphQlResponse<T> = response
            .json()
            .await
            .map_err(|e| QueryError::Malformed(e.to_string()))?;
        envelope.into_result()
    }
}

#[async_trait]
impl ContributionSource for GitHubClient {
    async fn fetch(
        &self,
        login: &str,
        window: &TimeRange,
        max_per_kind: u32,
    ) -> Result<ContributionSnapshot, QueryError> {
        debug!("Querying contributions for {}", login);
        let variables = json!({
            "user": login,
            "maxRepos": max_per_kind,
            "fromTime": window.from_wire(),
            "toTime": window.to_wire(),
        });

        let data: UserData = self.execute(CONTRIBUTIONS_QUERY, variables).await?;
        data.into_snapshot(login)
    }
}

#[async_trait]
impl TeamDirectory for GitHubClient {
    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<String>, QueryError> {
        debug!("Listing members of {}/{}", org, team_slug);
        let variables = json!({ "org": org, "team": team_slug });

        let data: TeamData = self.execute(TEAM_MEMBERS_QUERY, variables).await?;
        data.into_logins(org, team_slug)
    }
}
