use crate::filter::RepositoryFilter;
use crate::github::{ContributionRecord, ContributionSnapshot};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub mod fanout;

pub use fanout::FanoutCoordinator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContributionKind {
    Commits,
    PullRequests,
    PullRequestReviews,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepoStats {
    pub commits: u64,
    pub pull_requests: u64,
    pub pull_request_reviews: u64,
}

impl RepoStats {
    fn add(&mut self, kind: ContributionKind, count: u64) {
        match kind {
            ContributionKind::Commits => self.commits += count,
            ContributionKind::PullRequests => self.pull_requests += count,
            ContributionKind::PullRequestReviews => self.pull_request_reviews += count,
        }
    }

    pub fn total(&self) -> u64 {
        self.commits + self.pull_requests + self.pull_request_reviews
    }
}

/// Keyed by `owner/name`; iteration order is unspecified.
pub type RepoStatsMap = HashMap<String, RepoStats>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectResult {
    pub login: String,
    pub display_name: String,
    pub repositories: RepoStatsMap,
}

impl SubjectResult {
    pub fn from_snapshot(snapshot: &ContributionSnapshot, filter: &RepositoryFilter) -> Self {
        Self {
            login: snapshot.login.clone(),
            display_name: snapshot.display_name.clone(),
            repositories: aggregate(snapshot, filter),
        }
    }

    /// Column sums over every repository.
    pub fn totals(&self) -> RepoStats {
        self.repositories
            .values()
            .fold(RepoStats::default(), |mut acc, stats| {
                acc.commits += stats.commits;
                acc.pull_requests += stats.pull_requests;
                acc.pull_request_reviews += stats.pull_request_reviews;
                acc
            })
    }
}

/// Folds the three contribution lists of one snapshot into per-repository stats.
///
/// Lists are visited commits, pull requests, reviews. Every kind uses the same
/// look-up-or-insert policy, so a repository repeated within a list
/// accumulates instead of replacing the earlier entry. Records whose
/// repository does not match `filter` are dropped.
pub fn aggregate(snapshot: &ContributionSnapshot, filter: &RepositoryFilter) -> RepoStatsMap {
    let kinds: [(ContributionKind, &[ContributionRecord]); 3] = [
        (ContributionKind::Commits, &snapshot.commits),
        (ContributionKind::PullRequests, &snapshot.pull_requests),
        (ContributionKind::PullRequestReviews, &snapshot.pull_request_reviews),
    ];

    let mut repositories = RepoStatsMap::new();
    for (kind, records) in kinds {
        for record in records.iter().filter(|r| filter.matches(&r.repository)) {
            repositories
                .entry(record.repository.clone())
                .or_default()
                .add(kind, record.count);
        }
    }
    repositories
}
