use super::SubjectResult;
use crate::error::FanoutError;
use crate::filter::RepositoryFilter;
use crate::github::ContributionSource;
use crate::window::TimeRange;
use indicatif::ProgressBar;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tracing::{debug, info, warn};

/// Runs one fetch-and-aggregate task per subject.
///
/// Results come back in subject order. The first failure aborts every task
/// still in flight; they are joined before the error is returned, so nothing
/// outlives a call to [`FanoutCoordinator::run`].
pub struct FanoutCoordinator {
    source: Arc<dyn ContributionSource>,
    filter: Arc<RepositoryFilter>,
    deadline: Option<Duration>,
    progress: ProgressBar,
}

impl FanoutCoordinator {
    pub fn new(source: Arc<dyn ContributionSource>, filter: Arc<RepositoryFilter>) -> Self {
        Self {
            source,
            filter,
            deadline: None,
            progress: ProgressBar::hidden(),
        }
    }

    pub fn with_deadline(mut self, deadline: Option<Duration>) -> Self {
        self.deadline = deadline;
        self
    }

    /// Ticked once per completed subject.
    pub fn with_progress(mut self, progress: ProgressBar) -> Self {
        self.progress = progress;
        self
    }

    pub async fn run(
        &self,
        subjects: &[String],
        window: TimeRange,
        max_repos: u32,
    ) -> Result<Vec<SubjectResult>, FanoutError> {
        info!("Querying {} subjects", subjects.len());

        match self.deadline {
            // Dropping the JoinSet on timeout aborts whatever is still running.
            Some(limit) => tokio::time::timeout(limit, self.collect(subjects, window, max_repos))
                .await
                .map_err(|_| {
                    warn!("Fan-out deadline of {:?} exceeded", limit);
                    FanoutError::DeadlineExceeded(limit)
                })?,
            None => self.collect(subjects, window, max_repos).await,
        }
    }

    async fn collect(
        &self,
        subjects: &[String],
        window: TimeRange,
        max_repos: u32,
    ) -> Result<Vec<SubjectResult>, FanoutError> {
        let mut slots: Vec<Option<SubjectResult>> = Vec::with_capacity(subjects.len());
        slots.resize_with(subjects.len(), || None);

        let mut join_set = JoinSet::new();
        for (index, login) in subjects.iter().enumerate() {
            let source = Arc::clone(&self.source);
            let filter = Arc::clone(&self.filter);
            let login = login.clone();

            join_set.spawn(async move {
                let snapshot = source
                    .fetch(&login, &window, max_repos)
                    .await
                    .map_err(|source| FanoutError::Query {
                        login: login.clone(),
                        source,
                    })?;
                let result = SubjectResult::from_snapshot(&snapshot, &filter);
                debug!(
                    "Aggregated {} repositories for {}",
                    result.repositories.len(),
                    login
                );
                Ok::<_, FanoutError>((index, result))
            });
        }

        while let Some(joined) = join_set.join_next().await {
            match joined.map_err(FanoutError::from).and_then(|outcome| outcome) {
                Ok((index, result)) => {
                    self.progress.inc(1);
                    slots[index] = Some(result);
                }
                Err(err) => {
                    warn!("Aborting remaining subjects: {}", err);
                    join_set.abort_all();
                    while join_set.join_next().await.is_some() {}
                    return Err(err);
                }
            }
        }

        // every slot was written once the set drained without error
        Ok(slots.into_iter().flatten().collect())
    }
}
