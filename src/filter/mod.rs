use crate::error::FilterError;
use regex::Regex;
use tracing::debug;

/// Compiled repository-name pattern, shared read-only by every subject task.
#[derive(Debug, Clone)]
pub struct RepositoryFilter {
    regex: Regex,
}

impl RepositoryFilter {
    pub fn new(pattern: &str) -> Result<Self, FilterError> {
        let regex = Regex::new(pattern).map_err(|source| FilterError {
            pattern: pattern.to_string(),
            source,
        })?;

        debug!("Compiled repository filter {:?}", pattern);
        Ok(Self { regex })
    }

    /// Unanchored search against an `owner/name` string.
    pub fn matches(&self, repository: &str) -> bool {
        self.regex.is_match(repository)
    }

    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_follows_regex_search_semantics() {
        let filter = RepositoryFilter::new("^org/").unwrap();
        assert!(filter.matches("org/api"));
        assert!(!filter.matches("other/org/api"));
        assert!(!filter.matches("other/api"));

        let unanchored = RepositoryFilter::new("api").unwrap();
        assert!(unanchored.matches("org/api-gateway"));
        assert!(unanchored.matches("someone/graphapi"));
    }

    #[test]
    fn match_all_pattern_accepts_everything() {
        let filter = RepositoryFilter::new(".*").unwrap();
        assert!(filter.matches("rust-lang/rust"));
        assert!(filter.matches(""));
    }

    #[test]
    fn invalid_pattern_fails_at_construction() {
        let err = RepositoryFilter::new("org/(unclosed").unwrap_err();
        assert_eq!(err.pattern, "org/(unclosed");
        assert!(err.to_string().contains("invalid repository filter"));
    }

    #[test]
    fn filter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<RepositoryFilter>();
    }
}
