use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use tracing::debug;

/// Environment variables with this prefix override file and default values,
/// e.g. `CONTRIBSTAT_API__ENDPOINT`.
pub const ENV_PREFIX: &str = "CONTRIBSTAT";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub query: QueryConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub endpoint: String,
    pub timeout_secs: u64,
    pub user_agent: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    pub max_repos: u32,
    pub filter: String,
    /// Overall limit for the whole fan-out; unset means no limit.
    pub deadline_secs: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub default_format: String,
    pub color_output: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api: ApiConfig {
                endpoint: "https://api.github.com/graphql".to_string(),
                timeout_secs: 30,
                user_agent: format!("contribstat/{}", env!("CARGO_PKG_VERSION")),
            },
            query: QueryConfig {
                max_repos: 20,
                filter: ".*".to_string(),
                deadline_secs: None,
            },
            output: OutputConfig {
                default_format: "table".to_string(),
                color_output: true,
            },
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl QueryConfig {
    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

impl Config {
    /// Layers defaults, then the optional file, then `CONTRIBSTAT_*` variables.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let defaults = config::Config::try_from(&Self::default())
            .context("Failed to serialise default configuration")?;

        let mut builder = config::Config::builder().add_source(defaults);
        if let Some(path) = path {
            debug!("Loading configuration from {}", path.display());
            builder = builder.add_source(config::File::from(path).required(true));
        }
        builder = builder.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("_")
                .separator("__"),
        );

        builder
            .build()
            .and_then(|c| c.try_deserialize())
            .context("Failed to load configuration")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_usable() {
        let config = Config::default();
        assert_eq!(config.api.endpoint, "https://api.github.com/graphql");
        assert_eq!(config.query.max_repos, 20);
        assert_eq!(config.query.deadline(), None);
        assert_eq!(config.api.timeout(), Duration::from_secs(30));
    }

    #[test]
    fn file_values_override_defaults() {
        let path = std::env::temp_dir().join(format!(
            "contribstat-config-{}.toml",
            std::process::id()
        ));
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "[query]\nmax_repos = 50\ndeadline_secs = 90\n").unwrap();
        writeln!(file, "[output]\ndefault_format = \"json\"").unwrap();
        drop(file);

        let config = Config::load(Some(&path)).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(config.query.max_repos, 50);
        assert_eq!(config.query.deadline(), Some(Duration::from_secs(90)));
        assert_eq!(config.output.default_format, "json");
        assert_eq!(config.query.filter, ".*");
        assert!(config.output.color_output);
    }

    #[test]
    fn missing_file_is_an_error() {
        let path = Path::new("/nonexistent/contribstat.toml");
        assert!(Config::load(Some(path)).is_err());
    }
}
