use super::*;
use anyhow::Result;
use serde::Serialize;
use std::io::Write;
use tracing::info;

pub struct Reporter {
    format: OutputFormat,
    color: bool,
}

#[derive(Serialize)]
struct JsonReport<'a> {
    window: &'a str,
    subjects: &'a [SubjectResult],
}

impl Reporter {
    pub fn new(format: &str, color: bool) -> Self {
        Self {
            format: OutputFormat::from(format),
            color,
        }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders every subject, in order, into one document.
    pub fn render(&self, results: &[SubjectResult], window: &str) -> Result<String> {
        match self.format {
            OutputFormat::Table => {
                let presenter = TablePresenter::new(self.color);
                let tables: Vec<_> = results
                    .iter()
                    .map(|result| presenter.render(result, window))
                    .collect();
                Ok(tables.join("\n"))
            }
            OutputFormat::Json => {
                let report = JsonReport {
                    window,
                    subjects: results,
                };
                Ok(serde_json::to_string_pretty(&report)? + "\n")
            }
        }
    }

    pub fn write_report<W: Write>(
        &self,
        out: &mut W,
        results: &[SubjectResult],
        window: &str,
    ) -> Result<()> {
        let content = self.render(results, window)?;
        out.write_all(content.as_bytes())?;
        out.flush()?;
        info!("Rendered {} subjects as {:?}", results.len(), self.format);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::{RepoStats, RepoStatsMap};

    fn subject(login: &str, repo: &str) -> SubjectResult {
        let mut repositories = RepoStatsMap::new();
        repositories.insert(
            repo.to_string(),
            RepoStats {
                commits: 2,
                pull_requests: 1,
                pull_request_reviews: 0,
            },
        );
        SubjectResult {
            login: login.to_string(),
            display_name: String::new(),
            repositories,
        }
    }

    #[test]
    fn tables_follow_subject_order() {
        let reporter = Reporter::new("table", false);
        let results = vec![subject("zoe", "org/a"), subject("alice", "org/b")];

        let text = reporter.render(&results, "w").unwrap();

        let zoe = text.find("zoe").unwrap();
        let alice = text.find("alice").unwrap();
        assert!(zoe < alice);
    }

    #[test]
    fn json_report_is_parseable() {
        let reporter = Reporter::new("json", true);
        let results = vec![subject("zoe", "org/a")];

        let mut buf = Vec::new();
        reporter.write_report(&mut buf, &results, "w").unwrap();

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["window"], "w");
        assert_eq!(value["subjects"][0]["login"], "zoe");
        assert_eq!(value["subjects"][0]["repositories"]["org/a"]["commits"], 2);
    }

    #[test]
    fn json_output_never_contains_colour_codes() {
        let reporter = Reporter::new("json", true);
        let text = reporter.render(&[subject("zoe", "org/a")], "w").unwrap();
        assert!(!text.contains('\u{1b}'));
    }
}
