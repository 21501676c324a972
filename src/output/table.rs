use super::Presenter;
use crate::aggregate::{RepoStats, SubjectResult};
use colored::*;
use std::fmt::Write;

const HEADERS: [&str; 4] = ["Repository", "Commits", "PRs", "Reviews"];

pub struct TablePresenter {
    color: bool,
}

impl TablePresenter {
    pub fn new(color: bool) -> Self {
        Self { color }
    }

    fn heading(&self, text: String) -> String {
        if self.color {
            text.bright_cyan().bold().to_string()
        } else {
            text
        }
    }

    fn strong(&self, text: String) -> String {
        if self.color {
            text.bright_white().bold().to_string()
        } else {
            text
        }
    }

    fn row(name: &str, stats: &RepoStats, name_width: usize) -> String {
        format!(
            "{:<name_width$}  {:>7}  {:>7}  {:>7}",
            name,
            stats.commits,
            stats.pull_requests,
            stats.pull_request_reviews,
        )
    }
}

impl Presenter for TablePresenter {
    fn render(&self, result: &SubjectResult, window: &str) -> String {
        let mut out = String::new();

        let title = if result.display_name.is_empty() {
            result.login.clone()
        } else {
            format!("{} ({})", result.display_name, result.login)
        };
        let _ = writeln!(out, "{}", self.heading(title));
        let _ = writeln!(out, "Window: {}", window);

        if result.repositories.is_empty() {
            let _ = writeln!(out, "No matching contributions");
            return out;
        }

        let mut rows: Vec<_> = result.repositories.iter().collect();
        rows.sort_by(|a, b| a.0.cmp(b.0));

        let name_width = rows
            .iter()
            .map(|(name, _)| name.chars().count())
            .chain([HEADERS[0].len(), "Total".len()])
            .max()
            .unwrap_or_default();

        let header = format!(
            "{:<name_width$}  {:>7}  {:>7}  {:>7}",
            HEADERS[0], HEADERS[1], HEADERS[2], HEADERS[3]
        );
        let rule = "-".repeat(header.chars().count());
        let _ = writeln!(out, "{}", self.strong(header));
        let _ = writeln!(out, "{}", rule);

        for (name, stats) in rows {
            let _ = writeln!(out, "{}", Self::row(name, stats, name_width));
        }

        let _ = writeln!(out, "{}", rule);
        let totals = Self::row("Total", &result.totals(), name_width);
        let _ = writeln!(out, "{}", self.strong(totals));
        out
    }
}
