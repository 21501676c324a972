use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{ArgGroup, Parser};
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

use contribstat::aggregate::FanoutCoordinator;
use contribstat::config::Config;
use contribstat::filter::RepositoryFilter;
use contribstat::github::{self, GitHubClient};
use contribstat::output::{OutputFormat, Reporter};
use contribstat::window::TimeRange;

/// GitHub's upper bound for `maxRepositories`.
const MAX_REPOS_LIMIT: u32 = 100;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
#[command(group(ArgGroup::new("subjects").required(true).args(["users", "team"])))]
struct Cli {
    /// Comma-separated GitHub logins to summarise
    #[arg(short, long, value_delimiter = ',')]
    users: Vec<String>,

    /// Summarise every member of a team, given as org/team-slug
    #[arg(short, long)]
    team: Option<String>,

    /// Regular expression matched against owner/name of each repository
    #[arg(short, long)]
    filter: Option<String>,

    /// Window start (RFC 3339); defaults to one year before --to
    #[arg(long)]
    from: Option<String>,

    /// Window end (RFC 3339); defaults to now
    #[arg(long)]
    to: Option<String>,

    /// Maximum repositories returned per contribution kind (1-100)
    #[arg(short, long)]
    max_repos: Option<u32>,

    /// Output format (table, json)
    #[arg(short, long)]
    output: Option<String>,

    /// Configuration file (toml, yaml, json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Abort the whole run after this many seconds
    #[arg(long)]
    deadline: Option<u64>,

    /// Disable coloured output
    #[arg(long)]
    no_color: bool,

    /// GitHub token used for the GraphQL API
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    token: String,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn parse_team(team: &str) -> Result<(&str, &str)> {
    match team.split_once('/') {
        Some((org, slug)) if !org.is_empty() && !slug.is_empty() => Ok((org, slug)),
        _ => bail!("--team must look like org/team-slug, got {:?}", team),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::load(cli.config.as_deref())?;

    // Everything that can be validated locally is, before the first request.
    let pattern = cli.filter.as_deref().unwrap_or(&config.query.filter);
    let filter = Arc::new(RepositoryFilter::new(pattern)?);
    let window = TimeRange::resolve(cli.from.as_deref(), cli.to.as_deref(), Utc::now())?;
    let max_repos = cli.max_repos.unwrap_or(config.query.max_repos);
    if !(1..=MAX_REPOS_LIMIT).contains(&max_repos) {
        bail!("--max-repos must be between 1 and {}, got {}", MAX_REPOS_LIMIT, max_repos);
    }
    let team = cli.team.as_deref().map(parse_team).transpose()?;

    let format = cli.output.as_deref().unwrap_or(&config.output.default_format);
    let color = config.output.color_output && !cli.no_color;
    let reporter = Reporter::new(format, color);
    let deadline = cli
        .deadline
        .map(std::time::Duration::from_secs)
        .or_else(|| config.query.deadline());

    let client = Arc::new(
        GitHubClient::new(&config.api, cli.token.as_str()).context("Failed to build GitHub client")?,
    );

    let subjects = match team {
        Some((org, slug)) => github::team_subjects(client.as_ref(), org, slug)
            .await
            .with_context(|| format!("Failed to list members of {}/{}", org, slug))?,
        None => cli.users.clone(),
    };

    if reporter.format() == OutputFormat::Table {
        eprintln!(
            "{} {} subjects, repositories matching {}",
            "contribstat".bright_cyan().bold(),
            subjects.len(),
            filter.pattern().bright_white()
        );
    }

    let progress = if reporter.format() == OutputFormat::Table {
        let pb = ProgressBar::new(subjects.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:30.cyan/blue}] {pos}/{len} subjects",
            )?
            .progress_chars("=>-"),
        );
        pb
    } else {
        ProgressBar::hidden()
    };

    let coordinator = FanoutCoordinator::new(client, filter)
        .with_deadline(deadline)
        .with_progress(progress.clone());

    let results = tokio::select! {
        results = coordinator.run(&subjects, window, max_repos) => results,
        _ = tokio::signal::ctrl_c() => {
            progress.abandon();
            bail!("Interrupted");
        }
    };
    progress.finish_and_clear();
    let results = results.context("Failed to collect contributions")?;

    info!("Collected contributions for {} subjects", results.len());
    reporter.write_report(&mut std::io::stdout().lock(), &results, &window.describe())?;

    Ok(())
}
