//! Per-repository GitHub contribution summaries.
//!
//! One GraphQL query per subject, fanned out concurrently; commit, pull
//! request and review contributions are merged per repository and filtered by
//! a repository-name pattern.

pub mod aggregate;
pub mod config;
pub mod error;
pub mod filter;
pub mod github;
pub mod output;
pub mod window;
