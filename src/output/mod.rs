use crate::aggregate::SubjectResult;
use serde::{Deserialize, Serialize};

pub mod reporter;
pub mod table;

pub use reporter::Reporter;
pub use table::TablePresenter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Table,
    Json,
}

impl From<&str> for OutputFormat {
    fn from(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputFormat::Json,
            "table" => OutputFormat::Table,
            _ => OutputFormat::Table,
        }
    }
}

/// Turns one subject's aggregated stats into printable text.
pub trait Presenter {
    fn render(&self, result: &SubjectResult, window: &str) -> String;
}
