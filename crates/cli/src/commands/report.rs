//! Analytics report command.
//!
//! # Usage
//!
//! ```bash
//! shop-cli report monthly-revenue
//! shop-cli report top-customers --format csv
//! shop-cli report all --format json
//! ```

use std::io::Write;
use std::str::FromStr;

use sqlx::PgPool;
use thiserror::Error;

use shoplytics_db::RepositoryError;
use shoplytics_db::reports::{self, ReportKind};

use crate::formatter::{self, OutputFormat};

/// Errors that can occur while running reports.
#[derive(Debug, Error)]
pub enum ReportCommandError {
    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Which reports to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportSelection {
    One(ReportKind),
    All,
}

impl ReportSelection {
    #[must_use]
    pub fn kinds(self) -> Vec<ReportKind> {
        match self {
            Self::One(kind) => vec![kind],
            Self::All => ReportKind::ALL.to_vec(),
        }
    }
}

impl FromStr for ReportSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().eq_ignore_ascii_case("all") {
            Ok(Self::All)
        } else {
            s.parse().map(Self::One)
        }
    }
}

/// Run the selected reports and write them to `out`.
///
/// # Errors
///
/// Returns `ReportCommandError` if a query, serialization or write fails.
pub async fn run<W: Write>(
    pool: &PgPool,
    selection: &ReportSelection,
    format: OutputFormat,
    out: &mut W,
) -> Result<(), ReportCommandError> {
    let mut results = Vec::new();
    for kind in selection.kinds() {
        let data = reports::run(pool, kind).await?;
        tracing::debug!(report = %kind, rows = data.len(), "Report complete");
        results.push(data);
    }

    writeln!(out, "{}", formatter::format_reports(&results, format)?)?;
    Ok(())
}
