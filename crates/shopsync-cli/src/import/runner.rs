//! Sequential batch runner.
//!
//! Rows are processed strictly in input order, one at a time. A transport
//! failure on one row is reported and the batch moves on; only the pause that
//! follows changes (the longer error cooldown instead of the normal row delay).

use std::fmt::Write as _;
use std::time::Duration;

use shopsync_admin::{reconcile, AdminClient, AdminError, RowOutcome, RowStatus};
use shopsync_core::{map_row, RawRow};

/// Pauses applied between rows to stay under the Admin API rate limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Pacing {
    pub row_delay: Duration,
    pub error_cooldown: Duration,
}

impl Pacing {
    /// Pause that follows a row whose workflow ended with `result`.
    pub(crate) fn delay_after(&self, result: &Result<RowOutcome, AdminError>) -> Duration {
        match result {
            Ok(_) => self.row_delay,
            Err(_) => self.error_cooldown,
        }
    }
}

/// Per-row record kept for the final summary.
#[derive(Debug)]
pub(crate) struct RowReport {
    /// 1-based position among the data rows.
    pub row: usize,
    pub title: Option<String>,
    pub outcome: RowOutcome,
    /// Pause taken after this row.
    pub delay: Duration,
}

#[derive(Debug, Default)]
pub(crate) struct ImportSummary {
    pub reports: Vec<RowReport>,
}

impl ImportSummary {
    fn count(&self, status: RowStatus) -> usize {
        self.reports
            .iter()
            .filter(|r| r.outcome.status == status)
            .count()
    }

    pub(crate) fn total(&self) -> usize {
        self.reports.len()
    }

    pub(crate) fn created(&self) -> usize {
        self.count(RowStatus::Created)
    }

    pub(crate) fn updated(&self) -> usize {
        self.count(RowStatus::Updated)
    }

    pub(crate) fn skipped(&self) -> usize {
        self.count(RowStatus::Skipped)
    }

    pub(crate) fn errored(&self) -> usize {
        self.count(RowStatus::Errored)
    }

    /// Rows written to the store where at least one step reported errors.
    pub(crate) fn partial(&self) -> usize {
        self.reports.iter().filter(|r| r.outcome.is_partial()).count()
    }
}

/// Runs the reconciliation workflow over every row.
///
/// Never fails: unmappable rows are skipped with a warning, and rows aborted
/// by a transport failure are recorded as errored.
pub(crate) async fn run_import(
    client: &AdminClient,
    rows: &[RawRow],
    pacing: &Pacing,
) -> ImportSummary {
    let total = rows.len();
    let mut summary = ImportSummary::default();

    for (idx, raw) in rows.iter().enumerate() {
        let row = idx + 1;

        let Some(record) = map_row(raw) else {
            tracing::warn!(row, "skipping row without a title");
            println!("[{row}/{total}] skipped: no title");
            summary.reports.push(RowReport {
                row,
                title: None,
                outcome: RowOutcome::skipped(),
                delay: Duration::ZERO,
            });
            continue;
        };

        let result = reconcile(client, &record).await;
        let delay = pacing.delay_after(&result);

        let outcome = result.unwrap_or_else(|e| {
            tracing::error!(
                row,
                title = %record.title,
                error = %e,
                "row aborted by transport failure"
            );
            RowOutcome::aborted(&e)
        });

        println!("[{row}/{total}] {}", progress_line(&record.title, &outcome));
        summary.reports.push(RowReport {
            row,
            title: Some(record.title),
            outcome,
            delay,
        });

        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    println!(
        "import complete: {} rows, {} created, {} updated, {} skipped, {} errored ({} with partial failures)",
        summary.total(),
        summary.created(),
        summary.updated(),
        summary.skipped(),
        summary.errored(),
        summary.partial(),
    );

    summary
}

fn progress_line(title: &str, outcome: &RowOutcome) -> String {
    let mut line = format!("{} \"{title}\"", outcome.status);
    match (&outcome.product_id, &outcome.handle) {
        (Some(id), Some(handle)) => {
            let _ = write!(line, " ({id}, handle {handle})");
        }
        (Some(id), None) => {
            let _ = write!(line, " ({id})");
        }
        _ => {}
    }
    if !outcome.problems.is_empty() {
        let _ = write!(line, ": {}", outcome.problems.join("; "));
    }
    line
}

#[cfg(test)]
#[path = "runner_test.rs"]
mod tests;
