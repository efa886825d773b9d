//! The `import` command: read the sheet, then either preview the mapped
//! records or push them to the store row by row.

mod runner;

use std::path::Path;

use anyhow::Context;

use shopsync_admin::{AdminClient, RowStatus};
use shopsync_core::{map_row, AppConfig, RawRow};

pub(crate) use runner::{run_import, ImportSummary, Pacing};

/// Imports the spreadsheet at `path`.
///
/// When `dry_run` is `true` every row is mapped and printed, and no remote
/// call is made.
///
/// # Errors
///
/// Returns an error if the file cannot be read or the Admin API client cannot
/// be built. Per-row failures are reported and counted, never propagated.
pub(crate) async fn run_import_command(
    config: &AppConfig,
    path: &Path,
    dry_run: bool,
    limit: Option<usize>,
) -> anyhow::Result<()> {
    if !path.is_file() {
        anyhow::bail!("input file {} does not exist", path.display());
    }

    let mut rows = crate::sheet::read_first_sheet(path)?;
    if let Some(limit) = limit {
        rows.truncate(limit);
    }
    tracing::info!(file = %path.display(), rows = rows.len(), "loaded spreadsheet");

    if rows.is_empty() {
        println!("no data rows found in {}; nothing to import", path.display());
        return Ok(());
    }

    let pacing = Pacing {
        row_delay: config.row_delay(),
        error_cooldown: config.error_cooldown(),
    };
    let connect = || -> anyhow::Result<AdminClient> {
        let client =
            AdminClient::from_config(config).context("failed to build Admin API client")?;
        tracing::info!(endpoint = %client.endpoint(), "importing into store");
        Ok(client)
    };
    let Some(summary) = import_rows(&rows, dry_run, &pacing, connect).await? else {
        return Ok(());
    };

    if summary.errored() > 0 {
        tracing::warn!(
            errored = summary.errored(),
            total = summary.total(),
            "some rows failed to import"
        );
        for report in summary
            .reports
            .iter()
            .filter(|r| r.outcome.status == RowStatus::Errored)
        {
            println!(
                "failed row {}: {}",
                report.row,
                report.title.as_deref().unwrap_or("<untitled>")
            );
        }
    }
    Ok(())
}

/// Previews `rows` when `dry_run` is set, otherwise imports them.
///
/// `connect` is only invoked for a real import, so a dry run never builds a
/// client or touches the network. Returns `None` for a dry run.
pub(crate) async fn import_rows(
    rows: &[RawRow],
    dry_run: bool,
    pacing: &Pacing,
    connect: impl FnOnce() -> anyhow::Result<AdminClient>,
) -> anyhow::Result<Option<ImportSummary>> {
    if dry_run {
        preview(rows)?;
        return Ok(None);
    }

    let client = connect()?;
    Ok(Some(run_import(&client, rows, pacing).await))
}

/// Prints the mapped form of every row. Returns how many rows mapped.
fn preview(rows: &[RawRow]) -> anyhow::Result<usize> {
    let total = rows.len();
    let mut mapped = 0usize;
    for (idx, raw) in rows.iter().enumerate() {
        let row = idx + 1;
        match map_row(raw) {
            Some(record) => {
                mapped += 1;
                let json = serde_json::to_string(&record)
                    .with_context(|| format!("failed to render row {row}"))?;
                println!("[{row}/{total}] {json}");
            }
            None => println!("[{row}/{total}] skipped: no title"),
        }
    }
    println!("dry-run: {mapped} of {total} rows would be imported");
    Ok(mapped)
}

#[cfg(test)]
#[path = "import_test.rs"]
mod tests;
