//! Spreadsheet loading.
//!
//! Only the first worksheet is read. Its first row is the header; every later
//! row becomes a [`RawRow`] keyed by those header names. Rows with no
//! non-blank cell at all are dropped.

use std::path::Path;

use anyhow::Context;
use calamine::{open_workbook_auto, Data, Reader};

use shopsync_core::RawRow;

/// Reads the data rows of the workbook's first sheet.
///
/// # Errors
///
/// Returns an error if the file cannot be opened as a workbook, has no
/// sheets, or the first sheet cannot be read.
pub(crate) fn read_first_sheet(path: &Path) -> anyhow::Result<Vec<RawRow>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("failed to open workbook {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| anyhow::anyhow!("workbook {} has no sheets", path.display()))?
        .with_context(|| format!("failed to read first sheet of {}", path.display()))?;

    Ok(rows_from_grid(range.rows()))
}

/// Turns a header row plus data rows into [`RawRow`]s.
pub(crate) fn rows_from_grid<'a, I>(mut rows: I) -> Vec<RawRow>
where
    I: Iterator<Item = &'a [Data]>,
{
    let Some(header) = rows.next() else {
        return Vec::new();
    };
    let headers: Vec<String> = header
        .iter()
        .map(|cell| cell_to_string(cell).unwrap_or_default().trim().to_string())
        .collect();

    rows.map(|cells| {
        let mut row = RawRow::new();
        for (name, cell) in headers.iter().zip(cells) {
            if name.is_empty() {
                continue;
            }
            if let Some(value) = cell_to_string(cell) {
                row.insert(name.clone(), &value);
            }
        }
        row
    })
    .filter(|row| !row.is_empty())
    .collect()
}

/// Stringifies a cell. Numbers keep their shortest decimal form, so a price
/// typed as `19.99` stays `"19.99"` and an id typed as `7012345678901` does
/// not pick up a trailing `.0`.
fn cell_to_string(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        Data::String(s) | Data::DateTimeIso(s) | Data::DurationIso(s) => Some(s.clone()),
        Data::Int(i) => Some(i.to_string()),
        Data::Float(f) => Some(f.to_string()),
        Data::Bool(b) => Some(b.to_string()),
        Data::DateTime(dt) => Some(dt.to_string()),
    }
}
