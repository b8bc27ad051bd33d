// src/process/read.rs

use std::{fs, path::Path};
use tracing::{debug, warn};

use super::{clean, Table, SETTLEMENT_DATE};
use crate::error::{Error, Result};

/// Load a cached report response into a normalized [`Table`].
///
/// - skips `preamble_lines` envelope lines before the header row
/// - strips whitespace from every column name, numbering any name the
///   stripping makes ambiguous (`Quantity`, `Quantity.1`)
/// - pads short rows with nulls
/// - drops rows without a `SettlementDate`
///
/// Fails with a schema error when the header has no `SettlementDate` and
/// with a parse error on any row wider than the header.
#[tracing::instrument(level = "debug", skip(path), fields(path = %path.as_ref().display()))]
pub fn load_report_csv<P: AsRef<Path>>(path: P, preamble_lines: usize) -> Result<Table> {
    let path = path.as_ref();
    let text = fs::read_to_string(path)
        .map_err(|e| Error::io(format!("reading {}", path.display()), e))?;
    let body = skip_lines(&text, preamble_lines);

    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(body.as_bytes());

    let csv_err = |source| Error::Csv {
        path: path.to_path_buf(),
        source,
    };

    let cleaned: Vec<String> = reader
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(clean::normalize_column_name)
        .collect();
    let headers = clean::dedupe_column_names(cleaned.clone());
    if headers != cleaned {
        warn!(?cleaned, ?headers, "duplicate column names after cleaning; renumbered");
    }

    let date_idx = headers
        .iter()
        .position(|h| h == SETTLEMENT_DATE)
        .ok_or_else(|| Error::Schema {
            path: path.to_path_buf(),
            column: SETTLEMENT_DATE,
            found: headers.clone(),
        })?;

    let mut rows = Vec::new();
    let mut dropped = 0usize;
    for result in reader.records() {
        let record = result.map_err(csv_err)?;
        if record.len() > headers.len() {
            let line = record.position().map_or(0, |p| p.line()) + preamble_lines as u64;
            return Err(Error::RowWidth {
                path: path.to_path_buf(),
                line,
                expected: headers.len(),
                found: record.len(),
            });
        }

        let row: Vec<Option<String>> = (0..headers.len())
            .map(|c| clean::cell_value(record.get(c)))
            .collect();

        if clean::is_missing(row[date_idx].as_deref()) {
            dropped += 1;
            continue;
        }
        rows.push(row);
    }

    debug!(kept = rows.len(), dropped, columns = headers.len(), "report loaded");
    Table::from_rows(headers, &rows)
}

/// Everything after the first `n` lines; empty if there are fewer.
fn skip_lines(text: &str, n: usize) -> &str {
    let mut rest = text;
    for _ in 0..n {
        match rest.find('\n') {
            Some(i) => rest = &rest[i + 1..],
            None => return "",
        }
    }
    rest
}
