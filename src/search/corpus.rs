// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Reading the title column out of a spreadsheet or CSV file

use anyhow::{Context, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;
use tracing::{debug, info};

/// Extensions read through calamine
const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

/// Load the non-blank values of `column` from the first sheet (or the CSV
/// body) of `path`, in row order. Values are trimmed.
pub fn load_titles(path: &Path, column: &str) -> Result<Vec<String>> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    let titles = if extension == "csv" {
        load_csv_column(path, column)?
    } else if SPREADSHEET_EXTENSIONS.contains(&extension.as_str()) {
        load_spreadsheet_column(path, column)?
    } else {
        anyhow::bail!(
            "Unsupported corpus file type '{}' (expected csv or one of {:?})",
            path.display(),
            SPREADSHEET_EXTENSIONS
        );
    };

    info!(
        "Loaded {} titles from column '{}' of {}",
        titles.len(),
        column,
        path.display()
    );
    Ok(titles)
}

fn load_csv_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut reader = csv::Reader::from_path(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let headers = reader.headers().context("Failed to read CSV header")?.clone();
    let index = headers
        .iter()
        .position(|h| h.trim_start_matches('\u{feff}').trim() == column)
        .with_context(|| {
            format!(
                "Column '{}' not found in {} (columns: {:?})",
                column,
                path.display(),
                headers.iter().collect::<Vec<_>>()
            )
        })?;

    let mut titles = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("Malformed CSV row {}", row + 2))?;
        if let Some(value) = record.get(index).map(str::trim).filter(|v| !v.is_empty()) {
            titles.push(value.to_string());
        }
    }

    Ok(titles)
}

fn load_spreadsheet_column(path: &Path, column: &str) -> Result<Vec<String>> {
    let mut workbook = open_workbook_auto(path)
        .with_context(|| format!("Failed to open corpus {}", path.display()))?;

    let range = workbook
        .worksheet_range_at(0)
        .with_context(|| format!("{} has no worksheets", path.display()))?
        .with_context(|| format!("Failed to read first worksheet of {}", path.display()))?;

    let mut rows = range.rows();
    let header = rows
        .next()
        .with_context(|| format!("{} is empty", path.display()))?;

    let index = header
        .iter()
        .position(|cell| cell_text(cell).as_deref() == Some(column))
        .with_context(|| {
            format!(
                "Column '{}' not found in {} (columns: {:?})",
                column,
                path.display(),
                header.iter().filter_map(cell_text).collect::<Vec<_>>()
            )
        })?;
    debug!("Title column '{}' is at index {}", column, index);

    Ok(rows
        .filter_map(|row| row.get(index).and_then(cell_text))
        .collect())
}

fn cell_text(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty | Data::Error(_) => None,
        other => Some(other.to_string().trim().to_string()).filter(|s| !s.is_empty()),
    }
}
