use std::path::PathBuf;

use thiserror::Error;

pub mod reader;
pub mod schema;

use reader::{CsvTable, read_csv_table};
use schema::{RequiredColumns, resolve_required};

#[derive(Debug, Error)]
pub enum InputError {
    #[error("no input files given")]
    NoInputs,

    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse CSV {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("CSV file has no header row: {path}")]
    EmptyCsv { path: PathBuf },

    #[error("required column '{column}' appears more than once in {path}")]
    DuplicateColumn { column: String, path: PathBuf },

    #[error("{path}: line {line} has {found} fields, header has {expected}")]
    RaggedRow {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },

    #[error("Missing columns: {}", .missing.join(", "))]
    MissingColumns { missing: Vec<String> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceFile {
    pub path: PathBuf,
    pub n_rows: usize,
}

/// Concatenated input batch. Always carries every required column.
#[derive(Debug, Clone)]
pub struct SpecimenTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub sources: Vec<SourceFile>,
    pub columns: RequiredColumns,
}

impl SpecimenTable {
    /// Concatenates tables in order. The header is the union of all headers in
    /// first-seen order; cells a file does not have are blank.
    pub fn from_sources(tables: Vec<CsvTable>) -> Result<Self, InputError> {
        let mut headers: Vec<String> = Vec::new();
        for table in &tables {
            for name in &table.headers {
                if !headers.contains(name) {
                    headers.push(name.clone());
                }
            }
        }

        let columns = resolve_required(&headers)?;

        let n_rows = tables.iter().map(|t| t.rows.len()).sum();
        let mut rows = Vec::with_capacity(n_rows);
        let mut sources = Vec::with_capacity(tables.len());
        for table in tables {
            let positions: Vec<usize> = table
                .headers
                .iter()
                .map(|name| headers.iter().position(|h| h == name).unwrap_or(0))
                .collect();
            sources.push(SourceFile {
                path: table.path,
                n_rows: table.rows.len(),
            });
            for row in table.rows {
                let mut out = vec![String::new(); headers.len()];
                for (cell, &pos) in row.into_iter().zip(&positions) {
                    out[pos] = cell;
                }
                rows.push(out);
            }
        }

        Ok(Self {
            headers,
            rows,
            sources,
            columns,
        })
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }
}

pub fn load_batch(paths: &[PathBuf]) -> Result<SpecimenTable, InputError> {
    if paths.is_empty() {
        return Err(InputError::NoInputs);
    }
    let mut tables = Vec::with_capacity(paths.len());
    for path in paths {
        let table = read_csv_table(path)?;
        tracing::info!(
            path = %path.display(),
            rows = table.rows.len(),
            columns = table.headers.len(),
            "read input file"
        );
        tables.push(table);
    }
    let table = SpecimenTable::from_sources(tables)?;
    tracing::info!(
        files = table.sources.len(),
        rows = table.n_rows(),
        "combined input batch"
    );
    Ok(table)
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/tests.rs"]
mod tests;
