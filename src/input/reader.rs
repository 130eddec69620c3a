use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::input::InputError;
use crate::input::schema::REQUIRED_COLUMNS;

/// One CSV file as read from disk, header row included.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn Read>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(MultiGzDecoder::new(reader)))
    } else {
        Ok(Box::new(reader))
    }
}

pub fn read_csv_table(path: &Path) -> Result<CsvTable, InputError> {
    let reader = open_maybe_gz(path)?;
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let header_record = csv_reader.headers().map_err(|source| InputError::Csv {
        path: path.to_path_buf(),
        source,
    })?;
    let raw: Vec<String> = header_record
        .iter()
        .enumerate()
        .map(|(idx, name)| {
            if idx == 0 {
                name.trim_start_matches('\u{feff}').to_string()
            } else {
                name.to_string()
            }
        })
        .collect();
    if raw.is_empty() || raw.iter().all(|h| h.trim().is_empty()) {
        return Err(InputError::EmptyCsv {
            path: path.to_path_buf(),
        });
    }
    let headers = unique_headers(path, &raw)?;

    let mut rows = Vec::new();
    for record in csv_reader.records() {
        let record = record.map_err(|source| InputError::Csv {
            path: path.to_path_buf(),
            source,
        })?;
        if record.len() > headers.len() {
            let line = record.position().map(|p| p.line()).unwrap_or(0);
            return Err(InputError::RaggedRow {
                path: path.to_path_buf(),
                line,
                found: record.len(),
                expected: headers.len(),
            });
        }
        let mut row: Vec<String> = record.iter().map(str::to_string).collect();
        // short rows are padded like blank trailing cells
        row.resize(headers.len(), String::new());
        rows.push(row);
    }

    Ok(CsvTable {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Renames blank and repeated headers the way spreadsheet exports are usually
/// read back: a blank name becomes `Unnamed: {idx}`, a repeat becomes
/// `{name}.{n}`. A repeated required column is ambiguous and rejected.
pub fn unique_headers(path: &Path, raw: &[String]) -> Result<Vec<String>, InputError> {
    let mut headers: Vec<String> = Vec::with_capacity(raw.len());
    for (idx, name) in raw.iter().enumerate() {
        if name.trim().is_empty() {
            headers.push(format!("Unnamed: {idx}"));
            continue;
        }
        if !headers.contains(name) {
            headers.push(name.clone());
            continue;
        }
        if REQUIRED_COLUMNS.contains(&name.as_str()) {
            return Err(InputError::DuplicateColumn {
                column: name.clone(),
                path: path.to_path_buf(),
            });
        }
        let mut n = 1;
        let renamed = loop {
            let candidate = format!("{name}.{n}");
            if !headers.contains(&candidate) && !raw.contains(&candidate) {
                break candidate;
            }
            n += 1;
        };
        headers.push(renamed);
    }
    Ok(headers)
}
