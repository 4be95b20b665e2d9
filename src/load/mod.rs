// src/load/mod.rs

pub mod date_parser;
pub mod split;

use std::{
    fs::File,
    io::{self, BufRead, BufReader},
    path::{Path, PathBuf},
};
use thiserror::Error;
use tracing::debug;

use crate::dataset::{Columns, DataSetData, Row};
use date_parser::parse_input_date;
use split::{clean_cell, normalize_header, split_line};

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("input file {} not found", path.display())]
    NotFound { path: PathBuf },

    #[error("reading {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{} has no header row", path.display())]
    Empty { path: PathBuf },

    #[error("line {line}: cannot parse date {value:?} as MM/dd/yyyy")]
    Date { line: usize, value: String },

    #[error("line {line}: expected {expected} fields, found {found}")]
    FieldCount {
        line: usize,
        expected: usize,
        found: usize,
    },
}

/// Load the CSV at `path` into a table carrying the upload-time metadata.
///
/// The first line is the header; every later non-blank line becomes one
/// [`Row`]. Any bad line aborts the whole load.
pub fn load_dataset_file(path: impl AsRef<Path>) -> Result<DataSetData, LoadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| match source.kind() {
        io::ErrorKind::NotFound => LoadError::NotFound {
            path: path.to_path_buf(),
        },
        _ => LoadError::Io {
            path: path.to_path_buf(),
            source,
        },
    })?;

    let table = read_dataset(BufReader::new(file), path)?;
    debug!(path = %path.display(), rows = table.data.len(), "loaded dataset file");
    Ok(table)
}

/// Same as [`load_dataset_file`] over any buffered reader; `path` only
/// labels errors.
pub fn read_dataset<R: BufRead>(reader: R, path: &Path) -> Result<DataSetData, LoadError> {
    let mut headers: Option<Vec<String>> = None;
    let mut data = Vec::new();

    for (idx, line) in reader.lines().enumerate() {
        let line = line.map_err(|source| LoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let line_no = idx + 1;

        let Some(h) = &headers else {
            let line = line.strip_prefix('\u{feff}').unwrap_or(&line);
            headers = Some(split_line(line).into_iter().map(normalize_header).collect());
            continue;
        };
        if line.is_empty() {
            continue;
        }
        data.push(parse_row(h, &line, line_no)?);
    }

    if headers.is_none() {
        return Err(LoadError::Empty {
            path: path.to_path_buf(),
        });
    }

    Ok(DataSetData {
        columns: Columns::upload_schema(),
        data,
    })
}

fn parse_row(headers: &[String], line: &str, line_no: usize) -> Result<Row, LoadError> {
    let cells = split_line(line);
    if cells.len() != headers.len() {
        return Err(LoadError::FieldCount {
            line: line_no,
            expected: headers.len(),
            found: cells.len(),
        });
    }

    headers
        .iter()
        .zip(cells)
        .enumerate()
        .map(|(i, (name, cell))| -> Result<(String, String), LoadError> {
            let value = if i == 0 {
                parse_input_date(cell).ok_or_else(|| LoadError::Date {
                    line: line_no,
                    value: cell.to_string(),
                })?
            } else {
                cell.to_string()
            };
            Ok((name.clone(), clean_cell(&value)))
        })
        .collect()
}
