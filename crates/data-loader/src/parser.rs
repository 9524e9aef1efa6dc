//! Parsers for the dataset files.
//!
//! - movies.dat: movieId::title (row index = order of non-blank lines)
//! - similarity.dat: one matrix row per line, whitespace-separated scores
//!
//! Matrix rows are independent of each other, so they are parsed in
//! parallel with Rayon.

use crate::error::{DataLoadError, Result};
use crate::types::*;
use rayon::prelude::*;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Read a whole file, reporting a missing file with its path
fn read_to_string(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|e| match e.kind() {
        ErrorKind::NotFound => DataLoadError::FileNotFound {
            path: path.display().to_string(),
        },
        _ => DataLoadError::IoError(e),
    })
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Parse the movies.dat file
///
/// Format: movieId::title
///
/// Only the first `::` separates the fields, so titles may contain `::`.
pub fn parse_records(path: &Path) -> Result<Vec<MovieRecord>> {
    let content = read_to_string(path)?;
    parse_records_str(&content, &file_name(path))
}

pub(crate) fn parse_records_str(content: &str, file: &str) -> Result<Vec<MovieRecord>> {
    let mut records = Vec::new();

    for (idx, line) in content.lines().enumerate() {
        let line_no = idx + 1;
        let line_trimmed = line.trim();
        if line_trimmed.is_empty() {
            continue;
        }

        let (movie_id, title) =
            line_trimmed
                .split_once("::")
                .ok_or_else(|| DataLoadError::ParseError {
                    file: file.to_string(),
                    line: line_no,
                    reason: "Missing title".to_string(),
                })?;

        let title = title.trim();
        if title.is_empty() {
            return Err(DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: "Empty title".to_string(),
            });
        }

        let record = MovieRecord {
            id: movie_id.trim().parse().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid movieId: {}", e),
            })?,
            title: title.to_string(),
        };

        records.push(record);
    }

    Ok(records)
}

/// Parse the similarity.dat file into a square matrix
///
/// Fails with `NonSquareMatrix` if the row lengths do not match the row count.
pub fn parse_matrix(path: &Path) -> Result<SimilarityMatrix> {
    let content = read_to_string(path)?;
    parse_matrix_str(&content, &file_name(path))
}

pub(crate) fn parse_matrix_str(content: &str, file: &str) -> Result<SimilarityMatrix> {
    // Keep original line numbers for error messages
    let lines: Vec<(usize, &str)> = content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .collect();

    let rows = lines
        .par_iter()
        .map(|&(line_no, line)| parse_row(line, line_no, file))
        .collect::<Result<Vec<Vec<f32>>>>()?;

    SimilarityMatrix::from_rows(rows)
}

fn parse_row(line: &str, line_no: usize, file: &str) -> Result<Vec<f32>> {
    line.split_whitespace()
        .enumerate()
        .map(|(column, value)| {
            value.parse::<f32>().map_err(|e| DataLoadError::ParseError {
                file: file.to_string(),
                line: line_no,
                reason: format!("Invalid score in column {}: {}", column, e),
            })
        })
        .collect()
}
