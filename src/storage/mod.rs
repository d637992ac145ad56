//! CSV and JSON sinks for title tables and rankings
//!
//! All tables are derived, recomputable data; the sinks exist so runs can be
//! resumed and inspected, not as a database. CSV files carry a UTF-8 BOM so
//! spreadsheet tools on Windows open the Japanese text correctly, matching
//! the upstream catalog-dump convention.

use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::analytics::RankingEntry;
use crate::error::StorageError;
use crate::models::{ExtractedRecord, TitleRecord};

/// Standard sink filenames under the output directory
pub const TITLES_RAW_FILE: &str = "titles_raw.csv";
pub const TITLES_EXTRACTED_FILE: &str = "titles_extracted.csv";
pub const A_RANKING_FILE: &str = "a_ranking.csv";
pub const B_RANKING_FILE: &str = "b_ranking.csv";
pub const B_RANKING_JSON_FILE: &str = "b_ranking.json";
pub const GRAPH_DOT_FILE: &str = "graph.dot";
pub const CYCLES_JSON_FILE: &str = "cycles.json";
pub const PATHS_JSON_FILE: &str = "paths.json";
pub const REPORT_FILE: &str = "report.md";

/// Byte-order mark written at the head of every CSV sink
const UTF8_BOM: &str = "\u{FEFF}";

const TITLES_HEADER: [&str; 3] = ["source", "title_raw", "id_or_url"];
const EXTRACTED_HEADER: [&str; 6] = [
    "source",
    "title_raw",
    "id_or_url",
    "a_raw",
    "b_raw",
    "c_value",
];

/// Write a harvested title table
///
/// # Errors
///
/// Returns `StorageError::Io` when the file cannot be written.
pub fn write_titles_csv(path: &Path, records: &[TitleRecord]) -> Result<(), StorageError> {
    let mut rows = vec![format_row(&TITLES_HEADER)];
    for record in records {
        rows.push(format_row(&[
            &record.source,
            &record.title_raw,
            record.id_or_url.as_deref().unwrap_or(""),
        ]));
    }
    write_file(path, &rows.concat())
}

/// Read a harvested title table
///
/// # Errors
///
/// Returns `StorageError::MalformedCsv` on structural problems.
pub fn read_titles_csv(path: &Path) -> Result<Vec<TitleRecord>, StorageError> {
    let rows = read_rows(path, &TITLES_HEADER)?;
    Ok(rows
        .into_iter()
        .map(|row| TitleRecord {
            source: row[0].clone(),
            title_raw: row[1].clone(),
            id_or_url: non_empty(&row[2]),
        })
        .collect())
}

/// Write an extraction table
///
/// # Errors
///
/// Returns `StorageError::Io` when the file cannot be written.
pub fn write_extracted_csv(path: &Path, records: &[ExtractedRecord]) -> Result<(), StorageError> {
    let mut rows = vec![format_row(&EXTRACTED_HEADER)];
    for record in records {
        rows.push(format_row(&[
            &record.source,
            &record.title_raw,
            record.id_or_url.as_deref().unwrap_or(""),
            &record.a_raw,
            &record.b_raw,
            &record.c_value.to_string(),
        ]));
    }
    write_file(path, &rows.concat())
}

/// Read an extraction table
///
/// # Errors
///
/// Returns `StorageError::MalformedCsv` on structural problems or
/// unparseable weights.
pub fn read_extracted_csv(path: &Path) -> Result<Vec<ExtractedRecord>, StorageError> {
    let rows = read_rows(path, &EXTRACTED_HEADER)?;
    rows.into_iter()
        .enumerate()
        .map(|(i, row)| {
            let c_value = row[5]
                .parse::<f64>()
                .map_err(|_| StorageError::MalformedCsv {
                    line: i + 2,
                    message: format!("invalid c_value: {}", row[5]),
                })?;
            Ok(ExtractedRecord {
                source: row[0].clone(),
                title_raw: row[1].clone(),
                id_or_url: non_empty(&row[2]),
                a_raw: row[3].clone(),
                b_raw: row[4].clone(),
                c_value,
            })
        })
        .collect()
}

/// Write a ranking table, with the grouping column named by `key_column`
///
/// # Errors
///
/// Returns `StorageError::Io` when the file cannot be written.
pub fn write_ranking_csv(
    path: &Path,
    entries: &[RankingEntry],
    key_column: &str,
) -> Result<(), StorageError> {
    let mut rows = vec![format_row(&[key_column, "c_sum", "n", "examples"])];
    for entry in entries {
        rows.push(format_row(&[
            &entry.key,
            &entry.c_sum.to_string(),
            &entry.n.to_string(),
            &entry.examples,
        ]));
    }
    write_file(path, &rows.concat())
}

/// Write any serializable document as pretty-printed JSON
///
/// # Errors
///
/// Returns `StorageError::Json` on serialization failure, `StorageError::Io`
/// on write failure.
pub fn write_json_pretty<T: Serialize>(path: &Path, value: &T) -> Result<(), StorageError> {
    let json = serde_json::to_string_pretty(value)?;
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, json)?;
    Ok(())
}

/// Write a plain text document (DOT exports, rendered reports)
///
/// # Errors
///
/// Returns `StorageError::Io` on write failure.
pub fn write_text(path: &Path, content: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn write_file(path: &Path, body: &str) -> Result<(), StorageError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, format!("{UTF8_BOM}{body}"))?;
    Ok(())
}

fn read_rows(path: &Path, expected_header: &[&str]) -> Result<Vec<Vec<String>>, StorageError> {
    let content = fs::read_to_string(path)?;
    let content = content.strip_prefix(UTF8_BOM).unwrap_or(&content);

    let mut rows = parse_csv(content)?;
    if rows.is_empty() {
        return Ok(Vec::new());
    }

    let header = rows.remove(0);
    if header != expected_header {
        return Err(StorageError::MalformedCsv {
            line: 1,
            message: format!("unexpected header: {}", header.join(",")),
        });
    }

    for (i, row) in rows.iter().enumerate() {
        if row.len() != expected_header.len() {
            return Err(StorageError::MalformedCsv {
                line: i + 2,
                message: format!(
                    "expected {} columns, found {}",
                    expected_header.len(),
                    row.len()
                ),
            });
        }
    }

    Ok(rows)
}

fn non_empty(value: &str) -> Option<String> {
    if value.is_empty() {
        None
    } else {
        Some(value.to_string())
    }
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape_field(field: &str) -> String {
    if field.contains(['"', ',', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn format_row(fields: &[&str]) -> String {
    let mut row = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    row.push('\n');
    row
}

/// Minimal RFC 4180 reader: quoted fields, doubled-quote escapes, CRLF
fn parse_csv(content: &str) -> Result<Vec<Vec<String>>, StorageError> {
    let mut rows = Vec::new();
    let mut row = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1;

    let mut chars = content.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' => {
                    if chars.peek() == Some(&'"') {
                        chars.next();
                        field.push('"');
                    } else {
                        in_quotes = false;
                    }
                }
                '\n' => {
                    field.push(c);
                    line += 1;
                }
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' if field.is_empty() => in_quotes = true,
            ',' => {
                row.push(std::mem::take(&mut field));
            }
            '\r' => {
                // consumed as part of CRLF; bare CR is treated the same
            }
            '\n' => {
                line += 1;
                row.push(std::mem::take(&mut field));
                rows.push(std::mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    if in_quotes {
        return Err(StorageError::MalformedCsv {
            line,
            message: "unterminated quoted field".to_string(),
        });
    }

    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        rows.push(row);
    }

    Ok(rows)
}
