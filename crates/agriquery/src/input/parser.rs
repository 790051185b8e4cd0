//! Delimited-text parser for dataset payloads and local files.

use std::path::Path;

use super::table::RawTable;
use crate::error::{AgriError, Result};

/// Separators seen in government data exports, in preference order.
const DELIMITERS: [u8; 4] = [b',', b'\t', b';', b'|'];

/// Lines inspected when sniffing the delimiter.
const SNIFF_LINES: usize = 10;

/// Parses CSV-like text into a [`RawTable`].
///
/// The first record is the header row. Short rows are padded with empty
/// cells so every row has one cell per header.
#[derive(Debug, Clone, Copy, Default)]
pub struct Parser {
    delimiter: Option<u8>,
}

impl Parser {
    /// Create a parser that sniffs the delimiter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a fixed delimiter instead of sniffing.
    pub fn with_delimiter(delimiter: u8) -> Self {
        Self {
            delimiter: Some(delimiter),
        }
    }

    /// Read and parse a file.
    pub fn parse_file(&self, path: impl AsRef<Path>) -> Result<RawTable> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|e| AgriError::io(path, e))?;
        self.parse_bytes(&contents)
    }

    /// Parse an in-memory payload.
    pub fn parse_bytes(&self, bytes: &[u8]) -> Result<RawTable> {
        let delimiter = match self.delimiter {
            Some(d) => d,
            None => sniff_delimiter(bytes)?,
        };

        let mut reader = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .flexible(true)
            .from_reader(bytes);

        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_string())
            .collect();
        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(AgriError::EmptyData("no header row".to_string()));
        }

        let width = headers.len();
        let rows = reader
            .records()
            .map(|record| -> Result<Vec<String>> {
                let mut row: Vec<String> = record?.iter().map(str::to_string).collect();
                row.resize(width, String::new());
                Ok(row)
            })
            .collect::<Result<Vec<_>>>()?;

        if rows.is_empty() {
            return Err(AgriError::EmptyData("no data rows".to_string()));
        }
        Ok(RawTable::new(headers, rows))
    }
}

/// Pick the delimiter that splits the leading lines most consistently.
///
/// A delimiter appearing the same number of times on every sampled line
/// beats one that is merely frequent.
fn sniff_delimiter(bytes: &[u8]) -> Result<u8> {
    let text = String::from_utf8_lossy(bytes);
    let lines: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(SNIFF_LINES)
        .collect();
    if lines.is_empty() {
        return Err(AgriError::EmptyData("empty payload".to_string()));
    }

    let score = |delimiter: u8| -> (bool, usize) {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| unquoted_count(line, delimiter as char))
            .collect();
        let first = counts[0];
        (first > 0 && counts.iter().all(|&c| c == first), first)
    };

    Ok(DELIMITERS
        .iter()
        .copied()
        .map(|d| (score(d), d))
        .filter(|((_, first), _)| *first > 0)
        .fold(None, |best: Option<((bool, usize), u8)>, candidate| match best {
            Some(b) if b.0 >= candidate.0 => Some(b),
            _ => Some(candidate),
        })
        .map(|(_, d)| d)
        .unwrap_or(b','))
}

fn unquoted_count(line: &str, delimiter: char) -> usize {
    let mut quoted = false;
    line.chars()
        .filter(|&c| {
            if c == '"' {
                quoted = !quoted;
            }
            c == delimiter && !quoted
        })
        .count()
}
