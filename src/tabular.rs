//! CSV ingestion.
//!
//! Reads delimited text into a list of row lists, reading each cell as its own
//! piece of notation so spreadsheets can author symbol data directly.

use std::sync::Arc;

use crate::errors::SymbolError;
use crate::syntax::lexical::{is_structure, is_whitespace, OPEN_LIST};
use crate::syntax::parser::parse;
use crate::syntax::{Node, SourceText, Span};

/// How delimited text is split into cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CsvOptions {
    /// Discard the first row.
    pub has_header: bool,
    pub delimiter: u8,
}

impl Default for CsvOptions {
    fn default() -> Self {
        Self {
            has_header: true,
            delimiter: b',',
        }
    }
}

/// Reads comma-separated `text` into a list of row lists.
pub fn parse_csv(
    text: &str,
    has_header: bool,
    source_id: Option<&str>,
) -> Result<Node, SymbolError> {
    let options = CsvOptions {
        has_header,
        ..CsvOptions::default()
    };
    parse_csv_with(text, &options, source_id)
}

/// Reads delimited `text` into a list of row lists.
///
/// The result carries one zeroed origin over the whole input; cells read as
/// notation carry origins relative to their own cell text.
pub fn parse_csv_with(
    text: &str,
    options: &CsvOptions,
    source_id: Option<&str>,
) -> Result<Node, SymbolError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(options.has_header)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(text.as_bytes());

    let mut rows = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let cells = record
            .iter()
            .enumerate()
            .map(|(column, cell)| {
                read_cell(cell, source_id).map_err(|error| SymbolError::Cell {
                    row,
                    column,
                    source: Box::new(error),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        rows.push(Node::list(cells));
    }

    let source = Arc::new(SourceText::new(source_id, text));
    Ok(Node::List(rows, Some(Span::zeroed(source))))
}

fn read_cell(cell: &str, source_id: Option<&str>) -> Result<Node, SymbolError> {
    if cell.is_empty() {
        return Ok(Node::text(""));
    }
    // Text that is neither a list nor a single token is kept as written.
    if !cell.starts_with(OPEN_LIST) && cell.chars().any(|c| is_whitespace(c) || is_structure(c)) {
        return Ok(Node::text(cell));
    }
    parse(cell, source_id)
}
