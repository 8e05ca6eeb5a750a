use std::fs;
use std::io;
use std::path::Path;

use csv::ReaderBuilder;

use crate::republica::tools::error::{Result, ToolError};
use crate::republica::tools::model::{Row, Table, Value};

/// Byte encoding of a CSV file on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Encoding {
    /// ISO-8859-1, used by the raw registry extracts.
    Latin1,
    /// UTF-8, used by every file this tool writes.
    Utf8,
}

/// Reads a CSV file into a [`Table`], keeping every field as text.
///
/// Empty fields and the NA sentinels listed in
/// [`MISSING_TOKENS`](crate::republica::tools::model::MISSING_TOKENS) become
/// [`Value::Null`]. Short rows are padded with nulls; a row wider than the
/// header is rejected.
pub fn read_table(path: &Path, encoding: Encoding) -> Result<Table> {
    let bytes = fs::read(path)?;
    let text = decode(bytes, encoding)?;
    parse_table(&text)
}

/// Parses CSV text that has already been decoded.
pub fn parse_table(text: &str) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .flexible(true)
        .from_reader(text.as_bytes());

    let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
    let width = columns.len();
    let mut table = Table::new(columns);

    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > width {
            return Err(ToolError::MalformedRow {
                row: idx + 1,
                expected: width,
                found: record.len(),
            });
        }
        let mut row: Row = record.iter().map(Value::from_field).collect();
        row.resize(width, Value::Null);
        table.rows.push(row);
    }

    Ok(table)
}

fn decode(bytes: Vec<u8>, encoding: Encoding) -> Result<String> {
    match encoding {
        // Latin-1 maps every byte onto the code point of the same value.
        Encoding::Latin1 => Ok(bytes.into_iter().map(char::from).collect()),
        Encoding::Utf8 => {
            let text = String::from_utf8(bytes)
                .map_err(|err| ToolError::Io(io::Error::new(io::ErrorKind::InvalidData, err)))?;
            Ok(match text.strip_prefix('\u{feff}') {
                Some(stripped) => stripped.to_string(),
                None => text,
            })
        }
    }
}
