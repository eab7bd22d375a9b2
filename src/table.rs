//! Permissive delimited-text parser.
//!
//! Handles the quoting rules hand-exported spreadsheets actually produce:
//! quoted fields may contain commas, line breaks and doubled quotes, and
//! ragged rows are filled or truncated against the header instead of being
//! rejected. Parsing never fails.
//!
//! # Example
//!
//! ```rust
//! use vehicle_finance_sdk::table;
//!
//! let rows = table::parse("a,\"b,c\",d\n");
//! assert_eq!(rows, vec![vec!["a", "b,c", "d"]]);
//!
//! let records = table::to_records("id,name\n1,Pulsar\n");
//! assert_eq!(records[0]["name"], "Pulsar");
//! ```

use std::collections::HashMap;
use std::mem;

/// One data row keyed by header name.
pub type Record = HashMap<String, String>;

/// Split `text` into rows of fields.
///
/// Rows whose fields are all empty are dropped, so trailing blank lines
/// never surface as rows. A `\r\n` pair counts as a single terminator.
pub fn parse(text: &str) -> Vec<Vec<String>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let mut rows: Vec<Vec<String>> = Vec::new();
    let mut row: Vec<String> = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = text.chars().peekable();

    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    field.push('"');
                }
                '"' => in_quotes = false,
                _ => field.push(c),
            }
            continue;
        }

        match c {
            '"' => in_quotes = true,
            ',' => row.push(mem::take(&mut field)),
            '\r' | '\n' => {
                if c == '\r' && chars.peek() == Some(&'\n') {
                    chars.next();
                }
                row.push(mem::take(&mut field));
                push_row(&mut rows, mem::take(&mut row));
            }
            _ => field.push(c),
        }
    }

    // Last line without a terminator (or an unterminated quote at EOF)
    if !field.is_empty() || !row.is_empty() {
        row.push(field);
        push_row(&mut rows, row);
    }

    rows
}

/// Parse `text` and pair every data row with the header row.
///
/// Missing trailing fields become `""`; fields beyond the header are ignored.
/// Returns an empty vector when the text has no surviving rows.
pub fn to_records(text: &str) -> Vec<Record> {
    let mut rows = parse(text).into_iter();
    let Some(header) = rows.next() else {
        return Vec::new();
    };

    rows.map(|row| {
        let mut values = row.into_iter();
        header
            .iter()
            .map(|name| (name.clone(), values.next().unwrap_or_default()))
            .collect()
    })
    .collect()
}

/// Read a column from a record, treating an absent column as `""`.
pub fn field(record: &Record, name: &str) -> String {
    record.get(name).cloned().unwrap_or_default()
}

fn push_row(rows: &mut Vec<Vec<String>>, row: Vec<String>) {
    if row.iter().any(|f| !f.is_empty()) {
        rows.push(row);
    }
}
