// INSERT splitter: one physical line holding `INSERT INTO t VALUES (...),(...);`
// becomes one field list per tuple. Parsing is deliberately shallow: the
// value list is requoted for a CSV reader and cut at every `),(`.

use crate::error::{ConvertError, Result};
use crate::parser::quote;
use csv::{ReaderBuilder, StringRecord};
use tracing::debug;

/// Boundary between two tuples once the outer parentheses are stripped.
pub const TUPLE_SEPARATOR: &str = "),(";

/// Text between the opening `(` of the first tuple and the closing `)` of the
/// last one. Accepts `;`, `;\n` and `;\r\n` endings.
pub fn value_list(statement: &str) -> Result<&str> {
    let body = statement
        .trim_end_matches(['\r', '\n'])
        .strip_suffix(';')
        .ok_or_else(|| ConvertError::MalformedStatement("missing ';' terminator".into()))?
        .strip_suffix(')')
        .ok_or_else(|| ConvertError::MalformedStatement("value list does not end with ')'".into()))?;

    // The VALUES keyword only narrows the search; without it the first `(` is used.
    let search_from = body
        .to_ascii_uppercase()
        .find("VALUES")
        .unwrap_or(0);
    let open = body[search_from..]
        .find('(')
        .map(|i| search_from + i)
        .ok_or_else(|| ConvertError::MalformedStatement("no '(' before the value list".into()))?;

    Ok(&body[open + 1..])
}

// Quoted fields must close, and a closing quote must end the field. The CSV
// reader is lenient about both, so a `\n` escape (which requotes to
// `"a"nb"`) or an unterminated string would otherwise slip through mangled.
fn check_quoting(chunk: &str, tuple: usize) -> Result<()> {
    let fail = |reason: &str| {
        Err(ConvertError::TupleParse {
            tuple,
            reason: reason.to_string(),
        })
    };
    let mut chars = chunk.chars().peekable();
    let mut field_start = true;

    while let Some(c) = chars.next() {
        match c {
            '"' if field_start => loop {
                match chars.next() {
                    None => return fail("unterminated quoted field"),
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                    }
                    Some('"') => match chars.peek() {
                        None | Some(',') => break,
                        Some(_) => return fail("extraneous text after quoted field"),
                    },
                    Some(_) => {}
                }
            },
            '"' => return fail("bare quote in unquoted field"),
            ',' => {
                field_start = true;
                continue;
            }
            _ => {}
        }
        field_start = false;
    }
    Ok(())
}

/// Fields of one tuple chunk (already in CSV quoting). Quoted fields keep
/// their embedded commas and lose their delimiters.
pub fn parse_tuple(chunk: &str, tuple: usize) -> Result<Vec<String>> {
    check_quoting(chunk, tuple)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(chunk.as_bytes());
    let mut record = StringRecord::new();
    let found = reader
        .read_record(&mut record)
        .map_err(|e| ConvertError::TupleParse {
            tuple,
            reason: e.to_string(),
        })?;
    if !found {
        return Ok(Vec::new());
    }
    Ok(record.iter().map(str::to_string).collect())
}

pub struct InsertParser;

impl InsertParser {
    pub fn new() -> Self {
        Self
    }

    // Split a statement and hand every tuple's fields to `on_row`, in input
    // order. Stops at the first tuple that fails to parse or whose field
    // count differs from `expected`; rows already handed over stay emitted.
    pub fn for_each_row<F>(&self, statement: &str, expected: usize, mut on_row: F) -> Result<usize>
    where
        F: FnMut(Vec<String>) -> Result<()>,
    {
        let values = quote::to_internal(value_list(statement)?);
        let mut rows = 0usize;

        for (i, chunk) in values.split(TUPLE_SEPARATOR).enumerate() {
            let tuple = i + 1;
            let fields = parse_tuple(chunk, tuple)?;
            if fields.len() != expected {
                return Err(ConvertError::FieldCount {
                    tuple,
                    expected,
                    found: fields.len(),
                });
            }
            on_row(fields)?;
            rows += 1;
        }

        debug!("ExpandInsert: {} value groups", rows);
        Ok(rows)
    }
}

impl Default for InsertParser {
    fn default() -> Self {
        Self::new()
    }
}
