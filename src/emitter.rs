// Record emitter: zips split fields with the active schema, coerces each
// one by column type and writes one JSON object per line.

use crate::error::Result;
use crate::parser::insert::InsertParser;
use crate::parser::quote;
use crate::parser::schema::Schema;
use crate::parser::types::DataType;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::Write;

/// A typed JSON value. Serialized bare: numbers as JSON numbers, text as a
/// JSON string.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum FieldValue {
    Integer(i64),
    // Values above i64::MAX, e.g. from `bigint(20) unsigned` columns.
    Unsigned(u64),
    Float(f64),
    Text(String),
}

/// Column name -> value. A BTreeMap keeps the emitted keys in alphabetical
/// order regardless of column order.
pub type Record = BTreeMap<String, FieldValue>;

/// Numeric parse failures (including `NULL`) become zero; they are never
/// reported.
pub fn coerce(raw: &str, data_type: DataType) -> FieldValue {
    match data_type {
        DataType::Integer => coerce_integer(raw),
        DataType::Float => FieldValue::Float(raw.parse().unwrap_or(0.0)),
        DataType::Text => FieldValue::Text(quote::to_external(raw)),
    }
}

fn coerce_integer(raw: &str) -> FieldValue {
    if let Ok(n) = raw.parse::<i64>() {
        return FieldValue::Integer(n);
    }
    raw.parse::<u64>()
        .map(FieldValue::Unsigned)
        .unwrap_or(FieldValue::Integer(0))
}

/// Callers guarantee `fields.len() == schema.len()`.
pub fn build_record(schema: &Schema, fields: Vec<String>) -> Record {
    schema
        .columns()
        .iter()
        .zip(fields)
        .map(|(column, raw)| (column.name.clone(), coerce(&raw, column.data_type)))
        .collect()
}

pub fn write_record<W: Write + ?Sized>(out: &mut W, record: &Record) -> Result<()> {
    serde_json::to_writer(&mut *out, record)?;
    out.write_all(b"\n")?;
    Ok(())
}

pub struct RecordEmitter {
    insert_parser: InsertParser,
}

impl RecordEmitter {
    pub fn new() -> Self {
        Self {
            insert_parser: InsertParser::new(),
        }
    }

    // Emit every tuple of one INSERT statement. Returns the number of rows
    // written; on error the rows before the offending tuple are already out.
    pub fn emit_statement<W: Write + ?Sized>(
        &self,
        out: &mut W,
        statement: &str,
        schema: &Schema,
    ) -> Result<usize> {
        self.insert_parser
            .for_each_row(statement, schema.len(), |fields| {
                write_record(&mut *out, &build_record(schema, fields))
            })
    }
}

impl Default for RecordEmitter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvertError;
    use crate::parser::schema::Column;
    use pretty_assertions::assert_eq;

    fn test_table() -> Schema {
        Schema::with_columns(
            Some("test_table".into()),
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
                Column::new("description", DataType::Text),
                Column::new("category_id", DataType::Integer),
                Column::new("rate", DataType::Float),
                Column::new("created_at", DataType::Text),
            ],
        )
    }

    fn emit(statement: &str, schema: &Schema) -> (Result<usize>, String) {
        let mut out = Vec::new();
        let result = RecordEmitter::new().emit_statement(&mut out, statement, schema);
        (result, String::from_utf8(out).unwrap())
    }

    const TEST_TABLE_INSERT: &str = r#"INSERT INTO test_table VALUES (1,'name1','description1,\'A\':"A"',1,1.1,'2020-09-09 10:02:35'),(2,'name2','description2,\'B\':"B"',2,2.2,'2020-09-09 10:02:46');"#;

    const TEST_TABLE_JSONL: &str = r#"{"category_id":1,"created_at":"2020-09-09 10:02:35","description":"description1,'A':\"A\"","id":1,"name":"name1","rate":1.1}
{"category_id":2,"created_at":"2020-09-09 10:02:46","description":"description2,'B':\"B\"","id":2,"name":"name2","rate":2.2}
"#;

    #[test]
    fn coerce_by_type() {
        assert_eq!(coerce("42", DataType::Integer), FieldValue::Integer(42));
        assert_eq!(coerce("-7", DataType::Integer), FieldValue::Integer(-7));
        assert_eq!(coerce("1.5", DataType::Float), FieldValue::Float(1.5));
        assert_eq!(
            coerce(r#"it"s"#, DataType::Text),
            FieldValue::Text("it's".into())
        );
    }

    #[test]
    fn unsigned_bigint_keeps_its_value() {
        assert_eq!(
            coerce("18446744073709551615", DataType::Integer),
            FieldValue::Unsigned(u64::MAX)
        );
        assert_eq!(
            coerce("9223372036854775807", DataType::Integer),
            FieldValue::Integer(i64::MAX)
        );
        // Beyond u64 there is no exact integer; it falls back like any failure.
        assert_eq!(
            coerce("18446744073709551616", DataType::Integer),
            FieldValue::Integer(0)
        );

        let schema = Schema::with_columns(
            Some("t".into()),
            vec![Column::new("id", DataType::Integer)],
        );
        let (result, out) = emit("INSERT INTO t VALUES (18446744073709551615);", &schema);
        assert_eq!(result.unwrap(), 1);
        assert_eq!(out, "{\"id\":18446744073709551615}\n");
    }

    #[test]
    fn numeric_failures_become_zero() {
        assert_eq!(coerce("NULL", DataType::Integer), FieldValue::Integer(0));
        assert_eq!(coerce("1.5", DataType::Integer), FieldValue::Integer(0));
        assert_eq!(coerce("", DataType::Float), FieldValue::Float(0.0));
        assert_eq!(coerce("abc", DataType::Float), FieldValue::Float(0.0));
    }

    #[test]
    fn simple_table() {
        let schema = Schema::with_columns(
            Some("t".into()),
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
            ],
        );
        let (result, out) = emit("INSERT INTO t VALUES (1,'a'),(2,'b');", &schema);
        assert_eq!(result.unwrap(), 2);
        assert_eq!(out, "{\"id\":1,\"name\":\"a\"}\n{\"id\":2,\"name\":\"b\"}\n");
    }

    #[test]
    fn keys_are_alphabetical_with_escaped_quotes() {
        for suffix in ["", "\n", "\r\n"] {
            let (result, out) = emit(&format!("{TEST_TABLE_INSERT}{suffix}"), &test_table());
            assert_eq!(result.unwrap(), 2);
            assert_eq!(out, TEST_TABLE_JSONL);
        }
    }

    #[test]
    fn json_text_column() {
        let schema = Schema::with_columns(
            Some("json_table".into()),
            vec![
                Column::new("id", DataType::Integer),
                Column::new("json", DataType::Text),
            ],
        );
        let (result, out) = emit(
            "INSERT INTO json_table VALUES (1,'{\\\"key\\\": \\\"value\\\"}'),(2,'{\\\"no\\\": 1}');\n",
            &schema,
        );
        assert_eq!(result.unwrap(), 2);
        assert_eq!(
            out,
            "{\"id\":1,\"json\":\"{\\\"key\\\": \\\"value\\\"}\"}\n{\"id\":2,\"json\":\"{\\\"no\\\": 1}\"}\n"
        );
    }

    #[test]
    fn short_tuple_reports_error_and_keeps_earlier_rows() {
        let schema = Schema::with_columns(
            Some("test_table".into()),
            vec![
                Column::new("id", DataType::Integer),
                Column::new("name", DataType::Text),
            ],
        );
        let (result, out) = emit("INSERT INTO test_table VALUES (1,'name1'),(2);", &schema);
        assert!(matches!(result, Err(ConvertError::FieldCount { .. })));
        assert_eq!(out, "{\"id\":1,\"name\":\"name1\"}\n");
    }

    #[test]
    fn insert_without_schema_is_an_error() {
        let (result, out) = emit("INSERT INTO t VALUES (1);", &Schema::default());
        assert!(matches!(
            result,
            Err(ConvertError::FieldCount {
                expected: 0,
                found: 1,
                ..
            })
        ));
        assert!(out.is_empty());
    }
}
