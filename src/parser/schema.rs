// Schema extraction from CREATE TABLE blocks.
// A small cursor lexer replaces the fixed-offset slicing dumps are usually
// parsed with: it checks delimiters explicitly and reports "absent" instead
// of guessing.

use crate::parser::types::{DataType, TypeClassifier};
use tracing::debug;

/// A table header must start with exactly this text before the quoted name.
pub const CREATE_TABLE_PREFIX: &str = "CREATE TABLE ";

/// Column definitions may be indented by at most this many characters.
pub const MAX_COLUMN_INDENT: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Ordered columns of one table. Rebuilt from scratch at every CREATE TABLE.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    table: Option<String>,
    columns: Vec<Column>,
}

impl Schema {
    pub fn new(table: Option<String>) -> Self {
        Self {
            table,
            columns: Vec::new(),
        }
    }

    pub fn with_columns(table: Option<String>, columns: Vec<Column>) -> Self {
        Self { table, columns }
    }

    pub fn table(&self) -> Option<&str> {
        self.table.as_deref()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn push(&mut self, column: Column) {
        self.columns.push(column);
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}

// Byte cursor over one line.
struct Cursor<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.src[self.pos..]
    }

    // Returns how many characters were skipped.
    fn skip_whitespace(&mut self) -> usize {
        let mut skipped = 0;
        for (i, c) in self.rest().char_indices() {
            if !c.is_whitespace() {
                self.pos += i;
                return skipped;
            }
            skipped += 1;
        }
        self.pos = self.src.len();
        skipped
    }

    // `name` -> name. None unless the cursor sits on an opening backtick
    // that has a matching closing one.
    fn quoted_ident(&mut self) -> Option<&'a str> {
        let body = self.rest().strip_prefix('`')?;
        let end = body.find('`')?;
        let ident = &body[..end];
        self.pos += 1 + end + 1;
        Some(ident)
    }

    // Next run of non-whitespace characters (possibly empty).
    fn word(&mut self) -> &'a str {
        let rest = self.rest();
        let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
        self.pos += end;
        &rest[..end]
    }
}

pub struct SchemaParser {
    classifier: TypeClassifier,
}

impl SchemaParser {
    pub fn new() -> Self {
        Self {
            classifier: TypeClassifier::new(),
        }
    }

    /// `CREATE TABLE `name` (` -> `name`. Anything else, including
    /// `DROP TABLE` lines and `CREATE TABLE IF NOT EXISTS`, is absent.
    pub fn table_name(&self, line: &str) -> Option<String> {
        let rest = line.strip_prefix(CREATE_TABLE_PREFIX)?;
        let name = Cursor::new(rest).quoted_ident()?;
        debug!("ParseSchema: found CREATE TABLE for {}", name);
        Some(name.to_string())
    }

    /// One column definition line, e.g. `` `id` int(11) NOT NULL,``.
    /// Key and constraint lines, the closing `)` and over-indented lines are
    /// absent, which tells the router the definition block is over.
    pub fn column(&self, line: &str) -> Option<Column> {
        let mut cursor = Cursor::new(line);
        if cursor.skip_whitespace() > MAX_COLUMN_INDENT {
            return None;
        }
        let name = cursor.quoted_ident()?;
        cursor.skip_whitespace();
        let type_word = cursor.word();
        Some(Column::new(name, self.classifier.classify(type_word)))
    }
}

impl Default for SchemaParser {
    fn default() -> Self {
        Self::new()
    }
}
