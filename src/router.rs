// Statement router: walks a dump line by line, collects the schema of each
// CREATE TABLE block and turns every INSERT line into JSONL rows for the
// table currently in scope.

use crate::emitter::RecordEmitter;
use crate::error::Result;
use crate::output::Destination;
use crate::parser::schema::{Schema, SchemaParser};
use indicatif::ProgressBar;
use std::io::BufRead;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Create,
    CloseParen,
    Insert,
    Other,
}

impl LineKind {
    pub fn of(line: &str) -> Self {
        if line.starts_with("CREATE") {
            LineKind::Create
        } else if line.starts_with(')') {
            LineKind::CloseParen
        } else if line.starts_with("INSERT") {
            LineKind::Insert
        } else {
            LineKind::Other
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouterState {
    Outside,
    InSchema,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub tables: usize,
    pub statements: usize,
    pub rows: usize,
    pub skipped_statements: usize,
}

pub struct Converter<'a> {
    schema_parser: SchemaParser,
    emitter: RecordEmitter,
    state: RouterState,
    schema: Schema,
    dest: Destination<'a>,
    summary: Summary,
}

impl<'a> Converter<'a> {
    pub fn new(dest: Destination<'a>) -> Self {
        Self {
            schema_parser: SchemaParser::new(),
            emitter: RecordEmitter::new(),
            state: RouterState::Outside,
            schema: Schema::default(),
            dest,
            summary: Summary::default(),
        }
    }

    pub fn state(&self) -> RouterState {
        self.state
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    // Only fatal (I/O) errors come back; a bad INSERT is logged, counted and skipped.
    pub fn feed_line(&mut self, line: &str) -> Result<()> {
        let kind = LineKind::of(line);

        if kind == LineKind::Create {
            self.start_table(line)?;
            return Ok(());
        }

        if self.state == RouterState::InSchema {
            if kind == LineKind::CloseParen {
                self.close_schema();
                return Ok(());
            }
            match self.schema_parser.column(line) {
                Some(column) => self.schema.push(column),
                None => self.close_schema(),
            }
        }

        // INSERT handling does not depend on the state, only on the prefix.
        if kind == LineKind::Insert {
            self.insert(line)?;
        }
        Ok(())
    }

    // Consume the whole input, then flush the destination.
    pub fn run<R: BufRead>(&mut self, mut reader: R, bar: Option<&ProgressBar>) -> Result<Summary> {
        let mut buf = Vec::new();
        loop {
            buf.clear();
            let n = reader.read_until(b'\n', &mut buf)?;
            if n == 0 {
                break;
            }
            if let Some(b) = bar {
                b.inc(n as u64);
            }
            let line = String::from_utf8_lossy(&buf);
            self.feed_line(&line)?;
        }
        self.dest.finish()?;

        if let Some(b) = bar {
            b.finish();
        }
        debug!(
            "Convert: {} tables, {} statements, {} rows, {} skipped",
            self.summary.tables,
            self.summary.statements,
            self.summary.rows,
            self.summary.skipped_statements
        );
        Ok(self.summary.clone())
    }

    fn start_table(&mut self, line: &str) -> Result<()> {
        let table = self.schema_parser.table_name(line);
        if table.is_none() {
            warn!("Failed to get table name.");
        }
        self.dest.begin_table(table.as_deref())?;
        self.schema = Schema::new(table);
        self.state = RouterState::InSchema;
        self.summary.tables += 1;
        Ok(())
    }

    fn close_schema(&mut self) {
        debug!(
            "ParseSchema: table {} has {} columns",
            self.schema.table().unwrap_or("<unnamed>"),
            self.schema.len()
        );
        self.state = RouterState::Outside;
    }

    fn insert(&mut self, line: &str) -> Result<()> {
        self.summary.statements += 1;
        match self
            .emitter
            .emit_statement(self.dest.writer(), line, &self.schema)
        {
            Ok(rows) => {
                self.summary.rows += rows;
                Ok(())
            }
            Err(e) if e.is_fatal() => Err(e),
            Err(e) => {
                warn!(
                    "{}: skipping INSERT statement: {}",
                    self.schema.table().unwrap_or("<unnamed>"),
                    e
                );
                self.summary.skipped_statements += 1;
                Ok(())
            }
        }
    }
}
