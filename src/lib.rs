//! Convert MySQL dump files into typed JSONL.
//!
//! A dump is read line by line: `CREATE TABLE` blocks provide the column
//! names and types, and each `INSERT INTO ... VALUES (...),(...);` line is
//! expanded into one JSON object per tuple.
//!
//! ```
//! use dump2jsonl::{Converter, Destination};
//!
//! let dump = "CREATE TABLE `t` (\n  `id` int(11),\n  `name` varchar(255)\n)\nINSERT INTO t VALUES (1,'a');\n";
//! let mut out = Vec::new();
//! Converter::new(Destination::stream(&mut out)).run(dump.as_bytes(), None)?;
//! assert_eq!(out, b"{\"id\":1,\"name\":\"a\"}\n");
//! # Ok::<(), dump2jsonl::ConvertError>(())
//! ```

pub mod cli;
pub mod emitter;
pub mod error;
pub mod logger;
pub mod output;
pub mod parser;
pub mod progress;
pub mod router;

pub use emitter::{FieldValue, Record, RecordEmitter};
pub use error::{ConvertError, Result};
pub use output::Destination;
pub use parser::{Column, DataType, Schema};
pub use router::{Converter, Summary};
