// Output destinations: one shared stream, or one `<table>.jsonl` file per
// table in a directory. At most one file is open at a time; it is flushed
// and closed when the next table starts or the destination is dropped.

use crate::error::{ConvertError, Result};
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use tracing::debug;

/// File stem used in directory mode when a CREATE TABLE line has no
/// extractable name.
pub const UNNAMED_TABLE: &str = "unnamed_table";

pub enum Destination<'a> {
    Stream(BufWriter<Box<dyn Write + 'a>>),
    Directory {
        dir: PathBuf,
        current: Option<BufWriter<File>>,
        // Rows seen before the first CREATE TABLE have no file to go to.
        discard: io::Sink,
    },
}

impl<'a> Destination<'a> {
    pub fn stream<W: Write + 'a>(writer: W) -> Self {
        Destination::Stream(BufWriter::new(Box::new(writer)))
    }

    // Create the directory (and parents) if needed.
    pub fn directory(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        if !dir.is_dir() {
            fs::create_dir_all(&dir).map_err(|source| ConvertError::CreateOutputDir {
                path: dir.clone(),
                source,
            })?;
        }
        Ok(Destination::Directory {
            dir,
            current: None,
            discard: io::sink(),
        })
    }

    /// Switch to a new table. No-op for a stream.
    pub fn begin_table(&mut self, table: Option<&str>) -> Result<()> {
        let Destination::Directory { dir, current, .. } = self else {
            return Ok(());
        };
        if let Some(mut previous) = current.take() {
            previous.flush()?;
        }
        let path = table_path(dir, table.unwrap_or(UNNAMED_TABLE));
        debug!("Output: opening {}", path.display());
        let file = File::create(&path)
            .map_err(|source| ConvertError::CreateOutputFile { path, source })?;
        *current = Some(BufWriter::new(file));
        Ok(())
    }

    pub fn writer(&mut self) -> &mut dyn Write {
        match self {
            Destination::Stream(w) => w,
            Destination::Directory {
                current: Some(w), ..
            } => w,
            Destination::Directory { discard, .. } => discard,
        }
    }

    pub fn finish(&mut self) -> Result<()> {
        self.writer().flush()?;
        Ok(())
    }
}

pub fn table_path(dir: &Path, table: &str) -> PathBuf {
    dir.join(format!("{table}.jsonl"))
}
