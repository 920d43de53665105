// Command-line flags and input selection.

use crate::error::{ConvertError, Result};
use clap::Parser;
use std::fs::File;
use std::io::{self, BufRead, BufReader, IsTerminal};
use std::path::PathBuf;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Args {
    /// Dump file to read. Reads stdin when omitted.
    #[arg(short, long)]
    pub file: Option<PathBuf>,

    /// Write one <table>.jsonl per table into this directory (created if
    /// missing). Writes everything to stdout when omitted.
    #[arg(short, long)]
    pub outdir: Option<PathBuf>,

    /// Enable debug logging (disables the progress bar).
    #[arg(long)]
    pub debug: bool,

    /// Do not log the end-of-run summary.
    #[arg(short, long)]
    pub quiet: bool,
}

impl Args {
    pub fn input(&self) -> InputSource {
        match &self.file {
            Some(path) => InputSource::File(path.clone()),
            None => InputSource::Stdin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    File(PathBuf),
    Stdin,
}

impl InputSource {
    // Stdin is refused when it is an interactive terminal.
    pub fn open(&self) -> Result<Box<dyn BufRead>> {
        match self {
            InputSource::File(path) => {
                debug!("main: reading {}", path.display());
                let f = File::open(path).map_err(|source| ConvertError::OpenInput {
                    path: path.clone(),
                    source,
                })?;
                Ok(Box::new(BufReader::new(f)))
            }
            InputSource::Stdin => {
                let stdin = io::stdin();
                if stdin.is_terminal() {
                    return Err(ConvertError::InteractiveStdin);
                }
                debug!("main: reading stdin");
                Ok(Box::new(stdin.lock()))
            }
        }
    }
}
