// dump2jsonl: convert a MySQL dump (CREATE TABLE + INSERT lines) into JSONL,
// either on stdout or as one `<table>.jsonl` file per table.

use clap::{CommandFactory, Parser};
use dump2jsonl::cli::Args;
use dump2jsonl::progress::ProgressManager;
use dump2jsonl::{logger, ConvertError, Converter, Destination, Summary};
use std::io;
use std::process::ExitCode;
use tracing::{debug, error, info};

fn main() -> ExitCode {
    let args = Args::parse();
    logger::init(args.debug);

    match run(&args) {
        Ok(summary) => {
            if !args.quiet {
                info!(
                    "Converted {} rows from {} INSERT statements in {} tables ({} statements skipped)",
                    summary.rows, summary.statements, summary.tables, summary.skipped_statements
                );
            }
            ExitCode::SUCCESS
        }
        Err(ConvertError::InteractiveStdin) => {
            error!("{}", ConvertError::InteractiveStdin);
            if let Err(e) = Args::command().print_help() {
                error!("failed to print usage: {}", e);
            }
            eprintln!();
            ExitCode::FAILURE
        }
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: &Args) -> Result<Summary, ConvertError> {
    let reader = args.input().open()?;

    let dest = match &args.outdir {
        Some(dir) => {
            debug!("main: output directory {}", dir.display());
            Destination::directory(dir)?
        }
        None => Destination::stream(io::stdout().lock()),
    };

    // The bar shares stderr with the log, and stdout with JSONL when no
    // directory is given, so it only runs for file -> directory conversions.
    let progress = ProgressManager::new(!logger::is_debug() && args.outdir.is_some());
    let bar = args.file.as_deref().and_then(|path| progress.new_file_bar(path));

    let mut converter = Converter::new(dest);
    converter.run(reader, bar.as_ref())
}
