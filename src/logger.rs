// Logging setup: a tracing subscriber on stderr with DEBUG/INFO levels,
// switched by the --debug flag. Stdout stays reserved for JSONL.

use std::io::IsTerminal;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::Level;

static DEBUG: AtomicBool = AtomicBool::new(false);

// Install the global subscriber. Calling it twice keeps the first one.
pub fn init(debug: bool) {
    DEBUG.store(debug, Ordering::Relaxed);
    let level = if debug { Level::DEBUG } else { Level::INFO };
    let _ = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(level)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .without_time()
        .try_init();
}

// Returns true if debug logging is enabled.
pub fn is_debug() -> bool {
    DEBUG.load(Ordering::Relaxed)
}
