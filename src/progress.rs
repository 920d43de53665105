// Progress bar over input bytes, drawn on stderr by indicatif.

use indicatif::{ProgressBar, ProgressStyle};
use std::fs;
use std::path::Path;

#[derive(Clone, Copy)]
pub struct ProgressManager {
    enabled: bool,
}

impl ProgressManager {
    // If enabled=false, no bars are created.
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    // Bar sized to the file on disk, labelled with its file name.
    pub fn new_file_bar(&self, path: &Path) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }
        let size = fs::metadata(path).map(|m| m.len()).unwrap_or(0);
        let bar = ProgressBar::new(size);
        bar.set_style(progress_style());
        bar.set_prefix(basename(path));
        Some(bar)
    }
}

fn progress_style() -> ProgressStyle {
    ProgressStyle::with_template(
        "{prefix:20} {bytes:>10}/{total_bytes:<10} [{bar:50}] {percent:>3}%",
    )
    .expect("valid progress template")
    .progress_chars("█ ")
}

fn basename(path: &Path) -> String {
    path.file_name()
        .and_then(|s| s.to_str())
        .map(str::to_string)
        .unwrap_or_else(|| path.display().to_string())
}
