//! Progress bar for batch path generation
//!
//! Drawn on stderr by indicatif, so it never mixes with the path output on
//! stdout.

use indicatif::{ProgressBar, ProgressStyle};

/// Progress bar counting generated paths
pub struct BatchProgress {
    pub progress: ProgressBar,
}

impl BatchProgress {
    /// Create a new progress bar for `total_paths` paths
    pub fn new(total_paths: usize) -> Self {
        let progress = ProgressBar::new(total_paths as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} paths ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        progress.set_style(style);

        Self { progress }
    }

    /// Progress bar that draws nothing
    pub fn hidden() -> Self {
        Self {
            progress: ProgressBar::hidden(),
        }
    }

    /// Count one finished path
    pub fn inc(&self) {
        self.progress.inc(1);
    }

    /// Mark the batch as complete
    pub fn finish(&self, total_paths: usize) {
        self.progress
            .finish_with_message(format!("✅ Simulated {} paths", total_paths));
    }
}
