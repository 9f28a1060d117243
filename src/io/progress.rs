//! Progress display for batch piece slicing

use crate::io::configuration::PROGRESS_BAR_WIDTH;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::LazyLock;

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template(&format!(
            "[{{elapsed_precise}}] Images: [{{bar:{PROGRESS_BAR_WIDTH}.cyan/blue}}] {{pos}}/{{len}} {{msg}}"
        ))
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

/// Tracks how many gallery images have been sliced
///
/// Skipped images still advance the bar so the total always matches the
/// gallery size.
pub struct SliceProgress {
    bar: ProgressBar,
    skipped: usize,
}

impl SliceProgress {
    /// Visible progress bar for `total` images
    pub fn new(total: usize) -> Self {
        let bar = ProgressBar::new(total as u64);
        bar.set_style(BATCH_STYLE.clone());
        Self { bar, skipped: 0 }
    }

    /// Progress tracker that draws nothing
    pub fn hidden(total: usize) -> Self {
        let bar = ProgressBar::hidden();
        bar.set_length(total as u64);
        Self { bar, skipped: 0 }
    }

    /// Show which image is being sliced
    pub fn start_image(&self, label: &str) {
        self.bar.set_message(label.to_string());
    }

    /// Count an image as sliced
    pub fn complete_image(&self) {
        self.bar.inc(1);
    }

    /// Count an image as skipped
    pub fn skip_image(&mut self) {
        self.skipped += 1;
        self.bar.inc(1);
    }

    /// Images handled so far, sliced or skipped
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Images skipped so far
    pub const fn skipped(&self) -> usize {
        self.skipped
    }

    /// Close the bar with a summary line
    pub fn finish(&self) {
        self.bar.finish_with_message(format!("done ({} skipped)", self.skipped));
    }
}
