//! Terminal progress bars for ingest and search.

use std::sync::Mutex;

use beir_fess_repository::ProgressReporter;
use indicatif::{ProgressBar, ProgressStyle};

const TEMPLATE: &str =
    "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg} ({per_sec})";

/// Draws one `indicatif` bar per adapter operation.
#[derive(Default)]
pub struct IndicatifProgress {
    bar: Mutex<Option<ProgressBar>>,
    hidden: bool,
}

impl IndicatifProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// A reporter that tracks position without drawing anything.
    pub fn hidden() -> Self {
        Self {
            bar: Mutex::new(None),
            hidden: true,
        }
    }

    /// Position of the current bar, if one was started.
    pub fn position(&self) -> Option<u64> {
        self.bar
            .lock()
            .ok()
            .and_then(|bar| bar.as_ref().map(ProgressBar::position))
    }
}

impl ProgressReporter for IndicatifProgress {
    fn start(&self, unit: &str, total: u64) {
        let bar = if self.hidden {
            ProgressBar::hidden()
        } else {
            ProgressBar::new(total)
        };
        bar.set_length(total);
        let style = ProgressStyle::default_bar()
            .template(TEMPLATE)
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        bar.set_style(style);
        bar.set_message(unit.to_string());

        if let Ok(mut current) = self.bar.lock() {
            if let Some(previous) = current.replace(bar) {
                previous.abandon();
            }
        }
    }

    fn advance(&self, delta: u64) {
        if let Ok(current) = self.bar.lock() {
            if let Some(bar) = current.as_ref() {
                bar.inc(delta);
            }
        }
    }

    fn finish(&self) {
        if let Ok(current) = self.bar.lock() {
            if let Some(bar) = current.as_ref() {
                bar.finish();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_tracks_position() {
        let progress = IndicatifProgress::hidden();
        assert_eq!(progress.position(), None);

        progress.start("docs", 10);
        progress.advance(4);
        progress.advance(6);
        progress.finish();
        assert_eq!(progress.position(), Some(10));

        progress.start("queries", 2);
        assert_eq!(progress.position(), Some(0));
    }
}
