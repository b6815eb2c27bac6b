//! Terminal progress display.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};

use collapse_core::api::ProgressSink;

const TICK: Duration = Duration::from_millis(100);

/// Spinner shown while a single long command (build, delegated run) is in flight.
pub fn spinner(message: impl Into<String>) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    let style = ProgressStyle::with_template("{spinner:.yellow} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());
    pb.set_style(style);
    pb.set_message(message.into());
    pb.enable_steady_tick(TICK);
    pb
}

/// Percent bar fed by the orchestrator.
pub struct ShotProgress {
    bar: ProgressBar,
}

impl ShotProgress {
    pub fn new(message: impl Into<String>) -> Self {
        let bar = ProgressBar::new(100);
        let style = ProgressStyle::with_template(
            "{msg} [{bar:40.yellow/blue}] {pos:>3}% ({eta} remaining)",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▓░");
        bar.set_style(style);
        bar.set_message(message.into());
        Self { bar }
    }

    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    #[cfg(test)]
    fn position(&self) -> u64 {
        self.bar.position()
    }
}

impl ProgressSink for ShotProgress {
    fn report(&self, percent: f64) {
        self.bar.set_position(percent.round().clamp(0.0, 100.0) as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_are_rounded_percentages() {
        let progress = ShotProgress::new("Running shots");
        progress.report(33.4);
        assert_eq!(progress.position(), 33);
        progress.report(100.0);
        assert_eq!(progress.position(), 100);
        progress.finish();
    }
}
