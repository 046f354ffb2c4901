use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

/// Spinner shown on stderr while a file is being probed.
pub struct ProbeSpinner {
    progress_bar: ProgressBar,
}

impl ProbeSpinner {
    pub fn new(enabled: bool) -> Self {
        let progress_bar = if enabled {
            ProgressBar::new_spinner()
        } else {
            ProgressBar::hidden()
        };

        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} [{elapsed}] {msg}") {
            progress_bar.set_style(style);
        }

        Self { progress_bar }
    }

    pub fn hidden() -> Self {
        Self::new(false)
    }

    pub fn start(&self, position: usize, total: usize, label: &str) {
        self.progress_bar.reset();
        self.progress_bar
            .set_message(format!("Probing {}/{}: {}", position, total, label));
        self.progress_bar
            .enable_steady_tick(Duration::from_millis(120));
    }

    pub fn clear(&self) {
        self.progress_bar.disable_steady_tick();
        self.progress_bar.finish_and_clear();
    }

    pub fn is_hidden(&self) -> bool {
        self.progress_bar.is_hidden()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_spinner() {
        let spinner = ProbeSpinner::hidden();
        assert!(spinner.is_hidden());
        spinner.start(1, 2, "movie.mkv");
        spinner.clear();
    }
}
