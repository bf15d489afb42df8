use crate::extractor::ExtractionProgress;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const TICK_INTERVAL: Duration = Duration::from_millis(120);

/// Single spinner shown on stderr while folders are processed. It stays
/// hidden when disabled, and indicatif hides it when stderr is not a terminal.
pub struct ProgressManager {
    spinner: ProgressBar,
    enabled: bool,
}

impl ProgressManager {
    pub fn new(enabled: bool) -> Self {
        Self {
            spinner: ProgressBar::hidden(),
            enabled,
        }
    }

    pub fn start_spinner(&mut self, message: &str) -> &ProgressBar {
        if !self.enabled {
            return &self.spinner;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold} {wide_msg} [{elapsed}]")
                .unwrap_or_else(|_| ProgressStyle::default_spinner())
                .tick_chars("◐◓◑◒ "),
        );
        spinner.set_message(message.to_string());
        spinner.enable_steady_tick(TICK_INTERVAL);
        self.spinner = spinner;

        &self.spinner
    }

    pub fn spinner(&self) -> &ProgressBar {
        &self.spinner
    }

    /// Runs `f` with the spinner cleared so printed lines do not interleave
    /// with it.
    pub fn suspend<F, R>(&self, f: F) -> R
    where
        F: FnOnce() -> R,
    {
        if self.enabled {
            self.spinner.suspend(f)
        } else {
            f()
        }
    }

    pub fn clear(&self) {
        if self.enabled {
            self.spinner.finish_and_clear();
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new(true)
    }
}

pub fn update_folder_progress(pb: &ProgressBar, folder: &str, progress: &ExtractionProgress) {
    pb.set_prefix(folder.to_string());
    pb.set_message(format!("{} images so far", progress.files_extracted));
}

pub fn update_file_progress(pb: &ProgressBar, progress: &ExtractionProgress) {
    let message = match progress.current_file {
        Some(ref name) => format!("{} → {} images so far", name, progress.files_extracted),
        None => format!("{} images so far", progress.files_extracted),
    };
    pb.set_message(message);
}

pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    match secs {
        0 => format!("{}ms", duration.as_millis()),
        1..=59 => format!("{}s", secs),
        _ => format!("{}m {}s", secs / 60, secs % 60),
    }
}

/// Binary-prefixed size with one decimal above bytes, e.g. `1.5 MB`.
pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;
    const GB: u64 = MB * 1024;

    match bytes {
        b if b >= GB => format!("{:.1} GB", b as f64 / GB as f64),
        b if b >= MB => format!("{:.1} MB", b as f64 / MB as f64),
        b if b >= KB => format!("{:.1} KB", b as f64 / KB as f64),
        b => format!("{} B", b),
    }
}
