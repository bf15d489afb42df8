use crate::error::{ExtractorError, UserFriendlyError};
use crate::extractor::ExtractionReport;
use crate::layout::ProjectLayout;
use crate::ui::progress::{format_bytes, format_duration};
use console::{style, Emoji, Term};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OutputMode {
    Human,
    Json,
    Plain,
}

impl OutputMode {
    pub fn from_string(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => OutputMode::Json,
            "plain" => OutputMode::Plain,
            _ => OutputMode::Human,
        }
    }
}

// Emojis with text fallbacks
static CHECKMARK: Emoji = Emoji("✅ ", "+ ");
static CROSS: Emoji = Emoji("❌ ", "x ");
static INFO: Emoji = Emoji("ℹ️  ", "i ");
static WARNING: Emoji = Emoji("⚠️  ", "! ");
static PICTURE: Emoji = Emoji("🖼️  ", "");
static SEARCH: Emoji = Emoji("🔍 ", "> ");
static FOLDER: Emoji = Emoji("📁 ", "> ");
static OPEN_FOLDER: Emoji = Emoji("📂 ", "> ");
static CHART: Emoji = Emoji("📊 ", "= ");
static PARTY: Emoji = Emoji("🎉 ", "* ");
static SPARKLES: Emoji = Emoji("✨ ", "* ");
static STOP: Emoji = Emoji("⏹️  ", "! ");
static BOOM: Emoji = Emoji("💥 ", "! ");

const RULE_WIDTH: usize = 50;

/// Run log printer. Every line, failures included, goes to stdout so the log
/// reads top to bottom in one stream.
pub struct OutputFormatter {
    mode: OutputMode,
    use_colors: bool,
    verbose_level: u8,
    quiet: bool,
}

impl OutputFormatter {
    pub fn new(mode: OutputMode, verbose: u8, quiet: bool) -> Self {
        let use_colors = match mode {
            OutputMode::Human => Term::stdout().features().colors_supported() && !quiet,
            _ => false,
        };

        Self {
            mode,
            use_colors,
            verbose_level: if quiet { 0 } else { verbose },
            quiet,
        }
    }

    pub fn mode(&self) -> OutputMode {
        self.mode
    }

    // Core messaging methods
    pub fn error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => self.print_human_message(MessageType::Error, message),
            OutputMode::Json => self.print_json_message("error", message),
            OutputMode::Plain => println!("ERROR: {}", message),
        }
    }

    pub fn warning(&self, message: &str) {
        if self.should_show_message(1) {
            match self.mode {
                OutputMode::Human => self.print_human_message(MessageType::Warning, message),
                OutputMode::Json => self.print_json_message("warning", message),
                OutputMode::Plain => println!("WARNING: {}", message),
            }
        }
    }

    pub fn debug(&self, message: &str) {
        if self.should_show_message(2) {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!("  {}", style(message).dim());
                    } else {
                        println!("  DEBUG: {}", message);
                    }
                }
                OutputMode::Json => self.print_json_message("debug", message),
                OutputMode::Plain => println!("DEBUG: {}", message),
            }
        }
    }

    pub fn print_user_friendly_error(&self, error: &ExtractorError) {
        self.error(&error.user_message());

        if let Some(suggestion) = error.suggestion() {
            match self.mode {
                OutputMode::Human => {
                    if self.use_colors {
                        println!(
                            "{}{}",
                            INFO,
                            style(format!("Suggestion: {}", suggestion)).cyan()
                        );
                    } else {
                        println!("Suggestion: {}", suggestion);
                    }
                }
                OutputMode::Json => {
                    self.print_json_object(&serde_json::json!({
                        "type": "suggestion",
                        "message": suggestion
                    }));
                }
                OutputMode::Plain => println!("SUGGESTION: {}", suggestion),
            }
        }
    }

    // Run lifecycle
    pub fn print_banner(&self) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}{}", PICTURE, style("Image Extractor").bold().cyan());
                } else {
                    println!("{}Image Extractor", PICTURE);
                }
                println!("{}", "=".repeat(RULE_WIDTH));
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "header",
                    "title": "Image Extractor",
                    "version": env!("CARGO_PKG_VERSION")
                }));
            }
            OutputMode::Plain => println!("=== Image Extractor ==="),
        }
    }

    pub fn print_scan_start(&self, layout: &ProjectLayout) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                println!("{}Scanning input directory: {}", SEARCH, layout.input_dir.display());
                println!("{}Output directory: {}", FOLDER, layout.output_dir.display());
                self.print_separator();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "scan_start",
                    "input_dir": layout.input_dir.display().to_string(),
                    "output_dir": layout.output_dir.display().to_string(),
                    "timestamp": chrono::Utc::now().to_rfc3339()
                }));
            }
            OutputMode::Plain => {
                println!("INPUT: {}", layout.input_dir.display());
                println!("OUTPUT: {}", layout.output_dir.display());
            }
        }
    }

    pub fn print_folder_start(&self, folder: &str) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}Processing folder: {}", OPEN_FOLDER, style(folder).bold());
                } else {
                    println!("{}Processing folder: {}", OPEN_FOLDER, folder);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "folder_start",
                    "folder": folder
                }));
            }
            OutputMode::Plain => println!("FOLDER: {}", folder),
        }
    }

    pub fn print_file_copied(&self, file: &str, destination_name: &str) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!(
                        "  {}{} → {}",
                        CHECKMARK,
                        file,
                        style(destination_name).green()
                    );
                } else {
                    println!("  {}{} → {}", CHECKMARK, file, destination_name);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "file_copied",
                    "file": file,
                    "destination": destination_name
                }));
            }
            OutputMode::Plain => println!("COPIED: {} -> {}", file, destination_name),
        }
    }

    /// Copy failures are shown even in quiet mode.
    pub fn print_file_failed(&self, file: &str, error: &ExtractorError) {
        let cause = match error {
            ExtractorError::Copy { source, .. } => source.to_string(),
            other => other.to_string(),
        };

        match self.mode {
            OutputMode::Human => {
                let line = format!("Failed to copy {}: {}", file, cause);
                if self.use_colors {
                    println!("  {}{}", CROSS, style(line).red());
                } else {
                    println!("  {}{}", CROSS, line);
                }
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "file_failed",
                    "file": file,
                    "error": cause
                }));
            }
            OutputMode::Plain => println!("FAILED: {}: {}", file, cause),
        }
    }

    pub fn print_folder_done(&self, folder: &str, extracted: usize) {
        if !self.should_show_message(1) {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if extracted == 0 {
                    println!("  {}No images found in {}", INFO, folder);
                } else {
                    println!("  {}Extracted {} images from {}", CHART, extracted, folder);
                }
                println!();
            }
            OutputMode::Json => {
                self.print_json_object(&serde_json::json!({
                    "type": "folder_done",
                    "folder": folder,
                    "extracted": extracted
                }));
            }
            OutputMode::Plain => println!("FOLDER DONE: {} ({} extracted)", folder, extracted),
        }
    }

    /// Final summary. Printed in quiet mode too.
    pub fn print_extraction_summary(&self, report: &ExtractionReport) {
        match self.mode {
            OutputMode::Human => self.print_human_summary(report),
            OutputMode::Json => {
                let json_output = serde_json::to_string_pretty(&serde_json::json!({
                    "type": "report",
                    "report": report
                }))
                .unwrap_or_else(|_| "{}".to_string());
                println!("{}", json_output);
            }
            OutputMode::Plain => self.print_plain_summary(report),
        }
    }

    pub fn print_completed(&self) {
        match self.mode {
            OutputMode::Human => {
                if self.should_show_message(1) {
                    println!();
                    println!("{}Process completed successfully!", SPARKLES);
                }
            }
            OutputMode::Json => self.print_json_message("success", "Process completed successfully"),
            OutputMode::Plain => {
                if self.should_show_message(1) {
                    println!("DONE");
                }
            }
        }
    }

    pub fn print_failed(&self) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}Process failed!", CROSS);
            }
            OutputMode::Json => self.print_json_message("error", "Process failed"),
            OutputMode::Plain => println!("FAILED"),
        }
    }

    pub fn print_interrupted(&self) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}Process interrupted by user.", STOP);
            }
            OutputMode::Json => self.print_json_message("interrupted", "Process interrupted by user"),
            OutputMode::Plain => println!("INTERRUPTED: Process interrupted by user"),
        }
    }

    pub fn print_unexpected_error(&self, message: &str) {
        match self.mode {
            OutputMode::Human => {
                println!();
                println!("{}Unexpected error: {}", BOOM, message);
            }
            OutputMode::Json => self.print_json_message("error", &format!("Unexpected error: {}", message)),
            OutputMode::Plain => println!("ERROR: Unexpected error: {}", message),
        }
    }

    pub fn print_skipped(&self, path: &Path) {
        self.debug(&format!("Skipping non-image file: {}", path.display()));
    }

    pub fn print_separator(&self) {
        if self.quiet {
            return;
        }

        match self.mode {
            OutputMode::Human => {
                if self.use_colors {
                    println!("{}", style("-".repeat(RULE_WIDTH)).dim());
                } else {
                    println!("{}", "-".repeat(RULE_WIDTH));
                }
            }
            OutputMode::Plain => println!("{}", "-".repeat(RULE_WIDTH)),
            OutputMode::Json => {} // No separator in JSON mode
        }
    }

    // Private helper methods
    fn should_show_message(&self, min_verbose_level: u8) -> bool {
        !self.quiet && self.verbose_level >= min_verbose_level
    }

    fn print_human_message(&self, msg_type: MessageType, message: &str) {
        let emoji = match msg_type {
            MessageType::Error => &CROSS,
            MessageType::Warning => &WARNING,
        };

        let text = if self.use_colors {
            match msg_type {
                MessageType::Error => style(message).red().bold().to_string(),
                MessageType::Warning => style(message).yellow().bold().to_string(),
            }
        } else {
            message.to_string()
        };

        println!("{}{}", emoji, text);
    }

    fn print_json_message(&self, level: &str, message: &str) {
        self.print_json_object(&serde_json::json!({
            "type": "message",
            "level": level,
            "message": message,
            "timestamp": chrono::Utc::now().to_rfc3339()
        }));
    }

    fn print_json_object(&self, obj: &serde_json::Value) {
        println!(
            "{}",
            serde_json::to_string(obj).unwrap_or_else(|_| "{}".to_string())
        );
    }

    fn print_human_summary(&self, report: &ExtractionReport) {
        self.print_separator();

        let total = if self.use_colors {
            style(report.total_extracted).cyan().bold().to_string()
        } else {
            report.total_extracted.to_string()
        };
        println!("{}Extraction complete! Total images extracted: {}", PARTY, total);

        if !self.quiet {
            println!(
                "  Time taken: {}",
                format_duration(report.extraction_duration)
            );
            println!("  Data copied: {}", format_bytes(report.total_bytes));
            if report.files_failed > 0 {
                println!("  Failed copies: {}", report.files_failed);
            }
            if !report.warnings.is_empty() {
                println!("  Warnings: {}", report.warnings.len());
            }
        }

        if report.is_empty() {
            println!("{}No images were found in any subdirectories.", INFO);
            println!("   Make sure you have:");
            println!("   - Folders inside the 'input' directory");
            println!("   - Image files (.jpg, .png, .gif, etc.) inside those folders");
        }
    }

    fn print_plain_summary(&self, report: &ExtractionReport) {
        println!("COMPLETED: Image extraction");
        println!("Total extracted: {}", report.total_extracted);
        println!("Bytes copied: {}", report.total_bytes);
        println!("Duration: {:?}", report.extraction_duration);
        if report.files_failed > 0 {
            println!("Failed copies: {}", report.files_failed);
        }
        if !report.warnings.is_empty() {
            println!("Warnings: {}", report.warnings.len());
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum MessageType {
    Error,
    Warning,
}
