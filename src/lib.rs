pub mod cli;
pub mod config;
pub mod error;
pub mod extractor;
pub mod layout;
pub mod scanner;
pub mod ui;

// Public API re-exports
pub use cli::{Cli, OutputFormat};
pub use config::{CliOverrides, Config, DisplayConfig};
pub use error::{ExtractorError, Result, UserFriendlyError};
pub use layout::ProjectLayout;

// Core functionality re-exports
pub use extractor::{
    ExtractedFile, ExtractionProgress, ExtractionReport, FolderSummary, ImageCopier,
    OutputManager,
};
pub use scanner::{FolderScanner, ImageFile, ImageFilter, SourceFolder, IMAGE_EXTENSIONS};
pub use ui::{GracefulShutdown, OutputFormatter, OutputMode, ProgressManager};

/// Main library interface: copies every image found below the input root
/// into the flat output root.
pub struct ImageExtractor {
    layout: ProjectLayout,
    config: Config,
    output_formatter: OutputFormatter,
    shutdown: GracefulShutdown,
}

impl ImageExtractor {
    /// Create an extractor and install the Ctrl+C handler
    pub fn new(layout: ProjectLayout, config: Config) -> Result<Self> {
        let shutdown = GracefulShutdown::install()?;
        Ok(Self::with_shutdown(layout, config, shutdown))
    }

    /// Create an extractor driven by an existing shutdown flag (no signal
    /// handler is installed)
    pub fn with_shutdown(layout: ProjectLayout, config: Config, shutdown: GracefulShutdown) -> Self {
        let output_formatter = OutputFormatter::new(
            OutputMode::from_string(&config.display.mode),
            config.display.verbose,
            config.display.quiet,
        );

        Self {
            layout,
            config,
            output_formatter,
            shutdown,
        }
    }

    /// Runs the extraction and reports the outcome as a success flag.
    ///
    /// A missing input directory is reported and yields `Ok(false)`. Any other
    /// failure, including an interrupt, is returned as an error. An interrupt
    /// that lands after the last copy still counts as `Cancelled`.
    pub fn run(&self) -> Result<bool> {
        match self.extract() {
            Ok(_) if !self.shutdown.is_running() => Err(ExtractorError::Cancelled),
            Ok(_) => Ok(true),
            Err(e @ ExtractorError::InputNotFound { .. }) => {
                self.output_formatter.print_user_friendly_error(&e);
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    /// Copies every image below the input root into the output root and
    /// returns the run report.
    pub fn extract(&self) -> Result<ExtractionReport> {
        self.extract_with_progress(|_| {})
    }

    /// Like [`extract`](Self::extract), calling `on_copied` after each
    /// successful copy.
    pub fn extract_with_progress<F>(&self, mut on_copied: F) -> Result<ExtractionReport>
    where
        F: FnMut(&ExtractedFile),
    {
        self.shutdown.check_shutdown()?;

        let output_manager = OutputManager::new(&self.layout.output_dir);
        output_manager.initialize()?;

        if !self.layout.input_exists() {
            return Err(ExtractorError::InputNotFound {
                path: self.layout.input_dir.display().to_string(),
            });
        }

        self.output_formatter.print_scan_start(&self.layout);
        self.output_formatter.debug(&format!(
            "Project root: {}",
            self.layout.project_root.display()
        ));

        let mut progress_manager = ProgressManager::new(self.show_progress());
        progress_manager.start_spinner("Scanning input directory");

        let mut progress = ExtractionProgress::new();
        let mut folders = Vec::new();
        let mut files = Vec::new();

        let result = self.extract_folders(
            &output_manager,
            &progress_manager,
            &mut progress,
            &mut folders,
            &mut files,
            &mut on_copied,
        );
        progress_manager.clear();
        result?;
        self.shutdown.check_shutdown()?;

        let report =
            output_manager.create_extraction_report(&self.layout, folders, files, &progress);
        self.output_formatter.print_extraction_summary(&report);

        Ok(report)
    }

    fn extract_folders(
        &self,
        output_manager: &OutputManager,
        progress_manager: &ProgressManager,
        progress: &mut ExtractionProgress,
        folders: &mut Vec<FolderSummary>,
        files: &mut Vec<ExtractedFile>,
        on_copied: &mut dyn FnMut(&ExtractedFile),
    ) -> Result<()> {
        let scanner = FolderScanner::new();
        let copier = ImageCopier::new(output_manager);
        let formatter = &self.output_formatter;

        for folder in scanner.folders(&self.layout.input_dir)? {
            self.shutdown.check_shutdown()?;

            let folder = match folder {
                Ok(folder) => folder,
                Err(e) => {
                    let message = format!("Skipping unreadable entry: {}", e);
                    progress_manager.suspend(|| formatter.warning(&message));
                    progress.add_warning(message);
                    continue;
                }
            };

            let name = folder.display_name();
            ui::progress::update_folder_progress(progress_manager.spinner(), &name, progress);
            progress_manager.suspend(|| {
                formatter.print_folder_start(&name);
                for error in &folder.errors {
                    formatter.warning(error);
                }
                for skipped in &folder.skipped {
                    formatter.print_skipped(skipped);
                }
            });
            for error in &folder.errors {
                progress.add_warning(error.clone());
            }

            let mut summary = FolderSummary {
                name: name.clone(),
                path: folder.path.display().to_string(),
                extracted: 0,
                failed: 0,
            };

            for image in &folder.images {
                self.shutdown.check_shutdown()?;

                match copier.copy_image(image, &folder.name) {
                    Ok(extracted) => {
                        progress_manager.suspend(|| {
                            formatter.print_file_copied(&image.filename, &extracted.destination_name)
                        });
                        progress.record_copy(extracted.destination_name.clone(), extracted.bytes);
                        ui::progress::update_file_progress(progress_manager.spinner(), progress);
                        summary.extracted += 1;
                        on_copied(&extracted);
                        files.push(extracted);
                    }
                    Err(e) => {
                        progress_manager.suspend(|| formatter.print_file_failed(&image.filename, &e));
                        progress.record_failure(e.to_string());
                        summary.failed += 1;
                    }
                }
            }

            progress_manager.suspend(|| formatter.print_folder_done(&name, summary.extracted));
            progress.finish_folder();
            folders.push(summary);
        }

        Ok(())
    }

    fn show_progress(&self) -> bool {
        self.config.display.show_progress
            && !self.config.display.quiet
            && self.output_formatter.mode() == OutputMode::Human
    }

    /// Generate sample configuration file
    pub fn generate_sample_config<P: AsRef<std::path::Path>>(output_path: P) -> Result<()> {
        let sample_config = Config::create_sample_config();
        std::fs::write(output_path.as_ref(), sample_config)?;
        Ok(())
    }

    pub fn output_formatter(&self) -> &OutputFormatter {
        &self.output_formatter
    }

    pub fn is_running(&self) -> bool {
        self.shutdown.is_running()
    }

    pub fn request_shutdown(&self) {
        self.shutdown.request_shutdown();
    }
}
