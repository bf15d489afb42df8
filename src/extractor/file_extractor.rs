use crate::error::{ExtractorError, Result};
use crate::extractor::output_manager::{ExtractedFile, OutputManager};
use crate::scanner::ImageFile;
use filetime::FileTime;
use std::ffi::OsStr;
use std::fs;
use std::path::Path;
use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct ExtractionProgress {
    pub files_extracted: usize,
    pub files_failed: usize,
    pub folders_processed: usize,
    pub bytes_copied: u64,
    pub current_file: Option<String>,
    pub start_time: Instant,
    /// Per-file copy failures
    pub errors: Vec<String>,
    /// Traversal problems that did not involve an image copy
    pub warnings: Vec<String>,
}

impl ExtractionProgress {
    pub fn new() -> Self {
        Self {
            files_extracted: 0,
            files_failed: 0,
            folders_processed: 0,
            bytes_copied: 0,
            current_file: None,
            start_time: Instant::now(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn record_copy(&mut self, filename: String, bytes: u64) {
        self.files_extracted += 1;
        self.bytes_copied += bytes;
        self.current_file = Some(filename);
    }

    pub fn record_failure<S: Into<String>>(&mut self, error: S) {
        self.files_failed += 1;
        self.errors.push(error.into());
    }

    pub fn add_warning<S: Into<String>>(&mut self, warning: S) {
        self.warnings.push(warning.into());
    }

    pub fn finish_folder(&mut self) {
        self.folders_processed += 1;
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl Default for ExtractionProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Copies images into the output directory under collision-free names,
/// carrying permissions and timestamps over from the source.
pub struct ImageCopier<'a> {
    output: &'a OutputManager,
}

impl<'a> ImageCopier<'a> {
    pub fn new(output: &'a OutputManager) -> Self {
        Self { output }
    }

    pub fn copy_image(&self, image: &ImageFile, folder_name: &OsStr) -> Result<ExtractedFile> {
        let destination = self
            .output
            .resolve_destination(folder_name, &image.source_path)?;

        let bytes = copy_with_metadata(&image.source_path, &destination).map_err(|e| {
            ExtractorError::Copy {
                file: image.filename.clone(),
                source: e,
            }
        })?;

        let destination_name = destination
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(ExtractedFile {
            source: image.source_path.display().to_string(),
            destination_name,
            bytes,
        })
    }
}

/// Copies file content and permission bits, then applies the source's access
/// and modification times to the copy.
pub fn copy_with_metadata(source: &Path, dest: &Path) -> std::io::Result<u64> {
    let bytes = fs::copy(source, dest)?;

    let metadata = fs::metadata(source)?;
    let atime = FileTime::from_last_access_time(&metadata);
    let mtime = FileTime::from_last_modification_time(&metadata);
    filetime::set_file_times(dest, atime, mtime)?;

    Ok(bytes)
}
