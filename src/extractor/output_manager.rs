use crate::error::{ExtractorError, Result};
use crate::extractor::ExtractionProgress;
use crate::layout::ProjectLayout;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractionReport {
    pub input_dir: String,
    pub output_dir: String,
    pub folders: Vec<FolderSummary>,
    pub files: Vec<ExtractedFile>,
    pub total_extracted: usize,
    pub files_failed: usize,
    pub total_bytes: u64,
    pub extraction_duration: Duration,
    pub extraction_time: DateTime<Utc>,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
}

impl ExtractionReport {
    pub fn is_empty(&self) -> bool {
        self.total_extracted == 0
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FolderSummary {
    pub name: String,
    pub path: String,
    pub extracted: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExtractedFile {
    pub source: String,
    pub destination_name: String,
    pub bytes: u64,
}

/// Owns the flat output directory and decides names inside it.
pub struct OutputManager {
    output_directory: PathBuf,
}

impl OutputManager {
    pub fn new<P: Into<PathBuf>>(output_directory: P) -> Self {
        Self {
            output_directory: output_directory.into(),
        }
    }

    /// Creates the output directory if it is missing. Existing contents are
    /// left untouched.
    pub fn initialize(&self) -> Result<()> {
        fs::create_dir_all(&self.output_directory).map_err(|e| {
            ExtractorError::OutputDirectory {
                path: self.output_directory.display().to_string(),
                source: e,
            }
        })
    }

    pub fn get_output_directory(&self) -> &Path {
        &self.output_directory
    }

    /// Picks a destination for `source` found in folder `folder_name`:
    /// `{folder}_{file}`, or `{folder}_{stem}_{n}{ext}` with the first free
    /// `n >= 1`. The check is not atomic; callers must not run concurrently
    /// against the same directory.
    pub fn resolve_destination(&self, folder_name: &OsStr, source: &Path) -> Result<PathBuf> {
        let file_name = source.file_name().ok_or_else(|| ExtractorError::InvalidPath {
            path: format!("Source has no file name: {}", source.display()),
        })?;

        let mut destination = self
            .output_directory
            .join(prefixed_file_name(folder_name, file_name));

        let mut counter: u64 = 1;
        while destination.exists() {
            destination = self
                .output_directory
                .join(numbered_file_name(folder_name, source, counter));
            counter += 1;
        }

        Ok(destination)
    }

    pub fn create_extraction_report(
        &self,
        layout: &ProjectLayout,
        folders: Vec<FolderSummary>,
        files: Vec<ExtractedFile>,
        progress: &ExtractionProgress,
    ) -> ExtractionReport {
        ExtractionReport {
            input_dir: layout.input_dir.display().to_string(),
            output_dir: self.output_directory.display().to_string(),
            folders,
            files,
            total_extracted: progress.files_extracted,
            files_failed: progress.files_failed,
            total_bytes: progress.bytes_copied,
            extraction_duration: progress.elapsed(),
            extraction_time: Utc::now(),
            errors: progress.errors.clone(),
            warnings: progress.warnings.clone(),
        }
    }
}

pub fn prefixed_file_name(folder_name: &OsStr, file_name: &OsStr) -> OsString {
    let mut name = OsString::from(folder_name);
    name.push("_");
    name.push(file_name);
    name
}

pub fn numbered_file_name(folder_name: &OsStr, source: &Path, counter: u64) -> OsString {
    let mut name = OsString::from(folder_name);
    name.push("_");
    name.push(source.file_stem().unwrap_or_default());
    name.push(format!("_{}", counter));
    if let Some(ext) = source.extension() {
        name.push(".");
        name.push(ext);
    }
    name
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prefixed_and_numbered_names() {
        let folder = OsStr::new("catA");
        assert_eq!(
            prefixed_file_name(folder, OsStr::new("x.png")),
            OsString::from("catA_x.png")
        );
        assert_eq!(
            numbered_file_name(folder, Path::new("/in/catA/x.png"), 1),
            OsString::from("catA_x_1.png")
        );
        assert_eq!(
            numbered_file_name(folder, Path::new("/in/catA/shot.final.JPG"), 12),
            OsString::from("catA_shot.final_12.JPG")
        );
    }

    #[test]
    fn test_output_directory_initialization_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let manager = OutputManager::new(temp_dir.path().join("output"));

        manager.initialize().unwrap();
        fs::write(manager.get_output_directory().join("keep.png"), "png").unwrap();
        manager.initialize().unwrap();

        assert!(manager.get_output_directory().join("keep.png").exists());
    }

    #[test]
    fn test_initialize_fails_when_output_is_a_file() {
        let temp_dir = TempDir::new().unwrap();
        let output = temp_dir.path().join("output");
        fs::write(&output, "occupied").unwrap();

        let manager = OutputManager::new(&output);
        assert!(matches!(
            manager.initialize(),
            Err(ExtractorError::OutputDirectory { .. })
        ));
    }

    #[test]
    fn test_resolve_destination_without_collision() {
        let temp_dir = TempDir::new().unwrap();
        let manager = OutputManager::new(temp_dir.path());

        let dest = manager
            .resolve_destination(OsStr::new("catA"), Path::new("/in/catA/x.png"))
            .unwrap();
        assert_eq!(dest, temp_dir.path().join("catA_x.png"));
    }

    #[test]
    fn test_resolve_destination_counts_past_taken_names() {
        let temp_dir = TempDir::new().unwrap();
        let manager = OutputManager::new(temp_dir.path());
        fs::write(temp_dir.path().join("catA_x.png"), "0").unwrap();
        fs::write(temp_dir.path().join("catA_x_1.png"), "1").unwrap();

        let dest = manager
            .resolve_destination(OsStr::new("catA"), Path::new("/in/catA/x.png"))
            .unwrap();
        assert_eq!(dest, temp_dir.path().join("catA_x_2.png"));
    }

    #[test]
    fn test_extraction_report_creation() {
        let temp_dir = TempDir::new().unwrap();
        let layout = ProjectLayout::new(temp_dir.path());
        let manager = OutputManager::new(&layout.output_dir);

        let mut progress = ExtractionProgress::new();
        progress.record_copy("x.png".to_string(), 300);
        progress.record_failure("Failed to copy y.png: denied");
        progress.add_warning("Scan error: permission denied");

        let folders = vec![FolderSummary {
            name: "catA".to_string(),
            path: layout.input_dir.join("catA").display().to_string(),
            extracted: 1,
            failed: 1,
        }];
        let files = vec![ExtractedFile {
            source: "catA/x.png".to_string(),
            destination_name: "catA_x.png".to_string(),
            bytes: 300,
        }];

        let report = manager.create_extraction_report(&layout, folders, files, &progress);

        assert_eq!(report.total_extracted, 1);
        assert_eq!(report.total_bytes, 300);
        assert_eq!(report.files_failed, 1);
        assert_eq!(report.errors.len(), 1);
        assert_eq!(report.warnings.len(), 1);
        assert!(!report.is_empty());

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("catA_x.png"));
    }
}
