use crate::error::{ExtractorError, Result};
use crate::scanner::image_filter::ImageFilter;
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use walkdir::{DirEntry, WalkDir};

#[derive(Debug, Clone)]
pub struct ImageFile {
    pub source_path: PathBuf,
    pub filename: String,
    pub extension: String,
    pub size: u64,
    pub modified: SystemTime,
}

impl ImageFile {
    pub fn new(source_path: PathBuf, size: u64, modified: SystemTime) -> Self {
        let filename = source_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        let extension = source_path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            source_path,
            filename,
            extension,
            size,
            modified,
        }
    }
}

/// A directory below the input root. Its name prefixes the output name of
/// every image directly inside it.
#[derive(Debug, Clone)]
pub struct SourceFolder {
    pub path: PathBuf,
    pub name: OsString,
    pub images: Vec<ImageFile>,
    pub skipped: Vec<PathBuf>,
    pub errors: Vec<String>,
}

impl SourceFolder {
    pub fn display_name(&self) -> String {
        self.name.to_string_lossy().into_owned()
    }
}

pub struct FolderScanner {
    filter: ImageFilter,
}

impl FolderScanner {
    pub fn new() -> Self {
        Self {
            filter: ImageFilter::new(),
        }
    }

    /// Lazily yields every directory below `root` (the root itself excluded)
    /// in sorted depth-first order, each with the images it directly holds.
    /// Traversal errors come back as `Err` items; iteration continues past
    /// them.
    pub fn folders<'a>(
        &'a self,
        root: &Path,
    ) -> Result<impl Iterator<Item = Result<SourceFolder>> + 'a> {
        if !root.is_dir() {
            return Err(ExtractorError::InputNotFound {
                path: root.display().to_string(),
            });
        }

        let walker = WalkDir::new(root)
            .min_depth(1)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| entry.file_type().is_dir())
            .filter_map(move |entry| match entry {
                Ok(entry) => Some(self.scan_folder(&entry)),
                Err(err) => Some(Err(ExtractorError::Io(err.into()))),
            });

        Ok(walker)
    }

    fn scan_folder(&self, folder: &DirEntry) -> Result<SourceFolder> {
        let path = folder.path().to_path_buf();
        let name = folder.file_name().to_os_string();

        let mut images = Vec::new();
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        let entries = WalkDir::new(&path)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    errors.push(format!("Scan error: {}", err));
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let entry_path = entry.path();

            if !self.filter.is_image_file(entry_path) {
                skipped.push(entry_path.to_path_buf());
                continue;
            }

            // fs::metadata follows symlinks, so a link to a regular file counts.
            // An image that cannot be stat'ed is still listed; the copy reports it.
            match fs::metadata(entry_path) {
                Ok(metadata) if !metadata.is_file() => continue,
                Ok(metadata) => images.push(ImageFile::new(
                    entry_path.to_path_buf(),
                    metadata.len(),
                    metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
                )),
                Err(_) => images.push(ImageFile::new(
                    entry_path.to_path_buf(),
                    0,
                    SystemTime::UNIX_EPOCH,
                )),
            }
        }

        Ok(SourceFolder {
            path,
            name,
            images,
            skipped,
            errors,
        })
    }
}

impl Default for FolderScanner {
    fn default() -> Self {
        Self::new()
    }
}
