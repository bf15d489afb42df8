pub mod file_extractor;
pub mod output_manager;

pub use file_extractor::{copy_with_metadata, ExtractionProgress, ImageCopier};
pub use output_manager::{ExtractedFile, ExtractionReport, FolderSummary, OutputManager};
