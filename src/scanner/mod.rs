pub mod folder_scanner;
pub mod image_filter;

pub use folder_scanner::{FolderScanner, ImageFile, SourceFolder};
pub use image_filter::{ImageFilter, IMAGE_EXTENSIONS};
