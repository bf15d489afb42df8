use std::path::Path;

/// Extensions recognised as images, lowercase and without the leading dot.
pub const IMAGE_EXTENSIONS: [&str; 8] = ["jpg", "jpeg", "png", "gif", "bmp", "tiff", "tif", "webp"];

/// Extension-based image detection. File contents are never inspected.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageFilter;

impl ImageFilter {
    pub fn new() -> Self {
        Self
    }

    pub fn is_image_file(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|s| s.to_str())
            .is_some_and(is_image_extension)
    }
}

pub fn is_image_extension(extension: &str) -> bool {
    let ext_lower = extension.to_lowercase();
    IMAGE_EXTENSIONS.contains(&ext_lower.as_str())
}
