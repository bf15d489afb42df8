use crate::error::{ExtractorError, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

pub const INPUT_DIR_NAME: &str = "input";
pub const OUTPUT_DIR_NAME: &str = "output";

/// Fixed directory layout around the program:
///
/// ```text
/// <project_root>/
///   <program dir>/image-extractor
///   input/
///   output/
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectLayout {
    pub project_root: PathBuf,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectLayout {
    pub fn new<P: Into<PathBuf>>(project_root: P) -> Self {
        let project_root = project_root.into();
        Self {
            input_dir: project_root.join(INPUT_DIR_NAME),
            output_dir: project_root.join(OUTPUT_DIR_NAME),
            project_root,
        }
    }

    /// Project root is the parent of the directory holding the running
    /// executable.
    pub fn from_executable() -> Result<Self> {
        let exe = std::env::current_exe()?;
        let exe = exe.canonicalize().unwrap_or(exe);
        Self::from_program_path(&exe)
    }

    pub fn from_program_path(program: &Path) -> Result<Self> {
        let program_dir = program.parent().ok_or_else(|| ExtractorError::InvalidPath {
            path: format!("Program has no parent directory: {}", program.display()),
        })?;

        let project_root = program_dir
            .parent()
            .ok_or_else(|| ExtractorError::InvalidPath {
                path: format!(
                    "Program directory has no parent: {}",
                    program_dir.display()
                ),
            })?;

        Ok(Self::new(project_root))
    }

    pub fn input_exists(&self) -> bool {
        self.input_dir.is_dir()
    }
}
