use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExtractorError {
    #[error("IO operation failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Input directory not found: {path}")]
    InputNotFound { path: String },

    #[error("Cannot prepare output directory {path}: {source}")]
    OutputDirectory {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to copy {file}: {source}")]
    Copy {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Path validation failed: {path}")]
    InvalidPath { path: String },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Operation was cancelled by user")]
    Cancelled,
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for ExtractorError {
    fn user_message(&self) -> String {
        match self {
            ExtractorError::InputNotFound { path } => {
                format!("Input directory not found: {}", path)
            }
            ExtractorError::OutputDirectory { path, source } => {
                format!("Cannot create output directory {}: {}", path, source)
            }
            ExtractorError::Copy { file, source } => {
                format!("Failed to copy {}: {}", file, source)
            }
            ExtractorError::InvalidPath { path } => {
                format!("Invalid file path: {}", path)
            }
            ExtractorError::Config { message } => {
                format!("Configuration error: {}", message)
            }
            ExtractorError::Cancelled => "Process interrupted by user".to_string(),
            _ => self.to_string(),
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            ExtractorError::InputNotFound { .. } => Some(
                "Create an 'input' directory next to the program's folder and put image folders inside it.".to_string()
            ),
            ExtractorError::OutputDirectory { .. } => Some(
                "Ensure you have write permission for the project directory.".to_string()
            ),
            ExtractorError::Config { .. } => Some(
                "Check your configuration file syntax, or regenerate it with --generate-config.".to_string()
            ),
            _ => None,
        }
    }
}

impl From<toml::de::Error> for ExtractorError {
    fn from(error: toml::de::Error) -> Self {
        ExtractorError::Config {
            message: error.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ExtractorError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_friendly_messages() {
        let error = ExtractorError::InputNotFound {
            path: "/tmp/project/input".to_string(),
        };
        assert!(error.user_message().contains("Input directory not found"));
        assert!(error.suggestion().is_some());

        assert_eq!(
            ExtractorError::Cancelled.user_message(),
            "Process interrupted by user"
        );
        assert!(ExtractorError::Cancelled.suggestion().is_none());
    }

    #[test]
    fn test_copy_error_names_file() {
        let error = ExtractorError::Copy {
            file: "photo.png".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let message = error.user_message();
        assert!(message.contains("photo.png"));
        assert!(message.contains("denied"));
    }

    #[test]
    fn test_toml_error_conversion() {
        let toml_error = toml::from_str::<toml::Value>("not = [valid").unwrap_err();
        let error = ExtractorError::from(toml_error);
        assert!(matches!(error, ExtractorError::Config { .. }));
    }
}
