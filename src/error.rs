use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SocError {
    #[error("Input file does not exist: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("IO operation failed on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SocError {
    pub fn missing_input<P: AsRef<Path>>(path: P) -> Self {
        SocError::MissingInput {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn io<P: AsRef<Path>>(path: P, source: std::io::Error) -> Self {
        SocError::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            SocError::MissingInput { .. } => 1,
            SocError::Io { .. } => 1,
        }
    }
}

pub trait UserFriendlyError {
    fn user_message(&self) -> String;
    fn suggestion(&self) -> Option<String>;
}

impl UserFriendlyError for SocError {
    fn user_message(&self) -> String {
        match self {
            SocError::MissingInput { path } => {
                format!("The file '{}' does not exist.", path.display())
            }
            SocError::Io { path, source } => {
                format!("Unable to process files ({}): {}", path.display(), source)
            }
        }
    }

    fn suggestion(&self) -> Option<String> {
        match self {
            SocError::MissingInput { .. } => Some(
                "Check the path passed with --input; it must name a readable regular file.".to_string()
            ),
            SocError::Io { source, .. } => match source.kind() {
                std::io::ErrorKind::PermissionDenied => Some(
                    "Ensure you have read access to the input and write access to its directory.".to_string()
                ),
                std::io::ErrorKind::InvalidData => Some(
                    "The input must be UTF-8 encoded text.".to_string()
                ),
                _ => None,
            },
        }
    }
}

pub type Result<T> = std::result::Result<T, SocError>;
