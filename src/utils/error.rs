use std::path::{Path, PathBuf};
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("File not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("Metadata extraction failed for {}: {message}", path.display())]
    Extraction { path: PathBuf, message: String },

    #[error("No analysable video stream in {}", path.display())]
    NoVideoStream { path: PathBuf },

    #[error("Validation error: {message}")]
    Validation { message: String },
}

impl Error {
    pub fn not_found<P: AsRef<Path>>(path: P) -> Self {
        Self::NotFound {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn extraction<P: AsRef<Path>, T: Into<String>>(path: P, message: T) -> Self {
        Self::Extraction {
            path: path.as_ref().to_path_buf(),
            message: message.into(),
        }
    }

    pub fn no_video_stream<P: AsRef<Path>>(path: P) -> Self {
        Self::NoVideoStream {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn validation<T: Into<String>>(message: T) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Short machine-readable tag, used in the JSON report.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "config",
            Self::Io(_) => "io",
            Self::Json(_) => "json",
            Self::NotFound { .. } => "not_found",
            Self::Extraction { .. } => "extraction",
            Self::NoVideoStream { .. } => "no_video_stream",
            Self::Validation { .. } => "validation",
        }
    }
}
