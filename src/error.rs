//! Error types shared by the loader, the registry and the dumper.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Boxed error produced by a format backend.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// No registered format matches the forced type or the file extension.
    #[error("no parser found for {}", describe_target(.path.as_deref(), .forced_type.as_deref()))]
    UnsupportedFormat { path: Option<PathBuf>, forced_type: Option<String> },

    #[error("failed to parse {} as {format}: {source}", describe_origin(.path.as_deref()))]
    Parse {
        path: Option<PathBuf>,
        format: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("invalid merge strategy given: '{0}' (expected replace, merge_dicts or merge_dicts_and_lists)")]
    InvalidStrategy(String),

    #[error("failed to read {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}: {source}", .path.display())]
    Dump {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize as {format}: {source}")]
    Serialize {
        format: &'static str,
        #[source]
        source: BoxError,
    },

    #[error("invalid glob pattern '{pattern}': {source}")]
    Pattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },
}

impl Error {
    pub(crate) fn unsupported(path: Option<&Path>, forced_type: Option<&str>) -> Self {
        Error::UnsupportedFormat {
            path: path.map(Path::to_path_buf),
            forced_type: forced_type.map(str::to_string),
        }
    }

    /// The file this error is about, if any.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Error::UnsupportedFormat { path, .. } | Error::Parse { path, .. } => path.as_deref(),
            Error::Load { path, .. } | Error::Dump { path, .. } => Some(path),
            Error::InvalidStrategy(_) | Error::Serialize { .. } | Error::Pattern { .. } => None,
        }
    }
}

fn describe_target(path: Option<&Path>, forced_type: Option<&str>) -> String {
    match (forced_type, path) {
        (Some(tag), _) => format!("given type: {tag}"),
        (None, Some(path)) => format!("given file: {}", path.display()),
        (None, None) => "content without a type".to_string(),
    }
}

fn describe_origin(path: Option<&Path>) -> String {
    match path {
        Some(path) => path.display().to_string(),
        None => "content".to_string(),
    }
}
