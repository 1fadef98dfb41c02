//! Build error types.
//!
//! Every variant is fatal to the build and names the file that caused it.

use std::path::PathBuf;
use thiserror::Error;

pub type Result<T, E = BuildError> = std::result::Result<T, E>;

/// Errors raised by the build pipeline.
#[derive(Debug, Error)]
pub enum BuildError {
    /// Malformed content metadata (front-matter, dates, duplicate slugs).
    #[error("parse error in `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    /// A content unit references a layout outside the configured set.
    #[error("layout `{layout}` not found (referenced by `{path}`)")]
    LayoutNotFound { path: PathBuf, layout: String },

    /// Bad pagination size, missing key, malformed config file.
    #[error("invalid configuration in `{path}`: {message}")]
    InvalidConfiguration { path: PathBuf, message: String },

    #[error("IO error at `{0}`")]
    Io(PathBuf, #[source] std::io::Error),
}

impl BuildError {
    pub fn parse(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::Parse {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn invalid_config(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            path: path.into(),
            message: message.into(),
        }
    }

    pub fn layout_not_found(path: impl Into<PathBuf>, layout: impl Into<String>) -> Self {
        Self::LayoutNotFound {
            path: path.into(),
            layout: layout.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        Self::Io(path.into(), err)
    }

    /// Path of the file the error is about.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::Parse { path, .. }
            | Self::LayoutNotFound { path, .. }
            | Self::InvalidConfiguration { path, .. }
            | Self::Io(path, _) => path,
        }
    }
}
