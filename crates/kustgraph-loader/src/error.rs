//! Error types for reading overlay directories.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using LoaderError.
pub type Result<T> = std::result::Result<T, LoaderError>;

/// Errors that can occur while loading a directory's manifest or contents.
#[derive(Error, Debug)]
pub enum LoaderError {
    /// None of the recognised manifest file names exist in the directory.
    #[error("no kustomization file found in '{dir}'")]
    ManifestNotFound { dir: PathBuf },

    /// More than one recognised manifest file name exists in the directory.
    #[error("found more than one kustomization file in '{dir}': {}", .names.join(", "))]
    ManifestAmbiguous { dir: PathBuf, names: Vec<String> },

    /// The manifest exists but does not decode into a [`Manifest`](crate::Manifest).
    #[error("could not decode kustomization file '{path}'")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    /// Failed to list a directory.
    #[error("could not read directory '{path}'")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read a file.
    #[error("could not read file '{path}'")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A relative path could not be made absolute.
    #[error("could not resolve '{path}' to an absolute path")]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl LoaderError {
    pub fn directory_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::DirectoryRead {
            path: path.into(),
            source,
        }
    }

    pub fn file_read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.into(),
            source,
        }
    }
}
