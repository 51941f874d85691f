//! Media error types.

use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;

/// Errors from fetching media.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The extraction tool could not be started.
    #[error("could not start {program}: {source}")]
    Spawn {
        /// Program that was invoked.
        program: String,
        /// Underlying error.
        #[source]
        source: io::Error,
    },

    /// The extraction tool reported a network or extraction failure.
    #[error("download failed ({status}): {message}")]
    Download {
        /// Exit status of the tool.
        status: ExitStatus,
        /// Last diagnostic the tool printed.
        message: String,
    },

    /// The tool succeeded but no audio file can be found.
    #[error("download finished but no MP3 was found in {}", dir.display())]
    MissingOutput {
        /// Directory that was searched.
        dir: PathBuf,
    },

    /// Local I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Errors from uploading media.
#[derive(Debug, Error)]
pub enum UploadError {
    /// The file to upload does not exist.
    #[error("audio file not found: {}", .0.display())]
    MissingFile(PathBuf),

    /// No cloud backend is linked into this build.
    #[error("cloud upload is not available: {0}")]
    Unavailable(String),

    /// The backend refused the upload.
    #[error("upload to {target} rejected: {message}")]
    Rejected {
        /// Target the upload was meant for.
        target: String,
        /// Backend explanation.
        message: String,
    },

    /// Local I/O failed.
    #[error(transparent)]
    Io(#[from] io::Error),
}
