//! Shell errors and exit codes.

use std::io;

use thiserror::Error;
use tubetoonie_keys::KeyError;
use tubetoonie_media::UploadError;

/// How a shell run ended without an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The command completed.
    Done,
    /// The user backed out of a menu.
    Quit,
    /// Some downloads failed; the rest were saved.
    DownloadsFailed(usize),
}

impl Outcome {
    /// Process exit code.
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Done | Self::Quit => 0,
            Self::DownloadsFailed(_) => 2,
        }
    }
}

/// Shell errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The user supplied unusable input.
    #[error("Input error: {0}")]
    Input(String),

    /// The key reader failed, e.g. stdin is not a terminal.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// An upload could not be attempted.
    #[error(transparent)]
    Upload(#[from] UploadError),

    /// Terminal or file I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

impl CliError {
    /// Process exit code.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Input(_) => 1,
            Self::Io(e) if e.kind() == io::ErrorKind::Interrupted => 130,
            Self::Key(_) | Self::Upload(_) | Self::Io(_) => 3,
        }
    }
}
