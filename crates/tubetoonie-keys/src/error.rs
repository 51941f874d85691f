//! Key reader error types.

use std::io;

use thiserror::Error;

/// Errors from reading keys.
///
/// Unrecognized input is never an error; it is [`crate::NormalizedKey::Other`].
#[derive(Debug, Error)]
pub enum KeyError {
    /// No interactive terminal on the input stream.
    ///
    /// Fatal: a picker cannot work without one.
    #[error("no interactive terminal: {0}")]
    NoTerminal(#[source] io::Error),

    /// I/O error while reading the first byte of a keypress.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}
