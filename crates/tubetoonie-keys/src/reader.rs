//! Key reader entry points.
//!
//! The platform variant is chosen here, once, at compile time for the host.
//! Everything above this module works with [`KeyReader`].

use crate::{EscapeTiming, KeyError, NormalizedKey};

#[cfg(unix)]
use crate::posix::Console as PlatformConsole;
#[cfg(windows)]
use crate::windows::Console as PlatformConsole;

#[cfg(not(any(unix, windows)))]
compile_error!("tubetoonie-keys supports unix and windows hosts only");

/// Source of normalized keys.
pub trait KeyReader {
    /// Block until one logical key is available.
    ///
    /// Returns [`NormalizedKey::EndOfInput`] once input is closed; callers
    /// should stop reading then.
    fn read_key(&mut self) -> Result<NormalizedKey, KeyError>;
}

impl<R: KeyReader + ?Sized> KeyReader for &mut R {
    fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        (**self).read_key()
    }
}

/// Key reader on the process's standard input.
///
/// Raw mode is acquired and released inside every
/// [`read_key`](KeyReader::read_key) call and never held between calls.
pub struct TerminalKeyReader {
    console: PlatformConsole,
}

impl TerminalKeyReader {
    /// Reader on stdin with the given escape timing.
    ///
    /// The timing only applies to raw byte streams; the Windows console
    /// reports keys without ambiguity.
    pub fn stdin(timing: EscapeTiming) -> Self {
        Self { console: PlatformConsole::stdin(timing) }
    }
}

impl KeyReader for TerminalKeyReader {
    fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        self.console.read_key()
    }
}
