//! Scoped raw-mode acquisition.
//!
//! The terminal's line discipline is process-wide state. It is only ever
//! changed through a [`RawModeScope`], which restores the saved mode exactly
//! once: on [`RawModeScope::release`], or on drop for every other exit path
//! (early return, `?`, unwinding panic).

use std::io;

use crate::KeyError;

/// Platform control over the input stream's mode.
pub trait TerminalMode {
    /// Whatever is needed to undo [`enter_raw`](Self::enter_raw).
    type Saved;

    /// Switch the stream to raw mode, returning the previous mode.
    ///
    /// Fails with [`KeyError::NoTerminal`] if the stream is not a terminal.
    fn enter_raw(&mut self) -> Result<Self::Saved, KeyError>;

    /// Put back a mode returned by [`enter_raw`](Self::enter_raw).
    fn restore(&mut self, saved: &Self::Saved) -> io::Result<()>;
}

/// Raw mode held for the lifetime of the value.
pub struct RawModeScope<'a, M: TerminalMode> {
    mode: &'a mut M,
    saved: Option<M::Saved>,
}

impl<'a, M: TerminalMode> RawModeScope<'a, M> {
    /// Enter raw mode.
    pub fn acquire(mode: &'a mut M) -> Result<Self, KeyError> {
        let saved = mode.enter_raw()?;
        Ok(Self { mode, saved: Some(saved) })
    }

    /// Restore the previous mode now and report the outcome.
    pub fn release(mut self) -> io::Result<()> {
        self.restore_once()
    }

    fn restore_once(&mut self) -> io::Result<()> {
        match self.saved.take() {
            Some(saved) => self.mode.restore(&saved),
            None => Ok(()),
        }
    }
}

impl<M: TerminalMode> Drop for RawModeScope<'_, M> {
    fn drop(&mut self) {
        // No recovery path exists here; the terminal stays in whatever mode it is in.
        if let Err(e) = self.restore_once() {
            tracing::warn!(error = %e, "failed to restore terminal mode");
        }
    }
}
