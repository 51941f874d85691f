//! Windows console: crossterm raw mode and `_getwch` key events.

#![allow(unsafe_code)]

use std::io;

use crossterm::terminal::{disable_raw_mode, enable_raw_mode, is_raw_mode_enabled};

use crate::{
    EscapeTiming, KeyError, NormalizedKey, RawModeScope, TerminalMode, WideCharSource,
    read_console_key,
};

unsafe extern "C" {
    /// CRT console read: one UTF-16 unit, no echo, no line buffering.
    fn _getwch() -> u16;
}

/// Console-mode key reader.
pub(crate) struct Console {
    mode: ConsoleMode,
    source: Getwch,
}

impl Console {
    pub(crate) fn stdin(_timing: EscapeTiming) -> Self {
        Self { mode: ConsoleMode, source: Getwch }
    }

    pub(crate) fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        let _raw = RawModeScope::acquire(&mut self.mode)?;
        read_console_key(&mut self.source)
    }
}

/// Console input mode via crossterm.
struct ConsoleMode;

impl TerminalMode for ConsoleMode {
    /// Whether this scope switched raw mode on.
    type Saved = bool;

    fn enter_raw(&mut self) -> Result<bool, KeyError> {
        if is_raw_mode_enabled().map_err(KeyError::NoTerminal)? {
            return Ok(false);
        }
        enable_raw_mode().map_err(KeyError::NoTerminal)?;
        Ok(true)
    }

    fn restore(&mut self, enabled_here: &bool) -> io::Result<()> {
        if *enabled_here { disable_raw_mode() } else { Ok(()) }
    }
}

struct Getwch;

impl WideCharSource for Getwch {
    fn read_unit(&mut self) -> io::Result<u16> {
        // SAFETY: `_getwch` takes no arguments and blocks until a unit is read.
        Ok(unsafe { _getwch() })
    }
}
