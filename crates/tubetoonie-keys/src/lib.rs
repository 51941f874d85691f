//! Keyboard input for the interactive pickers.
//!
//! Reads one logical keypress at a time from the terminal and normalizes it
//! into a small, closed vocabulary. Upper layers never see raw bytes or
//! platform key codes.
//!
//! # Components
//!
//! - [`NormalizedKey`]: the key vocabulary
//! - [`classify`]: pure classifier for the bytes that follow an escape byte
//! - [`read_key_from`]: the key-read protocol over any [`ByteSource`]
//! - [`RawModeScope`]: scoped raw-mode acquisition over any [`TerminalMode`]
//! - [`TerminalKeyReader`]: the host-platform [`KeyReader`]

#![deny(missing_docs)]

mod console;
mod error;
mod escape;
mod key;
mod reader;
mod scope;
mod scripted;
mod source;
mod timing;

#[cfg(unix)]
mod posix;
#[cfg(windows)]
mod windows;

pub use console::{CONSOLE_EOF, WideCharSource, read_console_key};
pub use error::KeyError;
pub use escape::{ESCAPE_BYTE, MAX_ESCAPE_SEQUENCE_LEN, classify};
pub use key::NormalizedKey;
pub use reader::{KeyReader, TerminalKeyReader};
pub use scope::{RawModeScope, TerminalMode};
pub use scripted::ScriptedKeys;
pub use source::{ByteSource, read_key_from};
pub use timing::EscapeTiming;
