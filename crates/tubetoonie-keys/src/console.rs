//! Console key vocabulary (Windows `_getwch`).
//!
//! The console reader delivers discrete key events, so there is no timing
//! ambiguity: cursor keys arrive as a prefix unit followed by a scan code,
//! and Escape arrives on its own.

use std::io;

use crate::{KeyError, NormalizedKey};

/// `WEOF`, returned once the console input is closed.
pub const CONSOLE_EOF: u16 = 0xffff;

const ESCAPE_UNIT: u16 = 0x1b;
const BACKSPACE_UNIT: u16 = 0x08;
const CARRIAGE_RETURN_UNIT: u16 = 0x0d;
const LINE_FEED_UNIT: u16 = 0x0a;
const SPACE_UNIT: u16 = 0x20;

/// Prefixes announcing a scan code for function and cursor keys.
const EXTENDED_PREFIX: u16 = 0x00;
const EXTENDED_PREFIX_ALT: u16 = 0xe0;

const SCAN_UP: u16 = b'H' as u16;
const SCAN_DOWN: u16 = b'P' as u16;
const SCAN_LEFT: u16 = b'K' as u16;
const SCAN_RIGHT: u16 = b'M' as u16;

/// Blocking source of UTF-16 console units.
pub trait WideCharSource {
    /// Block until the next unit is available.
    fn read_unit(&mut self) -> io::Result<u16>;
}

/// Read one logical key from a console unit stream.
pub fn read_console_key<S>(source: &mut S) -> Result<NormalizedKey, KeyError>
where
    S: WideCharSource + ?Sized,
{
    let key = match source.read_unit()? {
        CONSOLE_EOF => NormalizedKey::EndOfInput,
        CARRIAGE_RETURN_UNIT | LINE_FEED_UNIT => NormalizedKey::Enter,
        ESCAPE_UNIT => NormalizedKey::Escape,
        SPACE_UNIT => NormalizedKey::Space,
        BACKSPACE_UNIT => NormalizedKey::Backspace,
        EXTENDED_PREFIX | EXTENDED_PREFIX_ALT => scan_code_key(source.read_unit()?),
        _ => NormalizedKey::Other,
    };

    tracing::trace!(?key, "console key read");
    Ok(key)
}

fn scan_code_key(code: u16) -> NormalizedKey {
    match code {
        SCAN_UP => NormalizedKey::Up,
        SCAN_DOWN => NormalizedKey::Down,
        SCAN_LEFT => NormalizedKey::Left,
        SCAN_RIGHT => NormalizedKey::Right,
        _ => NormalizedKey::Other,
    }
}
