//! Terminal driver for the pickers.

use std::io::Write;

use tubetoonie_keys::{KeyReader, NormalizedKey};
use tubetoonie_select::{Driver, Picker, render};

use crate::{CliError, FrameSurface};

/// Picker [`Driver`] reading keys from `R` and drawing on a [`FrameSurface`].
pub struct TerminalDriver<R, W: Write> {
    keys: R,
    surface: FrameSurface<W>,
}

impl<R: KeyReader, W: Write> TerminalDriver<R, W> {
    /// Create a driver.
    pub fn new(keys: R, surface: FrameSurface<W>) -> Self {
        Self { keys, surface }
    }

    /// Key source.
    pub fn keys(&self) -> &R {
        &self.keys
    }

    /// Drawing surface.
    pub fn surface(&self) -> &FrameSurface<W> {
        &self.surface
    }
}

impl<R: KeyReader, W: Write> Driver for TerminalDriver<R, W> {
    type Error = CliError;

    fn read_key(&mut self) -> Result<NormalizedKey, CliError> {
        Ok(self.keys.read_key()?)
    }

    fn render(&mut self, picker: &Picker) -> Result<(), CliError> {
        Ok(self.surface.draw(&render(picker))?)
    }

    fn finish(&mut self) -> Result<(), CliError> {
        Ok(self.surface.finish()?)
    }
}
