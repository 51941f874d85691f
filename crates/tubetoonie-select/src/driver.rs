//! Driver trait for abstracting picker I/O.
//!
//! The [`Driver`] trait decouples the interaction loop from the terminal.
//! The CLI implements it over the raw-mode key reader and a redrawing
//! surface; tests implement it over scripted keys and a frame log.

use tubetoonie_keys::NormalizedKey;

use crate::Picker;

/// Key input and drawing for one picker interaction.
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + 'static;

    /// Block until the next key.
    ///
    /// # Errors
    ///
    /// Returns an error only for a fatal input failure, such as having no
    /// interactive stream. Unrecognized input is [`NormalizedKey::Other`].
    fn read_key(&mut self) -> Result<NormalizedKey, Self::Error>;

    /// Draw `picker`, replacing the previous frame of this interaction.
    fn render(&mut self, picker: &Picker) -> Result<(), Self::Error>;

    /// The interaction is over; leave the surface ready for ordinary output.
    fn finish(&mut self) -> Result<(), Self::Error>;
}

impl<D: Driver + ?Sized> Driver for &mut D {
    type Error = D::Error;

    fn read_key(&mut self) -> Result<NormalizedKey, Self::Error> {
        (**self).read_key()
    }

    fn render(&mut self, picker: &Picker) -> Result<(), Self::Error> {
        (**self).render(picker)
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        (**self).finish()
    }
}
