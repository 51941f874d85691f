//! Normalized key vocabulary.

/// A single logical keypress.
///
/// Both platform readers map into this set, so consumers stay
/// platform-agnostic. Anything outside the vocabulary is [`Self::Other`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NormalizedKey {
    /// Up arrow.
    Up,
    /// Down arrow.
    Down,
    /// Left arrow.
    Left,
    /// Right arrow.
    Right,
    /// Enter/Return (carriage return or newline).
    Enter,
    /// A bare Escape press with nothing following it.
    Escape,
    /// Space bar.
    Space,
    /// Backspace or delete byte.
    Backspace,
    /// The input stream is closed. Callers should stop reading.
    EndOfInput,
    /// Unrecognized byte or escape sequence.
    Other,
}

impl NormalizedKey {
    /// Whether a picker should stop its interaction loop on this key
    /// without a confirmation.
    pub fn is_cancel(self) -> bool {
        matches!(self, Self::Escape | Self::EndOfInput)
    }
}
