//! Picker side-effects.

/// What the interaction loop must do after [`Picker::handle`](crate::Picker::handle).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerAction {
    /// Redraw the picker and read another key.
    Render,

    /// The user accepted the current state.
    Confirm,

    /// The user backed out, or input ended.
    Cancel,
}
