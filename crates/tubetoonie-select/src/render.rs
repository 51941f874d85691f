//! Abstract picker frame.
//!
//! Surfaces decide colors and cursor movement; this module decides what the
//! lines say.

use crate::Picker;

/// Key hint under a single-select list.
pub const SINGLE_HINT: &str = "↑/↓ to move, Enter to select, Esc to cancel";

/// Key hint under a multi-select list.
pub const MULTI_HINT: &str = "↑/↓ to move, Space to toggle, Enter to confirm, Esc to cancel";

/// Emphasis class of a frame line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineStyle {
    /// The prompt.
    Title,
    /// An option not under the cursor.
    Option,
    /// The option under the cursor.
    Active,
    /// The key hint.
    Hint,
}

/// One line of a picker frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedLine {
    /// Text without trailing newline.
    pub text: String,
    /// How the surface should emphasize it.
    pub style: LineStyle,
}

impl RenderedLine {
    fn new(text: impl Into<String>, style: LineStyle) -> Self {
        Self { text: text.into(), style }
    }
}

/// Full frame for `picker`: prompt, one line per option, then the hint.
pub fn render(picker: &Picker) -> Vec<RenderedLine> {
    let mut lines = Vec::with_capacity(picker.options().len() + 2);
    lines.push(RenderedLine::new(picker.prompt(), LineStyle::Title));

    for (index, label) in picker.options().iter().enumerate() {
        let active = index == picker.cursor();
        let pointer = if active { '>' } else { ' ' };
        let text = if picker.is_multi() {
            let mark = if picker.is_chosen(index) { 'x' } else { ' ' };
            format!("{pointer} [{mark}] {label}")
        } else {
            format!("{pointer} {label}")
        };
        let style = if active { LineStyle::Active } else { LineStyle::Option };
        lines.push(RenderedLine { text, style });
    }

    let hint = if picker.is_multi() { MULTI_HINT } else { SINGLE_HINT };
    lines.push(RenderedLine::new(hint, LineStyle::Hint));
    lines
}
