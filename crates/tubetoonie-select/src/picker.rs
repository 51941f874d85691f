//! Picker state machine.
//!
//! Consumes [`NormalizedKey`]s and produces [`PickerAction`]s. No I/O.
//!
//! # Invariants
//!
//! - The option list is never empty; constructors refuse empty lists.
//! - `cursor < options.len()` at all times.
//! - Every chosen index is `< options.len()`.
//! - Once confirmed or cancelled, the picker ignores further keys.

use std::collections::BTreeSet;

use tubetoonie_keys::NormalizedKey;

use crate::PickerAction;

/// Lifecycle of one interaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickerState {
    /// Waiting for keys.
    Active,
    /// Enter was pressed.
    Confirmed,
    /// Escape was pressed or input ended.
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Mode {
    Single,
    /// Chosen indices, kept ordered so results come out in list order.
    Multi(BTreeSet<usize>),
}

/// Selection state over a non-empty list of option labels.
#[derive(Debug, Clone)]
pub struct Picker {
    prompt: String,
    options: Vec<String>,
    cursor: usize,
    mode: Mode,
    state: PickerState,
}

impl Picker {
    /// Single-select picker with the cursor on `default_index`.
    ///
    /// `default_index` is clamped into range. Returns `None` for an empty
    /// option list.
    pub fn single(
        prompt: impl Into<String>,
        options: Vec<String>,
        default_index: usize,
    ) -> Option<Self> {
        let last = options.len().checked_sub(1)?;
        Some(Self {
            prompt: prompt.into(),
            options,
            cursor: default_index.min(last),
            mode: Mode::Single,
            state: PickerState::Active,
        })
    }

    /// Multi-select picker with nothing chosen and the cursor on the first
    /// option.
    ///
    /// Returns `None` for an empty option list.
    pub fn multi(prompt: impl Into<String>, options: Vec<String>) -> Option<Self> {
        if options.is_empty() {
            return None;
        }
        Some(Self {
            prompt: prompt.into(),
            options,
            cursor: 0,
            mode: Mode::Multi(BTreeSet::new()),
            state: PickerState::Active,
        })
    }

    /// Process a key and return what the loop should do next.
    pub fn handle(&mut self, key: NormalizedKey) -> PickerAction {
        match self.state {
            PickerState::Confirmed => return PickerAction::Confirm,
            PickerState::Cancelled => return PickerAction::Cancel,
            PickerState::Active => {},
        }

        match key {
            NormalizedKey::Up => {
                self.cursor = self.cursor.checked_sub(1).unwrap_or(self.options.len() - 1);
                PickerAction::Render
            },
            NormalizedKey::Down => {
                self.cursor = (self.cursor + 1) % self.options.len();
                PickerAction::Render
            },
            NormalizedKey::Space => {
                if let Mode::Multi(chosen) = &mut self.mode
                    && !chosen.remove(&self.cursor)
                {
                    chosen.insert(self.cursor);
                }
                PickerAction::Render
            },
            NormalizedKey::Enter => {
                self.state = PickerState::Confirmed;
                tracing::debug!(cursor = self.cursor, "picker confirmed");
                PickerAction::Confirm
            },
            _ if key.is_cancel() => {
                self.state = PickerState::Cancelled;
                tracing::debug!(?key, "picker cancelled");
                PickerAction::Cancel
            },
            // Left, Right, Backspace, Other
            _ => PickerAction::Render,
        }
    }

    /// Prompt shown above the options.
    pub fn prompt(&self) -> &str {
        &self.prompt
    }

    /// Option labels in list order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// Index of the highlighted option.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Current lifecycle state.
    pub fn state(&self) -> PickerState {
        self.state
    }

    /// Whether this picker allows several options.
    pub fn is_multi(&self) -> bool {
        matches!(self.mode, Mode::Multi(_))
    }

    /// Whether option `index` is in the chosen set. Always `false` for
    /// single-select.
    pub fn is_chosen(&self, index: usize) -> bool {
        match &self.mode {
            Mode::Single => false,
            Mode::Multi(chosen) => chosen.contains(&index),
        }
    }

    /// Chosen indices in ascending order.
    pub fn chosen(&self) -> Vec<usize> {
        match &self.mode {
            Mode::Single => Vec::new(),
            Mode::Multi(chosen) => chosen.iter().copied().collect(),
        }
    }

    /// Label under the cursor.
    pub fn current_option(&self) -> &str {
        &self.options[self.cursor]
    }
}
