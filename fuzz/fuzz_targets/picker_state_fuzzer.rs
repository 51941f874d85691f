//! Fuzz target for the picker state machine
//!
//! # Invariants
//!
//! - Cursor always within the option list
//! - Chosen set always within the list and ascending
//! - Exactly one highlighted line per frame
//! - A terminal state never changes again

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tubetoonie_keys::NormalizedKey;
use tubetoonie_select::{LineStyle, Picker, PickerState, render};

#[derive(Debug, Clone, Copy, Arbitrary)]
enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Escape,
    Space,
    Backspace,
    EndOfInput,
    Other,
}

impl From<Key> for NormalizedKey {
    fn from(key: Key) -> Self {
        match key {
            Key::Up => Self::Up,
            Key::Down => Self::Down,
            Key::Left => Self::Left,
            Key::Right => Self::Right,
            Key::Enter => Self::Enter,
            Key::Escape => Self::Escape,
            Key::Space => Self::Space,
            Key::Backspace => Self::Backspace,
            Key::EndOfInput => Self::EndOfInput,
            Key::Other => Self::Other,
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    multi: bool,
    option_count: u8,
    default_index: u8,
    keys: Vec<Key>,
}

fuzz_target!(|input: Input| {
    let options: Vec<String> = (0..input.option_count).map(|i| format!("option {i}")).collect();
    let picker = if input.multi {
        Picker::multi("fuzz", options.clone())
    } else {
        Picker::single("fuzz", options.clone(), usize::from(input.default_index))
    };

    let Some(mut picker) = picker else {
        assert!(options.is_empty());
        return;
    };

    let mut settled: Option<PickerState> = None;
    for key in input.keys {
        picker.handle(key.into());

        assert!(picker.cursor() < options.len());
        let chosen = picker.chosen();
        assert!(chosen.iter().all(|&i| i < options.len()));
        assert!(chosen.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(render(&picker).iter().filter(|l| l.style == LineStyle::Active).count(), 1);

        match settled {
            Some(state) => assert_eq!(picker.state(), state),
            None if picker.state() != PickerState::Active => settled = Some(picker.state()),
            None => {},
        }
    }
});
