//! End-to-end picker interactions over scripted keys.
//!
//! # Oracle Pattern
//!
//! Tests end with oracle checks that verify:
//! - The returned selection matches the key script
//! - The surface was finished exactly once
//! - A frame was drawn before every key read

use std::io;

use tubetoonie_keys::{KeyError, KeyReader, NormalizedKey, ScriptedKeys};
use tubetoonie_select::{Driver, LineStyle, Picker, RenderedLine, render, select_many, select_one};

use NormalizedKey::{Down, Enter, EndOfInput, Escape, Other, Space, Up};

/// Driver over scripted keys that records every frame.
struct RecordingDriver {
    keys: ScriptedKeys,
    frames: Vec<Vec<RenderedLine>>,
    reads: usize,
    finished: usize,
    fail_reads_after: Option<usize>,
}

impl RecordingDriver {
    fn new(keys: impl IntoIterator<Item = NormalizedKey>) -> Self {
        Self {
            keys: ScriptedKeys::new(keys),
            frames: Vec::new(),
            reads: 0,
            finished: 0,
            fail_reads_after: None,
        }
    }

    fn active_text(&self) -> Option<String> {
        self.frames.last().and_then(|frame| {
            frame.iter().find(|line| line.style == LineStyle::Active).map(|line| line.text.clone())
        })
    }
}

impl Driver for RecordingDriver {
    type Error = KeyError;

    fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        assert_eq!(self.frames.len(), self.reads + 1, "frame must precede every read");
        if self.fail_reads_after == Some(self.reads) {
            return Err(KeyError::NoTerminal(io::Error::other("stdin is not a tty")));
        }
        self.reads += 1;
        self.keys.read_key()
    }

    fn render(&mut self, picker: &Picker) -> Result<(), KeyError> {
        self.frames.push(render(picker));
        Ok(())
    }

    fn finish(&mut self) -> Result<(), KeyError> {
        self.finished += 1;
        Ok(())
    }
}

#[test]
fn single_select_moves_then_confirms() {
    let mut driver = RecordingDriver::new([Down, Down, Enter]);
    let picked = select_one(&mut driver, "Pick", &["a", "b", "c"], 0);

    assert!(matches!(picked, Ok(Some(&"c"))));
    assert_eq!(driver.finished, 1);
    assert_eq!(driver.frames.len(), 3);
}

#[test]
fn single_select_escape_is_no_selection() {
    let mut driver = RecordingDriver::new([Escape]);
    let picked = select_one(&mut driver, "Pick", &["a", "b"], 0);

    assert!(matches!(picked, Ok(None)));
    assert_eq!(driver.finished, 1);
}

#[test]
fn single_select_honors_default_index() {
    let mut driver = RecordingDriver::new([Enter]);
    let picked = select_one(&mut driver, "Pick", &["a", "b", "c"], 1);

    assert!(matches!(picked, Ok(Some(&"b"))));
    assert_eq!(driver.active_text().as_deref(), Some("> b"));
}

#[test]
fn closed_input_cancels_instead_of_spinning() {
    let mut driver = RecordingDriver::new([Down]);
    let picked = select_one(&mut driver, "Pick", &["a", "b"], 0);

    assert!(matches!(picked, Ok(None)));
    assert_eq!(driver.reads, 2);
    assert_eq!(driver.finished, 1);
}

#[test]
fn unknown_keys_redraw_without_changing_state() {
    let mut driver = RecordingDriver::new([Down, Other, NormalizedKey::Left, Enter]);
    let picked = select_one(&mut driver, "Pick", &["a", "b", "c"], 0);

    assert!(matches!(picked, Ok(Some(&"b"))));
    assert_eq!(driver.frames[1], driver.frames[2]);
    assert_eq!(driver.frames[2], driver.frames[3]);
}

#[test]
fn empty_options_never_touch_the_driver() {
    let mut driver = RecordingDriver::new([Enter]);
    let none: [&str; 0] = [];

    assert!(matches!(select_one(&mut driver, "Pick", &none, 0), Ok(None)));
    assert!(matches!(select_many(&mut driver, "Pick", &none), Ok(None)));
    assert!(driver.frames.is_empty());
    assert_eq!(driver.finished, 0);
    assert_eq!(driver.keys.remaining(), 1);
}

#[test]
fn multi_select_returns_list_order() {
    let mut driver = RecordingDriver::new([Down, Down, Space, Up, Up, Space, Enter]);
    let chosen = select_many(&mut driver, "Targets", &["zero", "one", "two"]).ok().flatten();

    assert_eq!(chosen, Some(vec![&"zero", &"two"]));
    assert_eq!(driver.finished, 1);
}

#[test]
fn multi_select_confirmed_empty_differs_from_cancel() {
    let mut confirm = RecordingDriver::new([Enter]);
    let confirmed = select_many(&mut confirm, "Targets", &["a", "b"]).ok().flatten();
    assert_eq!(confirmed, Some(Vec::new()));

    let mut cancel = RecordingDriver::new([Escape]);
    let cancelled = select_many(&mut cancel, "Targets", &["a", "b"]);
    assert!(matches!(cancelled, Ok(None)));
}

#[test]
fn multi_select_cancel_discards_toggles() {
    let mut driver = RecordingDriver::new([Space, Down, Space, Escape]);
    let chosen = select_many(&mut driver, "Targets", &["a", "b"]);

    assert!(matches!(chosen, Ok(None)));
}

#[test]
fn read_failure_still_finishes_surface() {
    let mut driver = RecordingDriver::new([Down, Enter]);
    driver.fail_reads_after = Some(1);

    let picked = select_one(&mut driver, "Pick", &["a", "b"], 0);

    assert!(matches!(picked, Err(KeyError::NoTerminal(_))));
    assert_eq!(driver.finished, 1);
}
