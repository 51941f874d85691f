//! Fuzz target for extraction tool output parsing
//!
//! # Invariants
//!
//! - Arbitrary tool output never panics the parser
//! - Parsed percentages stay within 0..=100

#![no_main]

use libfuzzer_sys::fuzz_target;
use tubetoonie_media::{ProgressEvent, parse_percent, parse_progress_line};

fuzz_target!(|text: &str| {
    for line in text.lines() {
        if let Some(ProgressEvent::Downloading(progress)) = parse_progress_line(line) {
            if let Some(percent) = progress.percent_value() {
                assert!((0.0..=100.0).contains(&percent));
            }
        }
    }
    if let Some(percent) = parse_percent(text) {
        assert!((0.0..=100.0).contains(&percent));
    }
});
