//! Fuzz target for the key-read protocol over adversarial byte streams
//!
//! # Strategy
//!
//! - Arbitrary bytes, with arbitrary silences between them
//! - Read and poll failures at arbitrary points
//!
//! # Invariants
//!
//! - Every read terminates and consumes at least one byte or ends input
//! - One escape read consumes at most the escape byte plus the capped tail
//! - Only a failure on the first byte is an error
//! - NEVER panic

#![no_main]

use std::{collections::VecDeque, io, time::Duration};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use tubetoonie_keys::{
    ByteSource, ESCAPE_BYTE, EscapeTiming, MAX_ESCAPE_SEQUENCE_LEN, NormalizedKey, read_key_from,
};

#[derive(Debug, Clone, Arbitrary)]
enum Step {
    Byte(u8),
    Escape,
    Silence,
    Fail,
}

struct Scripted {
    steps: VecDeque<Step>,
    consumed: usize,
}

impl ByteSource for Scripted {
    fn read_byte(&mut self) -> io::Result<Option<u8>> {
        loop {
            match self.steps.pop_front() {
                None => return Ok(None),
                Some(Step::Silence) => {},
                Some(Step::Fail) => return Err(io::Error::other("injected")),
                Some(Step::Byte(b)) => {
                    self.consumed += 1;
                    return Ok(Some(b));
                },
                Some(Step::Escape) => {
                    self.consumed += 1;
                    return Ok(Some(ESCAPE_BYTE));
                },
            }
        }
    }

    fn poll_byte(&mut self, _timeout: Duration) -> io::Result<bool> {
        match self.steps.front() {
            None => Ok(true),
            Some(Step::Silence) => {
                self.steps.pop_front();
                Ok(false)
            },
            Some(Step::Fail) => {
                self.steps.pop_front();
                Err(io::Error::other("injected"))
            },
            Some(_) => Ok(true),
        }
    }
}

fuzz_target!(|steps: Vec<Step>| {
    let mut source = Scripted { steps: steps.into(), consumed: 0 };
    let timing = EscapeTiming::default();

    loop {
        let before = (source.steps.len(), source.consumed);
        match read_key_from(&mut source, &timing) {
            Ok(NormalizedKey::EndOfInput) => break,
            Ok(_) => {
                assert!(source.consumed > before.1);
                assert!(source.consumed - before.1 <= 1 + MAX_ESCAPE_SEQUENCE_LEN);
            },
            Err(_) => assert!(source.steps.len() < before.0),
        }
    }
});
