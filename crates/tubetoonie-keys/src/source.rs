//! Key-read protocol over a byte stream.
//!
//! One call reads one logical key. An escape byte starts the disambiguation
//! protocol: wait up to [`EscapeTiming::first_byte`] for anything to follow,
//! then drain further bytes with the shorter [`EscapeTiming::inter_byte`]
//! until the sequence is complete, the stream goes quiet, or
//! [`MAX_ESCAPE_SEQUENCE_LEN`] bytes are buffered. Keys typed after a
//! complete sequence stay in the stream. The buffered tail goes to
//! [`classify`].

use std::{io, time::Duration};

use crate::{
    EscapeTiming, KeyError, NormalizedKey,
    escape::{ESCAPE_BYTE, MAX_ESCAPE_SEQUENCE_LEN, classify, is_complete},
};

/// DEL, sent by most terminals for the backspace key.
const DELETE_BYTE: u8 = 0x7f;

/// BS (Ctrl-H), sent by some terminals for the backspace key.
const BACKSPACE_BYTE: u8 = 0x08;

/// Unbuffered byte input with readiness polling.
///
/// Readiness and reads must observe the same buffer, so implementations
/// must not read ahead.
pub trait ByteSource {
    /// Block until one byte is available.
    ///
    /// Returns `None` once the stream is closed.
    fn read_byte(&mut self) -> io::Result<Option<u8>>;

    /// Wait up to `timeout` for the stream to become readable.
    ///
    /// A closed stream counts as readable; the following
    /// [`read_byte`](Self::read_byte) then returns `None`.
    fn poll_byte(&mut self, timeout: Duration) -> io::Result<bool>;
}

/// Read one logical key from `source`.
///
/// Only a failure on the first byte is an error. Failures or end of input
/// while draining an escape sequence end the sequence instead.
pub fn read_key_from<S>(source: &mut S, timing: &EscapeTiming) -> Result<NormalizedKey, KeyError>
where
    S: ByteSource + ?Sized,
{
    let key = match source.read_byte()? {
        None => NormalizedKey::EndOfInput,
        Some(b'\r' | b'\n') => NormalizedKey::Enter,
        Some(b' ') => NormalizedKey::Space,
        Some(DELETE_BYTE | BACKSPACE_BYTE) => NormalizedKey::Backspace,
        Some(ESCAPE_BYTE) => {
            let tail = read_escape_tail(source, timing);
            let key = classify(&tail);
            tracing::trace!(?tail, ?key, "escape sequence");
            key
        },
        Some(_) => NormalizedKey::Other,
    };

    tracing::trace!(?key, "key read");
    Ok(key)
}

/// Collect the bytes following an escape byte.
fn read_escape_tail<S>(source: &mut S, timing: &EscapeTiming) -> Vec<u8>
where
    S: ByteSource + ?Sized,
{
    let mut tail = Vec::with_capacity(MAX_ESCAPE_SEQUENCE_LEN);
    let mut wait = timing.first_byte;

    while tail.len() < MAX_ESCAPE_SEQUENCE_LEN {
        match source.poll_byte(wait) {
            Ok(true) => {},
            Ok(false) => break,
            Err(e) => {
                tracing::debug!(error = %e, "poll failed inside escape sequence");
                break;
            },
        }

        match source.read_byte() {
            Ok(Some(byte)) => {
                tail.push(byte);
                if is_complete(&tail) {
                    break;
                }
            },
            Ok(None) => break,
            Err(e) => {
                tracing::debug!(error = %e, "read failed inside escape sequence");
                break;
            },
        }

        wait = timing.inter_byte;
    }

    tail
}

#[cfg(test)]
mod tests {
    use std::collections::VecDeque;

    use super::*;

    enum Step {
        Byte(u8),
        Silence,
        Fail,
    }

    /// Byte stream with explicit quiet periods instead of wall-clock delays.
    struct ScriptedSource {
        steps: VecDeque<Step>,
        waits: Vec<Duration>,
    }

    impl ScriptedSource {
        fn new(steps: Vec<Step>) -> Self {
            Self { steps: steps.into(), waits: Vec::new() }
        }

        fn bytes(bytes: &[u8]) -> Self {
            Self::new(bytes.iter().copied().map(Step::Byte).collect())
        }
    }

    impl ByteSource for ScriptedSource {
        fn read_byte(&mut self) -> io::Result<Option<u8>> {
            while matches!(self.steps.front(), Some(Step::Silence)) {
                self.steps.pop_front();
            }
            match self.steps.pop_front() {
                Some(Step::Byte(b)) => Ok(Some(b)),
                Some(Step::Fail) => Err(io::Error::other("scripted failure")),
                Some(Step::Silence) | None => Ok(None),
            }
        }

        fn poll_byte(&mut self, timeout: Duration) -> io::Result<bool> {
            self.waits.push(timeout);
            match self.steps.front() {
                Some(Step::Silence) => {
                    self.steps.pop_front();
                    Ok(false)
                },
                Some(Step::Fail) => {
                    self.steps.pop_front();
                    Err(io::Error::other("scripted failure"))
                },
                Some(Step::Byte(_)) | None => Ok(true),
            }
        }
    }

    fn timing() -> EscapeTiming {
        EscapeTiming::from_millis(50, 5)
    }

    fn read(source: &mut ScriptedSource) -> NormalizedKey {
        match read_key_from(source, &timing()) {
            Ok(key) => key,
            Err(e) => unreachable!("scripted read failed: {e}"),
        }
    }

    #[test]
    fn plain_bytes() {
        let mut source = ScriptedSource::bytes(b"\r\n \x7f\x08x");
        assert_eq!(read(&mut source), NormalizedKey::Enter);
        assert_eq!(read(&mut source), NormalizedKey::Enter);
        assert_eq!(read(&mut source), NormalizedKey::Space);
        assert_eq!(read(&mut source), NormalizedKey::Backspace);
        assert_eq!(read(&mut source), NormalizedKey::Backspace);
        assert_eq!(read(&mut source), NormalizedKey::Other);
        assert_eq!(read(&mut source), NormalizedKey::EndOfInput);
        assert!(source.waits.is_empty());
    }

    #[test]
    fn bare_escape_waits_first_byte_timeout() {
        let mut source = ScriptedSource::new(vec![Step::Byte(ESCAPE_BYTE), Step::Silence]);
        assert_eq!(read(&mut source), NormalizedKey::Escape);
        assert_eq!(source.waits, vec![Duration::from_millis(50)]);
    }

    #[test]
    fn escape_at_end_of_input_is_escape() {
        let mut source = ScriptedSource::bytes(&[ESCAPE_BYTE]);
        assert_eq!(read(&mut source), NormalizedKey::Escape);
        assert_eq!(read(&mut source), NormalizedKey::EndOfInput);
    }

    #[test]
    fn arrow_sequence_uses_inter_byte_timeout() {
        let mut source = ScriptedSource::new(vec![
            Step::Byte(ESCAPE_BYTE),
            Step::Byte(b'['),
            Step::Byte(b'A'),
            Step::Silence,
        ]);
        assert_eq!(read(&mut source), NormalizedKey::Up);
        assert_eq!(source.waits, vec![Duration::from_millis(50), Duration::from_millis(5)]);
    }

    #[test]
    fn key_buffered_after_arrow_is_kept() {
        let mut source = ScriptedSource::bytes(b"\x1b[A\r\x1bOB\x1b[1;5D ");
        assert_eq!(read(&mut source), NormalizedKey::Up);
        assert_eq!(read(&mut source), NormalizedKey::Enter);
        assert_eq!(read(&mut source), NormalizedKey::Down);
        assert_eq!(read(&mut source), NormalizedKey::Left);
        assert_eq!(read(&mut source), NormalizedKey::Space);
        assert_eq!(read(&mut source), NormalizedKey::EndOfInput);
    }

    #[test]
    fn alt_letter_consumes_one_byte() {
        let mut source = ScriptedSource::bytes(b"\x1bx\r");
        assert_eq!(read(&mut source), NormalizedKey::Other);
        assert_eq!(read(&mut source), NormalizedKey::Enter);
    }

    #[test]
    fn sequence_ends_at_quiet_gap() {
        let mut source = ScriptedSource::new(vec![
            Step::Byte(ESCAPE_BYTE),
            Step::Byte(b'O'),
            Step::Byte(b'B'),
            Step::Silence,
            Step::Byte(b' '),
        ]);
        assert_eq!(read(&mut source), NormalizedKey::Down);
        assert_eq!(read(&mut source), NormalizedKey::Space);
    }

    #[test]
    fn modified_arrow() {
        let mut source = ScriptedSource::new(vec![
            Step::Byte(ESCAPE_BYTE),
            Step::Byte(b'['),
            Step::Byte(b'1'),
            Step::Byte(b';'),
            Step::Byte(b'5'),
            Step::Byte(b'C'),
            Step::Silence,
        ]);
        assert_eq!(read(&mut source), NormalizedKey::Right);
    }

    #[test]
    fn incomplete_sequence_is_other_not_escape() {
        let mut source =
            ScriptedSource::new(vec![Step::Byte(ESCAPE_BYTE), Step::Byte(b'['), Step::Silence]);
        assert_eq!(read(&mut source), NormalizedKey::Other);
    }

    #[test]
    fn tail_is_capped() {
        // A parameter run with no final byte never completes on its own.
        let mut bytes = vec![ESCAPE_BYTE, b'['];
        bytes.extend(std::iter::repeat_n(b'1', 19));
        let mut source = ScriptedSource::bytes(&bytes);

        assert_eq!(read(&mut source), NormalizedKey::Other);
        assert_eq!(source.waits.len(), MAX_ESCAPE_SEQUENCE_LEN);
        assert_eq!(source.steps.len(), 20 - MAX_ESCAPE_SEQUENCE_LEN);
    }

    #[test]
    fn failure_mid_sequence_keeps_collected_bytes() {
        let mut source = ScriptedSource::new(vec![
            Step::Byte(ESCAPE_BYTE),
            Step::Byte(b'['),
            Step::Byte(b'D'),
            Step::Fail,
        ]);
        assert_eq!(read(&mut source), NormalizedKey::Left);
    }

    #[test]
    fn failure_on_first_byte_is_an_error() {
        let mut source = ScriptedSource::new(vec![Step::Fail]);
        let result = read_key_from(&mut source, &timing());
        assert!(matches!(result, Err(KeyError::Io(_))));
    }
}
