//! Escape sequence classification.
//!
//! Only the bytes *after* the escape byte are classified. The decision table
//! is deliberately small: cursor keys in normal (`ESC [`) and application
//! (`ESC O`) mode, with or without modifier parameters.

use crate::NormalizedKey;

/// Escape trigger byte on the raw-stream platform.
pub const ESCAPE_BYTE: u8 = 0x1b;

/// Maximum number of bytes read after an escape byte.
///
/// Bounds both the reader and the classifier on corrupted input.
pub const MAX_ESCAPE_SEQUENCE_LEN: usize = 8;

/// Control Sequence Introducer (`ESC [`).
const CSI_INTRODUCER: u8 = b'[';

/// Single Shift Three, used by application cursor mode (`ESC O`).
const SS3_INTRODUCER: u8 = b'O';

/// Classify the bytes that followed an escape byte.
///
/// - empty: the user pressed Escape on its own
/// - unknown introducer: [`NormalizedKey::Other`], never a cancel
/// - known introducer: the *last* byte picks the direction, so modifier
///   parameters such as `[1;5A` still read as Up
///
/// Total and side-effect free for any input length.
pub fn classify(sequence: &[u8]) -> NormalizedKey {
    let Some(&introducer) = sequence.first() else {
        return NormalizedKey::Escape;
    };

    if introducer != CSI_INTRODUCER && introducer != SS3_INTRODUCER {
        return NormalizedKey::Other;
    }

    match sequence.last() {
        Some(b'A') => NormalizedKey::Up,
        Some(b'B') => NormalizedKey::Down,
        Some(b'C') => NormalizedKey::Right,
        Some(b'D') => NormalizedKey::Left,
        _ => NormalizedKey::Other,
    }
}

/// Final bytes of a control sequence.
const FINAL_BYTES: std::ops::RangeInclusive<u8> = 0x40..=0x7e;

/// Whether `sequence` already holds one whole escape sequence.
///
/// Lets the reader stop before it consumes a key typed right after it.
///
/// - no introducer first: one byte (`ESC x`, as sent for Alt+x)
/// - `[` or `O`: up to the first final byte, so parameters such as `1;5`
///   are kept; `[[` is the Linux console function-key prefix, not a final
pub(crate) fn is_complete(sequence: &[u8]) -> bool {
    match sequence {
        [] | [CSI_INTRODUCER | SS3_INTRODUCER] | [CSI_INTRODUCER, CSI_INTRODUCER] => false,
        [CSI_INTRODUCER | SS3_INTRODUCER, .., last] => FINAL_BYTES.contains(last),
        [_, ..] => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bracket_arrows() {
        assert_eq!(classify(b"[A"), NormalizedKey::Up);
        assert_eq!(classify(b"[B"), NormalizedKey::Down);
        assert_eq!(classify(b"[C"), NormalizedKey::Right);
        assert_eq!(classify(b"[D"), NormalizedKey::Left);
    }

    #[test]
    fn application_mode_arrows() {
        assert_eq!(classify(b"OA"), NormalizedKey::Up);
        assert_eq!(classify(b"OB"), NormalizedKey::Down);
        assert_eq!(classify(b"OC"), NormalizedKey::Right);
        assert_eq!(classify(b"OD"), NormalizedKey::Left);
    }

    #[test]
    fn modifier_parameters_are_ignored() {
        assert_eq!(classify(b"[1;5A"), NormalizedKey::Up);
        assert_eq!(classify(b"[1;2D"), NormalizedKey::Left);
    }

    #[test]
    fn empty_is_escape() {
        assert_eq!(classify(b""), NormalizedKey::Escape);
    }

    #[test]
    fn unknown_sequences_are_other() {
        assert_eq!(classify(b"?"), NormalizedKey::Other);
        assert_eq!(classify(b"[Z"), NormalizedKey::Other);
        assert_eq!(classify(b"["), NormalizedKey::Other);
        assert_eq!(classify(b"O"), NormalizedKey::Other);
        assert_eq!(classify(b"A"), NormalizedKey::Other);
        assert_eq!(classify(&[ESCAPE_BYTE]), NormalizedKey::Other);
    }

    #[test]
    fn completion_stops_at_final_byte() {
        assert!(!is_complete(b""));
        assert!(!is_complete(b"["));
        assert!(!is_complete(b"O"));
        assert!(!is_complete(b"[1;5"));
        assert!(!is_complete(b"[["));
        assert!(is_complete(b"[A"));
        assert!(is_complete(b"OB"));
        assert!(is_complete(b"[1;5C"));
        assert!(is_complete(b"[[A"));
        assert!(is_complete(b"[~"));
    }

    #[test]
    fn alt_prefix_is_one_byte() {
        assert!(is_complete(b"x"));
        assert!(is_complete(&[ESCAPE_BYTE]));
    }
}
