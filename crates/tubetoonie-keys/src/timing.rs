//! Escape disambiguation timeouts.

use std::time::Duration;

/// Timeouts used to tell a bare Escape apart from an escape sequence.
///
/// A follow-on byte that arrives later than `first_byte` after the escape
/// byte is not part of the sequence. Slow links can split an arrow key
/// this way; raise `first_byte` there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeTiming {
    /// Wait for the first byte after the escape byte.
    pub first_byte: Duration,
    /// Wait for each further byte of the same sequence.
    pub inter_byte: Duration,
}

impl EscapeTiming {
    /// Default wait for the first follow-on byte.
    pub const DEFAULT_FIRST_BYTE: Duration = Duration::from_millis(50);

    /// Default wait between bytes of one sequence.
    pub const DEFAULT_INTER_BYTE: Duration = Duration::from_millis(10);

    /// Create timing from millisecond values.
    pub fn from_millis(first_byte_ms: u64, inter_byte_ms: u64) -> Self {
        Self {
            first_byte: Duration::from_millis(first_byte_ms),
            inter_byte: Duration::from_millis(inter_byte_ms),
        }
    }
}

impl Default for EscapeTiming {
    fn default() -> Self {
        Self { first_byte: Self::DEFAULT_FIRST_BYTE, inter_byte: Self::DEFAULT_INTER_BYTE }
    }
}
