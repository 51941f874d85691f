//! Deterministic key input.

use std::collections::VecDeque;

use crate::{KeyError, KeyReader, NormalizedKey};

/// A [`KeyReader`] replaying a fixed list of keys.
///
/// Yields [`NormalizedKey::EndOfInput`] forever once the list is exhausted,
/// like a closed terminal.
#[derive(Debug, Clone, Default)]
pub struct ScriptedKeys {
    keys: VecDeque<NormalizedKey>,
}

impl ScriptedKeys {
    /// Create a reader replaying `keys` in order.
    pub fn new(keys: impl IntoIterator<Item = NormalizedKey>) -> Self {
        Self { keys: keys.into_iter().collect() }
    }

    /// Keys not yet read.
    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl KeyReader for ScriptedKeys {
    fn read_key(&mut self) -> Result<NormalizedKey, KeyError> {
        Ok(self.keys.pop_front().unwrap_or(NormalizedKey::EndOfInput))
    }
}
