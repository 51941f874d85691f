//! Fuzz target for escape tail classification
//!
//! # Invariants
//!
//! - Classification is total: every byte string yields a key
//! - `Escape` if and only if the tail is empty
//! - Only directions, `Escape`, or `Other` come out
//! - Same input, same key

#![no_main]

use libfuzzer_sys::fuzz_target;
use tubetoonie_keys::{NormalizedKey, classify};

fuzz_target!(|tail: &[u8]| {
    let key = classify(tail);

    assert_eq!(key == NormalizedKey::Escape, tail.is_empty());
    assert!(matches!(
        key,
        NormalizedKey::Escape
            | NormalizedKey::Up
            | NormalizedKey::Down
            | NormalizedKey::Left
            | NormalizedKey::Right
            | NormalizedKey::Other
    ));
    assert_eq!(key, classify(tail));
});
