//! Interactive pickers for Tubetoonie.
//!
//! A pure picker state machine plus a small generic loop that feeds it keys
//! and redraws it, so the same selection logic runs against a real terminal
//! and against scripted input in tests.
//!
//! # Components
//!
//! - [`Picker`]: selection state machine (cursor, chosen set, terminal state)
//! - [`PickerAction`]: what the loop must do after a key
//! - [`render`]: abstract frame for a picker
//! - [`Driver`]: trait for key input and drawing
//! - [`select_one`] / [`select_many`]: the interaction loops

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod action;
mod driver;
mod picker;
mod render;
mod runtime;

pub use action::PickerAction;
pub use driver::Driver;
pub use picker::{Picker, PickerState};
pub use render::{LineStyle, MULTI_HINT, RenderedLine, SINGLE_HINT, render};
pub use runtime::{run, select_many, select_one};
