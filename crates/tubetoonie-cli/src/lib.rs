//! Tubetoonie terminal shell.
//!
//! Line-oriented prompts plus arrow-key pickers for choosing what to do,
//! how URLs are entered, and which Creative Tonies receive a download.
//!
//! # Components
//!
//! - [`Cli`]: command line and environment configuration
//! - [`TerminalDriver`]: picker [`Driver`](tubetoonie_select::Driver) over a
//!   [`KeyReader`](tubetoonie_keys::KeyReader) and a [`FrameSurface`]
//! - [`LinePrompt`]: cooked-mode questions with defaults
//! - [`Shell`]: the download and push-local flows
//! - [`CliError`] / [`Outcome`]: results and their exit codes

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod args;
mod driver;
mod error;
mod progress;
mod prompt;
mod shell;
mod surface;

pub use args::{Cli, Command};
pub use driver::TerminalDriver;
pub use error::{CliError, Outcome};
pub use progress::{ProgressDisplay, progress_line};
pub use prompt::LinePrompt;
pub use shell::{MAIN_MENU, Shell, URL_INPUT_MODES};
pub use surface::{FrameSurface, LineWidth};
