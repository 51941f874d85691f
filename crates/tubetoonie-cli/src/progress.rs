//! One-line download progress.

use std::io::{self, Write};

use crossterm::{
    queue,
    style::Print,
    terminal::{Clear, ClearType},
};
use tubetoonie_media::{DownloadProgress, format_bytes, format_speed};

/// `Downloading: 42.5% | 1.00 MB / 2.00 MB | 512.00 KB/s`
pub fn progress_line(progress: &DownloadProgress) -> String {
    let percent = progress.percent.as_deref().map_or("0%", str::trim);
    format!(
        "Downloading: {percent} | {} / {} | {}",
        format_bytes(progress.downloaded_bytes),
        format_bytes(progress.total_bytes),
        format_speed(progress.speed),
    )
}

/// Progress for one download: updates overwrite a single line, status
/// messages go on lines of their own.
pub struct ProgressDisplay<W: Write> {
    out: W,
    label: String,
    line_open: bool,
}

impl<W: Write> ProgressDisplay<W> {
    /// Display prefixing every line with `label`, e.g. `(1/3)`.
    pub fn new(out: W, label: impl Into<String>) -> Self {
        Self { out, label: label.into(), line_open: false }
    }

    /// Overwrite the progress line.
    pub fn progress(&mut self, progress: &DownloadProgress) -> io::Result<()> {
        queue!(
            self.out,
            Print('\r'),
            Clear(ClearType::CurrentLine),
            Print(format!("{} {}", self.label, progress_line(progress)))
        )?;
        self.line_open = true;
        self.out.flush()
    }

    /// Print a phase message below the progress line.
    pub fn status(&mut self, message: &str) -> io::Result<()> {
        self.close()?;
        writeln!(self.out, "{} {message}", self.label)?;
        self.out.flush()
    }

    /// End an open progress line.
    pub fn close(&mut self) -> io::Result<()> {
        if self.line_open {
            self.line_open = false;
            writeln!(self.out)?;
        }
        self.out.flush()
    }
}
