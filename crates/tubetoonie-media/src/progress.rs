//! Machine-readable progress from the extraction tool.
//!
//! The fetcher asks the tool to print one tagged line per progress update,
//! with fields separated by `|` and `NA` for unknown values:
//!
//! ```text
//! tubetoonie:download|downloading| 42.5%|1048576|2097152|NA|524288.0
//! tubetoonie:postprocess|started
//! tubetoonie:file|/music/Song.mp3
//! ```

use std::path::PathBuf;

use crate::format::parse_percent;

pub(crate) const DOWNLOAD_TAG: &str = "tubetoonie:download|";
pub(crate) const POSTPROCESS_TAG: &str = "tubetoonie:postprocess|";
pub(crate) const FILE_TAG: &str = "tubetoonie:file|";

/// Tool template producing [`DOWNLOAD_TAG`] lines.
pub(crate) const DOWNLOAD_TEMPLATE: &str = concat!(
    "download:tubetoonie:download|",
    "%(progress.status)s|",
    "%(progress._percent_str)s|",
    "%(progress.downloaded_bytes)s|",
    "%(progress.total_bytes)s|",
    "%(progress.total_bytes_estimate)s|",
    "%(progress.speed)s",
);

/// Tool template producing [`POSTPROCESS_TAG`] lines.
pub(crate) const POSTPROCESS_TEMPLATE: &str =
    "postprocess:tubetoonie:postprocess|%(progress.status)s";

/// Tool print template producing the [`FILE_TAG`] line after the final move.
pub(crate) const FILE_TEMPLATE: &str = "after_move:tubetoonie:file|%(filepath)s";

/// One download progress update.
#[derive(Debug, Clone, PartialEq)]
pub struct DownloadProgress {
    /// Tool status word, `downloading` for in-flight updates.
    pub status: String,
    /// Percentage label as printed by the tool, e.g. `" 42.5%"`.
    pub percent: Option<String>,
    /// Bytes received so far.
    pub downloaded_bytes: Option<f64>,
    /// Expected size, exact or estimated.
    pub total_bytes: Option<f64>,
    /// Bytes per second.
    pub speed: Option<f64>,
}

impl DownloadProgress {
    /// Completion in percent, when the label parses.
    pub fn percent_value(&self) -> Option<f64> {
        self.percent.as_deref().and_then(parse_percent)
    }
}

/// A recognized line of tool output.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Transfer in flight.
    Downloading(DownloadProgress),
    /// Transfer done; conversion follows.
    DownloadFinished,
    /// Audio conversion started.
    ConversionStarted,
    /// Audio conversion done.
    ConversionFinished,
    /// Final location of the produced file.
    FinalPath(PathBuf),
}

/// Parse one line of tool output. Untagged lines yield `None`.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let line = line.trim_end_matches(['\r', '\n']);

    if let Some(path) = line.strip_prefix(FILE_TAG) {
        let path = path.trim();
        return (!path.is_empty() && path != "NA")
            .then(|| ProgressEvent::FinalPath(PathBuf::from(path)));
    }

    if let Some(status) = line.strip_prefix(POSTPROCESS_TAG) {
        return match status.trim() {
            "started" => Some(ProgressEvent::ConversionStarted),
            "finished" => Some(ProgressEvent::ConversionFinished),
            _ => None,
        };
    }

    let fields: Vec<&str> = line.strip_prefix(DOWNLOAD_TAG)?.split('|').collect();
    let [status, percent, downloaded, total, estimate, speed] = fields.as_slice() else {
        tracing::debug!(line, "malformed progress line");
        return None;
    };

    match status.trim() {
        "downloading" => Some(ProgressEvent::Downloading(DownloadProgress {
            status: (*status).trim().to_string(),
            percent: known(percent).map(str::to_string),
            downloaded_bytes: number(downloaded),
            total_bytes: number(total).or_else(|| number(estimate)),
            speed: number(speed),
        })),
        "finished" => Some(ProgressEvent::DownloadFinished),
        _ => None,
    }
}

fn known(field: &str) -> Option<&str> {
    let trimmed = field.trim();
    (!trimmed.is_empty() && trimmed != "NA").then_some(field)
}

fn number(field: &str) -> Option<f64> {
    known(field)?.trim().parse().ok()
}
