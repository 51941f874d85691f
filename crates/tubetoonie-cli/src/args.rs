//! Command line.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tubetoonie_keys::EscapeTiming;

/// Tubetoonie: video audio to MP3 to Creative Tonie
#[derive(Parser, Debug)]
#[command(name = "tubetoonie")]
#[command(about = "Download audio as MP3 and push it to Creative Tonies")]
#[command(version)]
pub struct Cli {
    /// What to do. Without one, a menu asks.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Wait for the byte after Escape before treating it as a bare Escape (ms)
    #[arg(long, env = "TUBETOONIE_ESC_TIMEOUT_MS", default_value_t = 50, global = true)]
    pub esc_timeout_ms: u64,

    /// Wait between bytes of one escape sequence (ms)
    #[arg(long, env = "TUBETOONIE_ESC_INTERBYTE_MS", default_value_t = 10, global = true)]
    pub esc_interbyte_ms: u64,

    /// Extraction tool to run
    #[arg(long = "yt-dlp", env = "TUBETOONIE_YTDLP", default_value = "yt-dlp", global = true)]
    pub yt_dlp: PathBuf,

    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins.
    #[arg(long, default_value = "warn", global = true)]
    pub log_level: String,
}

impl Cli {
    /// Escape disambiguation timeouts from the flags.
    pub fn escape_timing(&self) -> EscapeTiming {
        EscapeTiming::from_millis(self.esc_timeout_ms, self.esc_interbyte_ms)
    }
}

/// Shell commands.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Download audio for one or more URLs and upload it
    Download {
        /// URLs to fetch. Without any, an input mode picker asks.
        urls: Vec<String>,

        /// Directory for the MP3 files
        #[arg(short, long)]
        output_dir: Option<PathBuf>,
    },

    /// Upload audio files already on disk
    PushLocal {
        /// Files to upload. Without any, a prompt asks.
        files: Vec<PathBuf>,
    },
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn defaults_match_reader_defaults() {
        let cli = Cli::try_parse_from(["tubetoonie"]).unwrap();
        assert_eq!(cli.escape_timing(), EscapeTiming::default());
        assert_eq!(cli.command, None);
        assert_eq!(cli.log_level, "warn");
    }

    #[test]
    fn timing_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tubetoonie",
            "download",
            "https://youtu.be/x",
            "--esc-timeout-ms",
            "120",
            "-o",
            "/music",
        ])
        .unwrap();

        assert_eq!(cli.escape_timing().first_byte, Duration::from_millis(120));
        assert_eq!(
            cli.command,
            Some(Command::Download {
                urls: vec!["https://youtu.be/x".to_string()],
                output_dir: Some(PathBuf::from("/music")),
            })
        );
    }

    #[test]
    fn push_local_takes_files() {
        let cli = Cli::try_parse_from(["tubetoonie", "push-local", "a.mp3", "b.mp3"]).unwrap();
        assert_eq!(
            cli.command,
            Some(Command::PushLocal { files: vec![PathBuf::from("a.mp3"), PathBuf::from("b.mp3")] })
        );
    }
}
