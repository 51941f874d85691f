//! Tubetoonie entry point.
//!
//! # Usage
//!
//! ```bash
//! # Menu-driven
//! tubetoonie
//!
//! # Straight to a download
//! tubetoonie download https://youtu.be/hcu8qlRRVPE -o ~/Music/tonie
//!
//! # Upload files already on disk
//! tubetoonie push-local song.mp3 story.mp3
//! ```

use std::{
    io::{self, IsTerminal, Write},
    path::PathBuf,
    process::ExitCode,
};

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};
use tubetoonie_cli::{
    Cli, CliError, FrameSurface, LinePrompt, LineWidth, Outcome, Shell, TerminalDriver,
};
use tubetoonie_keys::TerminalKeyReader;
use tubetoonie_media::{
    CommandSecureStore, Credentials, EnvLookup, FetchOptions, NoSecureStore, UnavailableUploader,
    YtDlpFetcher, load_target_ids, process_env, resolve_credentials,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    // stderr only: stdout carries the picker frames.
    tracing_subscriber::registry().with(fmt::layer().with_writer(io::stderr)).with(filter).init();

    match run(cli) {
        Ok(outcome) => ExitCode::from(outcome.exit_code()),
        Err(e) => {
            tracing::debug!(error = ?e, "shell failed");
            let _ = writeln!(io::stderr(), "{e}");
            ExitCode::from(e.exit_code())
        },
    }
}

fn run(cli: Cli) -> Result<Outcome, CliError> {
    let env = process_env;
    let interactive = io::stdout().is_terminal();
    let styled = interactive && env("NO_COLOR").is_none();
    let width = if interactive { LineWidth::Terminal } else { LineWidth::Unbounded };

    let fetcher = YtDlpFetcher::new(&cli.yt_dlp, FetchOptions::from_env(&env));
    let uploader = UnavailableUploader;

    let keys = TerminalKeyReader::stdin(cli.escape_timing());
    let surface = FrameSurface::new(io::stdout(), styled).with_width(width);
    let driver = TerminalDriver::new(keys, surface);
    let prompt = LinePrompt::new(io::stdin().lock(), io::stdout());

    let home = env("HOME").or_else(|| env("USERPROFILE")).map(PathBuf::from);
    let default_output_dir = std::env::current_dir()?.join("downloads");

    let mut shell = Shell::new(driver, prompt, &fetcher, &uploader)
        .with_credentials(credentials(&env))
        .with_targets(load_target_ids(&env))
        .with_default_output_dir(default_output_dir)
        .with_home(home);

    tracing::debug!(command = ?cli.command, "starting shell");
    shell.run(cli.command)
}

/// Environment first, then the host's secret store when it has one.
fn credentials(env: EnvLookup<'_>) -> Option<Credentials> {
    match CommandSecureStore::for_host() {
        Some(store) => resolve_credentials(None, None, env, &store),
        None => resolve_credentials(None, None, env, &NoSecureStore),
    }
}
