//! Audio fetching through the external extraction tool.

use std::{
    ffi::OsString,
    fs,
    io::{self, BufRead, BufReader, Read},
    path::{Path, PathBuf},
    process::{Command, Stdio},
    thread,
    time::SystemTime,
};

use crate::{
    DownloadProgress, EnvLookup, FetchError, ProgressEvent,
    env::non_empty,
    parse_progress_line,
    progress::{DOWNLOAD_TEMPLATE, FILE_TEMPLATE, POSTPROCESS_TEMPLATE},
    youtube::normalize_youtube_url,
};

/// Cookie jar file, `~` expanded.
pub const COOKIE_FILE_VAR: &str = "YTAUDIO_COOKIEFILE";
/// `browser[,profile]` to borrow cookies from.
pub const COOKIES_FROM_BROWSER_VAR: &str = "YTAUDIO_COOKIES_FROM_BROWSER";
/// Player client used for extraction.
pub const PLAYER_CLIENT_VAR: &str = "YTAUDIO_YOUTUBE_PLAYER_CLIENT";

const DEFAULT_PLAYER_CLIENT: &str = "android";
const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) ",
    "AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
);

/// Fetch contract: download `url` as audio into `output_dir`.
pub trait MediaFetcher {
    /// Download and convert, returning the produced file.
    ///
    /// `on_progress` fires zero or more times during the transfer;
    /// `on_status` receives human-readable phase messages.
    fn fetch(
        &self,
        url: &str,
        output_dir: &Path,
        on_progress: &mut dyn FnMut(&DownloadProgress),
        on_status: &mut dyn FnMut(&str),
    ) -> Result<PathBuf, FetchError>;
}

/// Extraction options read from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    /// Netscape cookie jar to send.
    pub cookie_file: Option<PathBuf>,
    /// Browser (and optional profile) to borrow cookies from.
    pub cookies_from_browser: Option<(String, Option<String>)>,
    /// Player client, lowercase.
    pub player_client: String,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self {
            cookie_file: None,
            cookies_from_browser: None,
            player_client: DEFAULT_PLAYER_CLIENT.to_string(),
        }
    }
}

impl FetchOptions {
    /// Read options from `env`. Unset or blank variables keep defaults.
    pub fn from_env(env: EnvLookup<'_>) -> Self {
        let cookie_file = non_empty(env, COOKIE_FILE_VAR).map(|raw| expand_home(&raw, env));

        let cookies_from_browser = non_empty(env, COOKIES_FROM_BROWSER_VAR).and_then(|raw| {
            let mut parts = raw.split(',').map(str::trim).filter(|part| !part.is_empty());
            let browser = parts.next()?.to_string();
            Some((browser, parts.next().map(str::to_string)))
        });

        let player_client = non_empty(env, PLAYER_CLIENT_VAR)
            .map_or_else(|| DEFAULT_PLAYER_CLIENT.to_string(), |client| client.to_lowercase());

        Self { cookie_file, cookies_from_browser, player_client }
    }
}

fn expand_home(raw: &str, env: EnvLookup<'_>) -> PathBuf {
    let home = || non_empty(env, "HOME").or_else(|| non_empty(env, "USERPROFILE"));
    if raw == "~" {
        if let Some(home) = home() {
            return PathBuf::from(home);
        }
    } else if let Some(rest) = raw.strip_prefix("~/").or_else(|| raw.strip_prefix("~\\"))
        && let Some(home) = home()
    {
        return Path::new(&home).join(rest);
    }
    PathBuf::from(raw)
}

/// [`MediaFetcher`] spawning `yt-dlp` (or a compatible program).
#[derive(Debug, Clone)]
pub struct YtDlpFetcher {
    program: OsString,
    options: FetchOptions,
}

impl YtDlpFetcher {
    /// Fetcher running `program` with `options`.
    pub fn new(program: impl Into<OsString>, options: FetchOptions) -> Self {
        Self { program: program.into(), options }
    }

    /// Full argument list for one download.
    pub fn args(&self, url: &str, output_dir: &Path) -> Vec<OsString> {
        let mut args: Vec<OsString> = [
            "--format",
            "bestaudio/best",
            "--no-playlist",
            "--quiet",
            "--no-warnings",
            "--progress",
            "--newline",
            "--retries",
            "3",
            "--fragment-retries",
            "3",
            "--extract-audio",
            "--audio-format",
            "mp3",
            "--audio-quality",
            "192K",
            "--progress-template",
            DOWNLOAD_TEMPLATE,
            "--progress-template",
            POSTPROCESS_TEMPLATE,
            "--print",
            FILE_TEMPLATE,
        ]
        .into_iter()
        .map(OsString::from)
        .collect();

        args.push("--add-header".into());
        args.push(format!("User-Agent:{USER_AGENT}").into());
        args.push("--extractor-args".into());
        args.push(format!("youtube:player_client={}", self.options.player_client).into());

        if let Some(cookie_file) = &self.options.cookie_file {
            args.push("--cookies".into());
            args.push(cookie_file.into());
        }
        if let Some((browser, profile)) = &self.options.cookies_from_browser {
            args.push("--cookies-from-browser".into());
            args.push(match profile {
                Some(profile) => format!("{browser}:{profile}").into(),
                None => browser.into(),
            });
        }

        args.push("--output".into());
        args.push(output_dir.join("%(title)s.%(ext)s").into());
        args.push("--".into());
        args.push(url.into());
        args
    }
}

impl MediaFetcher for YtDlpFetcher {
    fn fetch(
        &self,
        url: &str,
        output_dir: &Path,
        on_progress: &mut dyn FnMut(&DownloadProgress),
        on_status: &mut dyn FnMut(&str),
    ) -> Result<PathBuf, FetchError> {
        on_status("Preparing download...");
        let url = normalize_youtube_url(url);
        let program = self.program.to_string_lossy().into_owned();

        tracing::info!(%program, %url, dir = %output_dir.display(), "spawning extraction tool");
        let mut child = Command::new(&self.program)
            .args(self.args(&url, output_dir))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|source| FetchError::Spawn { program: program.clone(), source })?;

        // Drained concurrently so a chatty tool cannot block on a full pipe.
        let stderr = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut bytes = Vec::new();
                if let Err(e) = pipe.read_to_end(&mut bytes) {
                    tracing::debug!(error = %e, "reading tool diagnostics failed");
                }
                String::from_utf8_lossy(&bytes).into_owned()
            })
        });

        let final_path = child
            .stdout
            .take()
            .and_then(|stdout| read_tool_output(stdout, on_progress, on_status));

        // Reaped and joined on every path, so neither the child nor the
        // stderr reader outlives this call.
        let status = child.wait();
        let diagnostics = stderr.and_then(|handle| handle.join().ok()).unwrap_or_default();
        let status = status?;

        if !status.success() {
            let message = diagnostics
                .lines()
                .rev()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map_or_else(|| format!("{program} exited unsuccessfully"), str::to_string);
            return Err(FetchError::Download { status, message });
        }

        locate_output(final_path, output_dir)
    }
}

/// Feed tagged stdout lines to the callbacks until the tool closes its
/// output. Returns the final path the tool reported, if any.
///
/// Lines are decoded lossily. A read failure ends the scan; the exit status
/// decides the outcome.
fn read_tool_output(
    stdout: impl Read,
    on_progress: &mut dyn FnMut(&DownloadProgress),
    on_status: &mut dyn FnMut(&str),
) -> Option<PathBuf> {
    let mut final_path = None;

    for line in BufReader::new(stdout).split(b'\n') {
        let line = match line {
            Ok(bytes) => bytes,
            Err(e) => {
                tracing::debug!(error = %e, "reading tool output failed");
                break;
            },
        };
        let line = String::from_utf8_lossy(&line);
        tracing::debug!(%line, "tool output");

        match parse_progress_line(&line) {
            Some(ProgressEvent::Downloading(progress)) => on_progress(&progress),
            Some(ProgressEvent::DownloadFinished) => {
                on_status("Download complete. Starting conversion to MP3...");
            },
            Some(ProgressEvent::ConversionStarted) => on_status("Converting with FFmpeg..."),
            Some(ProgressEvent::ConversionFinished) => on_status("Conversion finished."),
            Some(ProgressEvent::FinalPath(path)) => final_path = Some(path),
            None => {},
        }
    }

    final_path
}

/// Produced file: the reported path when it exists, else the newest MP3.
fn locate_output(reported: Option<PathBuf>, output_dir: &Path) -> Result<PathBuf, FetchError> {
    if let Some(path) = reported {
        let mp3 = path.with_extension("mp3");
        if mp3.is_file() {
            return Ok(mp3);
        }
        tracing::debug!(path = %path.display(), "reported path missing, scanning output directory");
    }

    find_latest_mp3(output_dir)?
        .ok_or_else(|| FetchError::MissingOutput { dir: output_dir.to_path_buf() })
}

/// Most recently modified `.mp3` directly inside `dir`.
pub fn find_latest_mp3(dir: &Path) -> io::Result<Option<PathBuf>> {
    let mut newest: Option<(SystemTime, PathBuf)> = None;

    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        let is_mp3 = path.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("mp3"));
        if !is_mp3 || !entry.file_type()?.is_file() {
            continue;
        }

        let modified = entry.metadata()?.modified()?;
        if newest.as_ref().is_none_or(|(best, _)| modified > *best) {
            newest = Some((modified, path));
        }
    }

    Ok(newest.map(|(_, path)| path))
}

/// Create `dir` and its parents.
pub fn prepare_output_dir(dir: &Path) -> io::Result<PathBuf> {
    fs::create_dir_all(dir)?;
    Ok(dir.to_path_buf())
}
