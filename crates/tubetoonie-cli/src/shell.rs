//! Download and push-local flows.

use std::{
    cell::RefCell,
    io::{BufRead, Write},
    path::{Path, PathBuf},
};

use tubetoonie_media::{
    Credentials, FetchError, MediaFetcher, Uploader, load_urls_from_file, parse_urls_from_text,
    prepare_output_dir, push_to_targets, resolve_urls,
};
use tubetoonie_select::{Driver, select_many, select_one};

use crate::{CliError, Command, LinePrompt, Outcome, ProgressDisplay};

/// Main menu entries.
pub const MAIN_MENU: [&str; 3] = ["download", "push-local", "quit"];

/// Ways to enter URLs for a download.
pub const URL_INPUT_MODES: [&str; 3] = ["single", "paste", "file"];

/// The interactive shell.
///
/// Pickers go through `D`; free-text questions and messages through the
/// [`LinePrompt`].
pub struct Shell<'a, D, R, W> {
    picker: D,
    prompt: LinePrompt<R, W>,
    fetcher: &'a dyn MediaFetcher,
    uploader: &'a dyn Uploader,
    credentials: Option<Credentials>,
    targets: Vec<String>,
    default_output_dir: PathBuf,
    home: Option<PathBuf>,
}

impl<'a, D, R, W> Shell<'a, D, R, W>
where
    D: Driver<Error = CliError>,
    R: BufRead,
    W: Write,
{
    /// Shell without credentials or targets, saving into `./downloads`.
    pub fn new(
        picker: D,
        prompt: LinePrompt<R, W>,
        fetcher: &'a dyn MediaFetcher,
        uploader: &'a dyn Uploader,
    ) -> Self {
        Self {
            picker,
            prompt,
            fetcher,
            uploader,
            credentials: None,
            targets: Vec::new(),
            default_output_dir: PathBuf::from("downloads"),
            home: None,
        }
    }

    /// Account used for uploads. Without one, uploads are skipped.
    pub fn with_credentials(mut self, credentials: Option<Credentials>) -> Self {
        self.credentials = credentials;
        self
    }

    /// Configured Creative Tonie ids.
    pub fn with_targets(mut self, targets: Vec<String>) -> Self {
        self.targets = targets;
        self
    }

    /// Directory offered when the user is asked where to save.
    pub fn with_default_output_dir(mut self, dir: PathBuf) -> Self {
        self.default_output_dir = dir;
        self
    }

    /// Home directory for `~` in typed paths.
    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    /// Picker driver.
    pub fn picker(&self) -> &D {
        &self.picker
    }

    /// Line prompt.
    pub fn prompt(&self) -> &LinePrompt<R, W> {
        &self.prompt
    }

    /// Run `command`, or ask for one from the main menu.
    pub fn run(&mut self, command: Option<Command>) -> Result<Outcome, CliError> {
        self.prompt.say("TubeToonie: YouTube/local audio -> MP3 -> Tonie")?;

        let command = match command {
            Some(command) => command,
            None => {
                let choice =
                    select_one(&mut self.picker, "What do you want to do?", &MAIN_MENU, 0)?;
                match choice.copied() {
                    Some("download") => Command::Download { urls: Vec::new(), output_dir: None },
                    Some("push-local") => Command::PushLocal { files: Vec::new() },
                    _ => return Ok(Outcome::Quit),
                }
            },
        };

        match command {
            Command::Download { urls, output_dir } => self.download(urls, output_dir),
            Command::PushLocal { files } => self.push_local(files),
        }
    }

    /// Fetch every URL, upload each result, and report failures at the end.
    pub fn download(
        &mut self,
        urls: Vec<String>,
        output_dir: Option<PathBuf>,
    ) -> Result<Outcome, CliError> {
        let urls = if urls.is_empty() {
            match self.ask_for_urls()? {
                Some(urls) => urls,
                None => return Ok(Outcome::Quit),
            }
        } else {
            urls
        };
        if urls.is_empty() {
            return Err(CliError::Input("No URLs provided.".to_string()));
        }

        let output_dir = match output_dir {
            Some(dir) => dir,
            None => {
                let default = self.default_output_dir.display().to_string();
                let answer = self.prompt.ask("Output directory", Some(&default))?;
                self.expand_user(&answer)
            },
        };
        let output_dir = prepare_output_dir(&output_dir)?;

        let total = urls.len();
        let mut failures = Vec::new();
        for (index, url) in urls.iter().enumerate() {
            let label = format!("({}/{total})", index + 1);
            let saved = match self.fetch_one(url, &output_dir, &label) {
                Ok(path) => path,
                Err(e) => {
                    tracing::warn!(%url, error = %e, "download failed");
                    self.prompt.say(&format!("{label} Download error: {e}"))?;
                    failures.push(url.clone());
                    continue;
                },
            };

            if let Err(e) = self.upload_download(&saved, &label) {
                tracing::warn!(path = %saved.display(), error = %e, "upload failed");
                self.prompt.say(&format!("{label} Upload error: {e}"))?;
                failures.push(url.clone());
            }
        }

        if failures.is_empty() {
            self.prompt.say(&format!("All done! Saved files to: {}", output_dir.display()))?;
            return Ok(Outcome::Done);
        }

        self.prompt.say("Some downloads failed:")?;
        for url in &failures {
            self.prompt.say(&format!(" - {url}"))?;
        }
        self.prompt.say(&format!("Saved successful files to: {}", output_dir.display()))?;
        Ok(Outcome::DownloadsFailed(failures.len()))
    }

    /// Upload files already on disk, asking a chapter title for each.
    pub fn push_local(&mut self, files: Vec<PathBuf>) -> Result<Outcome, CliError> {
        let files = if files.is_empty() {
            let raw = self.prompt.ask("Enter file path(s), comma-separated", None)?;
            raw.split(',')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(|p| self.expand_user(p))
                .collect()
        } else {
            files
        };
        if files.is_empty() {
            return Err(CliError::Input("No files provided.".to_string()));
        }

        let missing: Vec<String> = files
            .iter()
            .filter(|path| !path.exists())
            .map(|path| path.display().to_string())
            .collect();
        if !missing.is_empty() {
            return Err(CliError::Input(format!("Missing file(s): {}", missing.join(", "))));
        }

        if self.credentials.is_none() {
            self.prompt
                .say("No Tonie credentials configured. Set TONIE_USERNAME and TONIE_PASSWORD.")?;
            return Ok(Outcome::Done);
        }
        if self.targets.is_empty() {
            self.prompt.say(
                "No TONIE_CREATIVE_TONIE_ID(S) set. Upload will use default Tonie selection.",
            )?;
        }

        for path in &files {
            let name =
                path.file_name().map(|n| n.to_string_lossy().into_owned()).unwrap_or_default();
            let stem =
                path.file_stem().map(|s| s.to_string_lossy().into_owned()).unwrap_or_default();
            let title = self.prompt.ask(&format!("Chapter title for {name}"), Some(&stem))?;

            self.prompt.say(&format!("Uploading: {}", path.display()))?;
            let prompt = &mut self.prompt;
            let uploaded = push_to_targets(
                self.uploader,
                path,
                &self.targets,
                Some(&title),
                self.credentials.as_ref(),
                &mut |message| say_quietly(prompt, message),
            )?;
            self.prompt.say(&format!("Uploaded to {uploaded} Tonie(s)."))?;
        }

        Ok(Outcome::Done)
    }

    /// URLs through the input-mode picker. `None` if the picker is cancelled.
    fn ask_for_urls(&mut self) -> Result<Option<Vec<String>>, CliError> {
        let mode = select_one(&mut self.picker, "YouTube input mode", &URL_INPUT_MODES, 0)?;
        let Some(mode) = mode.copied() else {
            return Ok(None);
        };

        let urls = match mode {
            "single" => {
                let url = self.prompt.ask("YouTube URL", None)?;
                resolve_urls(&url, None)
            },
            "paste" => {
                let intro = "Paste URLs (one per line). Submit an empty line to finish:";
                parse_urls_from_text(&self.prompt.ask_lines(intro)?)
            },
            _ => {
                let raw = self.prompt.ask("Path to .txt file containing URLs", None)?;
                let path = self.expand_user(&raw);
                if !path.is_file() {
                    let message = format!("File does not exist: {}", path.display());
                    return Err(CliError::Input(message));
                }
                load_urls_from_file(&path)?
            },
        };

        Ok(Some(urls))
    }

    fn fetch_one(
        &mut self,
        url: &str,
        output_dir: &Path,
        label: &str,
    ) -> Result<PathBuf, FetchError> {
        let fetcher = self.fetcher;
        let display = RefCell::new(ProgressDisplay::new(self.prompt.output_mut(), label));

        let result = fetcher.fetch(
            url,
            output_dir,
            &mut |progress| {
                if let Err(e) = display.borrow_mut().progress(progress) {
                    tracing::debug!(error = %e, "progress display failed");
                }
            },
            &mut |message| {
                if let Err(e) = display.borrow_mut().status(message) {
                    tracing::debug!(error = %e, "status display failed");
                }
            },
        );

        display.into_inner().close()?;
        result
    }

    /// Push a fresh download. Several targets go through a picker first;
    /// cancelling it or confirming an empty choice skips the upload.
    fn upload_download(&mut self, path: &Path, label: &str) -> Result<(), CliError> {
        if self.credentials.is_none() || !self.uploader.is_available() {
            self.prompt.say(&format!("{label} Saved: {}", path.display()))?;
            return Ok(());
        }

        let targets: Vec<String> = if self.targets.len() > 1 {
            match select_many(&mut self.picker, "Upload to which Tonies?", &self.targets)? {
                Some(chosen) if !chosen.is_empty() => chosen.into_iter().cloned().collect(),
                _ => {
                    self.prompt.say(&format!("{label} Upload skipped. Saved: {}", path.display()))?;
                    return Ok(());
                },
            }
        } else {
            self.targets.clone()
        };

        let prompt = &mut self.prompt;
        let uploaded = push_to_targets(
            self.uploader,
            path,
            &targets,
            None,
            self.credentials.as_ref(),
            &mut |message| say_quietly(prompt, message),
        )?;
        self.prompt.say(&format!("{label} Uploaded to {uploaded} Tonie(s)"))?;
        Ok(())
    }

    fn expand_user(&self, raw: &str) -> PathBuf {
        let raw = raw.trim();
        match (&self.home, raw.strip_prefix("~/")) {
            (Some(home), Some(rest)) => home.join(rest),
            (Some(home), None) if raw == "~" => home.clone(),
            _ => PathBuf::from(raw),
        }
    }
}

/// Status line from a collaborator callback, which cannot fail.
fn say_quietly<R: BufRead, W: Write>(prompt: &mut LinePrompt<R, W>, message: &str) {
    if let Err(e) = prompt.say(message) {
        tracing::debug!(error = %e, "status output failed");
    }
}
