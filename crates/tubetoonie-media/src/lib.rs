//! Media collaborators for Tubetoonie.
//!
//! Fetching audio from a video page, pushing it to cloud targets, and
//! resolving the credentials for that. Also the small input helpers the
//! shell needs around them.
//!
//! # Components
//!
//! - [`MediaFetcher`]: fetch contract; [`YtDlpFetcher`] drives the external
//!   extraction tool
//! - [`Uploader`]: upload contract; [`push_to_targets`] fans one file out
//! - [`resolve_credentials`]: explicit, then environment, then [`SecureStore`];
//!   [`CommandSecureStore`] reads the host's Keychain or Secret Service
//! - [`normalize_youtube_url`], [`parse_urls_from_text`], [`format_bytes`]
//!   and friends: pure helpers
//!
//! Library code never reads the process environment directly; it takes an
//! [`EnvLookup`] so callers and tests decide where values come from.

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod credentials;
mod env;
mod error;
mod fetch;
mod format;
mod inputs;
mod progress;
mod upload;
mod youtube;

pub use credentials::{
    CommandSecureStore, Credentials, NoSecureStore, PASSWORD_KEY, SERVICE_NAME, SecretTool,
    SecureStore, USERNAME_KEY, resolve_credentials,
};
pub use env::{EnvLookup, process_env};
pub use error::{FetchError, UploadError};
pub use fetch::{
    COOKIE_FILE_VAR, COOKIES_FROM_BROWSER_VAR, FetchOptions, MediaFetcher, PLAYER_CLIENT_VAR,
    YtDlpFetcher, find_latest_mp3, prepare_output_dir,
};
pub use format::{format_bytes, format_speed, parse_percent};
pub use inputs::{load_urls_from_file, parse_urls_from_text, resolve_urls};
pub use progress::{DownloadProgress, ProgressEvent, parse_progress_line};
pub use upload::{
    UnavailableUploader, UploadRequest, Uploader, load_target_ids, push_to_targets,
};
pub use youtube::normalize_youtube_url;
