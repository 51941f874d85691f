//! Cloud upload contract and target fan-out.

use std::path::Path;

use crate::{Credentials, EnvLookup, UploadError, env::non_empty};

const TARGET_IDS_VAR: &str = "TONIE_CREATIVE_TONIE_IDS";
const TARGET_ID_VAR: &str = "TONIE_CREATIVE_TONIE_ID";

/// One file going to one target.
#[derive(Debug, Clone, Copy)]
pub struct UploadRequest<'a> {
    /// Audio file.
    pub path: &'a Path,
    /// Target id; `None` lets the backend pick its default target.
    pub target: Option<&'a str>,
    /// Chapter title shown on the device.
    pub chapter_title: &'a str,
    /// Account to upload with.
    pub credentials: &'a Credentials,
}

/// Upload contract for a cloud backend.
pub trait Uploader {
    /// Whether the backend can be used at all in this build.
    fn is_available(&self) -> bool;

    /// Upload one file to one target.
    fn upload(
        &self,
        request: &UploadRequest<'_>,
        on_status: &mut dyn FnMut(&str),
    ) -> Result<(), UploadError>;
}

/// [`Uploader`] for builds without a cloud backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableUploader;

impl Uploader for UnavailableUploader {
    fn is_available(&self) -> bool {
        false
    }

    fn upload(
        &self,
        _request: &UploadRequest<'_>,
        _on_status: &mut dyn FnMut(&str),
    ) -> Result<(), UploadError> {
        Err(UploadError::Unavailable("no cloud backend in this build".to_string()))
    }
}

/// Configured target ids. `TONIE_CREATIVE_TONIE_IDS` (comma separated) wins
/// over the single `TONIE_CREATIVE_TONIE_ID`.
pub fn load_target_ids(env: EnvLookup<'_>) -> Vec<String> {
    if let Some(many) = non_empty(env, TARGET_IDS_VAR) {
        return many
            .split(',')
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect();
    }
    non_empty(env, TARGET_ID_VAR).into_iter().collect()
}

/// Upload `path` to every target in turn and return how many succeeded.
///
/// Returns `Ok(0)` without touching the file when there are no credentials
/// or the backend is unavailable. An empty target list means one upload to
/// the backend's default target. The chapter title defaults to the file
/// stem. A failing target is reported through `on_status` and skipped.
///
/// # Errors
///
/// [`UploadError::MissingFile`] if `path` does not exist.
pub fn push_to_targets(
    uploader: &dyn Uploader,
    path: &Path,
    targets: &[String],
    chapter_title: Option<&str>,
    credentials: Option<&Credentials>,
    on_status: &mut dyn FnMut(&str),
) -> Result<usize, UploadError> {
    let Some(credentials) = credentials else {
        tracing::info!("no cloud credentials, skipping upload");
        return Ok(0);
    };
    if !uploader.is_available() {
        tracing::info!("cloud backend unavailable, skipping upload");
        return Ok(0);
    }
    if !path.is_file() {
        return Err(UploadError::MissingFile(path.to_path_buf()));
    }

    let stem =
        path.file_stem().map(|stem| stem.to_string_lossy().into_owned()).unwrap_or_default();
    let chapter_title =
        chapter_title.map(str::trim).filter(|title| !title.is_empty()).unwrap_or(&stem);

    let targets: Vec<Option<&str>> = if targets.is_empty() {
        vec![None]
    } else {
        targets.iter().map(|id| Some(id.as_str())).collect()
    };

    let mut uploaded = 0;
    for target in targets {
        let request = UploadRequest { path, target, chapter_title, credentials };
        match uploader.upload(&request, on_status) {
            Ok(()) => uploaded += 1,
            Err(e) => {
                let target_id = target.unwrap_or("default");
                tracing::warn!(%target_id, error = %e, "upload failed");
                on_status(&format!("Upload to {} failed: {e}", target.unwrap_or("default target")));
            },
        }
    }

    Ok(uploaded)
}
