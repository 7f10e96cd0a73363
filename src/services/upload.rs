//! Upload pipeline
//!
//! Reads dictionary files, base64-encodes them and pushes them to the
//! server one at a time. A name conflict asks the user before resubmitting
//! with `overwrite = true`.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::api::{DictionaryService, UploadOutcome};
use crate::error::{ApiError, ApiResult};
use crate::logic::errors::user_message;
use crate::logic::formatting::format_count;

/// Asks the user whether an existing dictionary may be replaced
#[async_trait]
pub trait ConfirmOverwrite: Send + Sync {
    async fn confirm_overwrite(&self, filename: &str) -> bool;
}

#[derive(Debug)]
pub enum FileOutcome {
    Uploaded,
    /// Conflict and the user said no
    Declined,
    Failed(ApiError),
}

#[derive(Debug)]
pub struct FileResult {
    pub filename: String,
    pub outcome: FileOutcome,
}

#[derive(Debug)]
pub struct UploadReport {
    pub files: Vec<FileResult>,
    /// More than one file: no per-file alerts, one tally at the end
    pub batch: bool,
}

impl UploadReport {
    pub fn success_count(&self) -> usize {
        self.files
            .iter()
            .filter(|f| matches!(f.outcome, FileOutcome::Uploaded))
            .count()
    }

    /// Alert (title, message) to show once the upload is done, if any
    pub fn message(&self) -> Option<(String, String)> {
        if self.batch {
            let count = self.success_count();
            return (count > 0).then(|| {
                (
                    "Upload".to_string(),
                    format!("{} uploaded", format_count(count)),
                )
            });
        }

        let file = self.files.first()?;
        match &file.outcome {
            FileOutcome::Uploaded => Some((
                "Upload".to_string(),
                format!("{} uploaded", file.filename),
            )),
            FileOutcome::Declined => None,
            FileOutcome::Failed(err) => Some((
                "Upload failed".to_string(),
                user_message(&format!("Could not upload {}", file.filename), err),
            )),
        }
    }
}

/// Split the upload prompt into files.
///
/// Tokens are separated by whitespace; tokens containing `*`, `?` or `[`
/// are glob patterns. A leading `~/` expands to the home directory.
pub fn expand_upload_inputs(input: &str) -> ApiResult<Vec<PathBuf>> {
    let mut paths: Vec<PathBuf> = Vec::new();

    for token in input.split_whitespace() {
        let token = expand_home(token);

        if token.contains(|c: char| matches!(c, '*' | '?' | '[')) {
            let entries = glob::glob(&token)
                .map_err(|e| ApiError::InvalidInput(format!("Invalid pattern {}: {}", token, e)))?;

            let mut matched: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .filter(|path| path.is_file())
                .collect();
            if matched.is_empty() {
                return Err(ApiError::InvalidInput(format!("No files match {}", token)));
            }
            matched.sort();
            for path in matched {
                if !paths.contains(&path) {
                    paths.push(path);
                }
            }
        } else {
            let path = PathBuf::from(token);
            if !paths.contains(&path) {
                paths.push(path);
            }
        }
    }

    if paths.is_empty() {
        return Err(ApiError::InvalidInput(
            "Enter at least one file path.".to_string(),
        ));
    }
    Ok(paths)
}

fn expand_home(token: &str) -> String {
    if let Some(rest) = token.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest).to_string_lossy().into_owned();
        }
    }
    token.to_string()
}

/// Name the file is uploaded under
pub fn upload_name(path: &Path) -> ApiResult<String> {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .ok_or_else(|| ApiError::InvalidInput(format!("{} is not a file", path.display())))
}

/// File content in standard base64
pub async fn encode_file(path: &Path) -> ApiResult<String> {
    let bytes = tokio::fs::read(path).await?;
    Ok(STANDARD.encode(bytes))
}

/// Upload one file, handling a name conflict through `confirm`
pub async fn upload_one(
    service: &dyn DictionaryService,
    path: &Path,
    confirm: &dyn ConfirmOverwrite,
) -> FileResult {
    let filename = match upload_name(path) {
        Ok(name) => name,
        Err(e) => {
            return FileResult {
                filename: path.display().to_string(),
                outcome: FileOutcome::Failed(e),
            }
        }
    };

    let outcome = match encode_file(path).await {
        Ok(content) => upload_content(service, &filename, &content, confirm).await,
        Err(e) => FileOutcome::Failed(e),
    };

    FileResult { filename, outcome }
}

async fn upload_content(
    service: &dyn DictionaryService,
    filename: &str,
    content: &str,
    confirm: &dyn ConfirmOverwrite,
) -> FileOutcome {
    match service.upload(filename, content, false).await {
        Ok(UploadOutcome::Uploaded) => FileOutcome::Uploaded,
        Ok(UploadOutcome::Conflict) => {
            if !confirm.confirm_overwrite(filename).await {
                tracing::debug!("Overwrite of {} declined", filename);
                return FileOutcome::Declined;
            }
            match service.upload(filename, content, true).await {
                Ok(UploadOutcome::Uploaded) => FileOutcome::Uploaded,
                Ok(UploadOutcome::Conflict) => FileOutcome::Failed(ApiError::Conflict),
                Err(e) => FileOutcome::Failed(e),
            }
        }
        Err(e) => FileOutcome::Failed(e),
    }
}

/// Upload `paths` sequentially. A failed file never stops the batch.
pub async fn run_upload(
    service: &dyn DictionaryService,
    paths: &[PathBuf],
    confirm: &dyn ConfirmOverwrite,
) -> UploadReport {
    let batch = paths.len() > 1;
    let mut files = Vec::with_capacity(paths.len());

    for path in paths {
        let result = upload_one(service, path, confirm).await;
        match &result.outcome {
            FileOutcome::Uploaded => tracing::info!("Uploaded {}", result.filename),
            FileOutcome::Declined => {}
            FileOutcome::Failed(e) => tracing::warn!("Upload of {} failed: {}", result.filename, e),
        }
        files.push(result);
    }

    UploadReport { files, batch }
}
