//! Transfers between local files and a [`RemoteFileSystem`].

use std::path::Path;

use crate::webdav::{RemoteFileSystem, WebDavError};

/// Uploads the local file at `local` to `remote`.
///
/// # Errors
///
/// Returns [`WebDavError::LocalFile`] if the file cannot be read, or the
/// upload error.
pub async fn upload_file<F: RemoteFileSystem>(
    fs: &F,
    local: &Path,
    remote: &str,
) -> Result<(), WebDavError> {
    let content = tokio::fs::read(local)
        .await
        .map_err(|e| local_error(local, &e))?;
    tracing::debug!(local = %local.display(), remote, bytes = content.len(), "Uploading file");
    fs.upload(remote, &content).await
}

/// Downloads `remote` into the local file at `local`, replacing it.
///
/// # Errors
///
/// Returns the download error, or [`WebDavError::LocalFile`] if the file
/// cannot be written.
pub async fn download_file<F: RemoteFileSystem>(
    fs: &F,
    remote: &str,
    local: &Path,
) -> Result<(), WebDavError> {
    let content = fs.download(remote).await?;
    tokio::fs::write(local, &content)
        .await
        .map_err(|e| local_error(local, &e))?;
    tracing::debug!(local = %local.display(), remote, bytes = content.len(), "Downloaded file");
    Ok(())
}

/// Uploads `content` as `file_name` inside the remote folder `remote_dir`.
///
/// # Errors
///
/// Returns the upload error.
pub async fn upload_bytes<F: RemoteFileSystem>(
    fs: &F,
    content: &[u8],
    remote_dir: &str,
    file_name: &str,
) -> Result<(), WebDavError> {
    let remote = format!("{}/{file_name}", remote_dir.trim_end_matches('/'));
    fs.upload(&remote, content).await
}

fn local_error(path: &Path, error: &std::io::Error) -> WebDavError {
    WebDavError::LocalFile {
        path: path.display().to_string(),
        reason: error.to_string(),
    }
}
