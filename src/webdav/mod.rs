//! WebDAV file transfer for instance folders such as `Impex`.
//!
//! # Overview
//!
//! - [`RemoteFileSystem`]: The file operations the SDK relies on
//! - [`WebDavClient`]: A reqwest implementation using the OCAPI bearer token
//! - [`RetryingFileSystem`]: Retry and token refresh around any implementation
//! - [`recursive_file_listing`] / [`recursive_folder_listing`]: Lazy tree walks
//! - [`upload_file`] / [`download_file`]: Local file transfers

mod client;
mod entry;
mod errors;
mod propfind;
mod retrying;
mod transfer;
mod walk;

use std::future::Future;

pub use client::{WebDavClient, WEBDAV_ROOT};
pub use entry::RemoteEntry;
pub use errors::WebDavError;
pub use retrying::RetryingFileSystem;
pub use transfer::{download_file, upload_bytes, upload_file};
pub use walk::{recursive_file_listing, recursive_folder_listing};

/// File operations on a remote tree, keyed by host-relative path.
pub trait RemoteFileSystem {
    /// Lists the entries directly inside `path`, excluding `path` itself.
    fn list(&self, path: &str) -> impl Future<Output = Result<Vec<RemoteEntry>, WebDavError>>;

    /// Returns the properties of `path`.
    fn info(&self, path: &str) -> impl Future<Output = Result<RemoteEntry, WebDavError>>;

    /// Writes `content` to `path`, replacing any existing file.
    fn upload(&self, path: &str, content: &[u8])
        -> impl Future<Output = Result<(), WebDavError>>;

    /// Reads the file at `path`.
    fn download(&self, path: &str) -> impl Future<Output = Result<Vec<u8>, WebDavError>>;

    /// Removes the file or folder at `path`.
    fn delete(&self, path: &str) -> impl Future<Output = Result<(), WebDavError>>;

    /// Moves `from` to `to`. Fails if `to` exists unless `overwrite` is set.
    fn move_to(
        &self,
        from: &str,
        to: &str,
        overwrite: bool,
    ) -> impl Future<Output = Result<(), WebDavError>>;

    /// Creates the folder `path`.
    fn make_dir(&self, path: &str) -> impl Future<Output = Result<(), WebDavError>>;
}
