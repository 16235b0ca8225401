//! Remote file and folder metadata.

use serde::{Deserialize, Serialize};

/// A file or folder on the WebDAV server, as reported by PROPFIND.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteEntry {
    /// Host-relative, percent-decoded path.
    pub path: String,
    /// Display name, or the last path segment when the server sends none.
    pub name: String,
    /// `true` for collections.
    pub is_dir: bool,
    /// Content length in bytes. Folders have none.
    pub size: Option<u64>,
    /// `getlastmodified`, as sent.
    pub modified: Option<String>,
    /// `creationdate`, as sent.
    pub created: Option<String>,
    /// `getcontenttype`.
    pub content_type: Option<String>,
    /// `getetag`.
    pub etag: Option<String>,
}

impl RemoteEntry {
    pub(crate) fn finish(mut self) -> Self {
        if self.name.is_empty() {
            self.name = self
                .path
                .trim_end_matches('/')
                .rsplit('/')
                .next()
                .unwrap_or_default()
                .to_string();
        }
        self
    }

    /// Returns `true` if this entry describes `path`, ignoring a trailing `/`.
    #[must_use]
    pub fn is_path(&self, path: &str) -> bool {
        normalize(&self.path) == normalize(path)
    }
}

pub(crate) fn normalize(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    format!("/{trimmed}")
}
