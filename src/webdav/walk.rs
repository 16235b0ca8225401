//! Recursive directory walkers over a [`RemoteFileSystem`].

use futures::future;
use futures::stream::{self, LocalBoxStream, StreamExt};

use crate::webdav::{RemoteEntry, RemoteFileSystem, WebDavError};

/// Streams every file below `path`, depth first.
///
/// Files of a folder come before the contents of its subfolders. Folders
/// are listed only when the stream reaches them. A listing error is yielded
/// in place of that folder's contents.
///
/// ```rust,ignore
/// use futures::StreamExt;
/// use salesforce_ocapi::webdav::recursive_file_listing;
///
/// let mut files = recursive_file_listing(&dav, "/on/demandware.servlet/webdav/Sites/Impex");
/// while let Some(file) = files.next().await {
///     println!("{}", file?.path);
/// }
/// ```
pub fn recursive_file_listing<'a, F: RemoteFileSystem>(
    fs: &'a F,
    path: impl Into<String>,
) -> LocalBoxStream<'a, Result<RemoteEntry, WebDavError>> {
    let path = path.into();
    stream::once(async move { fs.list(&path).await })
        .flat_map(move |listing| match listing {
            Ok(entries) => {
                let (folders, files): (Vec<_>, Vec<_>) =
                    entries.into_iter().partition(|entry| entry.is_dir);
                let nested = stream::iter(folders)
                    .flat_map(move |folder| recursive_file_listing(fs, folder.path));
                stream::iter(files.into_iter().map(Ok))
                    .chain(nested)
                    .boxed_local()
            }
            Err(error) => stream::once(future::ready(Err(error))).boxed_local(),
        })
        .boxed_local()
}

/// Streams every folder below `path`.
///
/// All folders of one level are yielded before descending into each.
pub fn recursive_folder_listing<'a, F: RemoteFileSystem>(
    fs: &'a F,
    path: impl Into<String>,
) -> LocalBoxStream<'a, Result<RemoteEntry, WebDavError>> {
    let path = path.into();
    stream::once(async move { fs.list(&path).await })
        .flat_map(move |listing| match listing {
            Ok(entries) => {
                let folders: Vec<RemoteEntry> =
                    entries.into_iter().filter(|entry| entry.is_dir).collect();
                let nested = stream::iter(folders.clone())
                    .flat_map(move |folder| recursive_folder_listing(fs, folder.path));
                stream::iter(folders.into_iter().map(Ok))
                    .chain(nested)
                    .boxed_local()
            }
            Err(error) => stream::once(future::ready(Err(error))).boxed_local(),
        })
        .boxed_local()
}
