//! Progress reporting for paginated runs.

use std::fmt;

use indicatif::{ProgressBar, ProgressStyle};

use crate::pagination::PaginatorError;

const TEMPLATE: &str = "{bar:40} {pos}/{len} [{elapsed_precise}<{eta_precise}]";

/// A progress bar counting hits as pages arrive.
///
/// Cloning yields another handle to the same bar, so a caller can write
/// messages while a stream borrows the paginator.
#[derive(Clone)]
pub struct Progress {
    bar: ProgressBar,
    visible: bool,
}

impl Progress {
    /// Creates a visible or hidden progress bar.
    #[must_use]
    pub fn new(visible: bool) -> Self {
        if visible {
            Self::visible()
        } else {
            Self::hidden()
        }
    }

    /// Creates a progress bar drawn to stderr.
    #[must_use]
    pub fn visible() -> Self {
        let bar = ProgressBar::new(0);
        bar.set_style(
            ProgressStyle::with_template(TEMPLATE).unwrap_or_else(|_| ProgressStyle::default_bar()),
        );
        Self { bar, visible: true }
    }

    /// Creates a progress bar that counts but never draws.
    #[must_use]
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            visible: false,
        }
    }

    /// Returns `true` if the bar is drawn.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Sets the expected number of hits.
    pub fn set_total(&self, total: u64) {
        self.bar.set_length(total);
    }

    /// Records `hits` more hits.
    pub fn advance(&self, hits: u64) {
        self.bar.inc(hits);
    }

    /// Closes the bar. Later calls are no-ops.
    pub fn finish(&self) {
        if !self.bar.is_finished() {
            self.bar.finish();
        }
    }

    /// Returns `true` once [`finish`](Self::finish) has been called.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.bar.is_finished()
    }

    /// Returns the number of hits recorded.
    #[must_use]
    pub fn position(&self) -> u64 {
        self.bar.position()
    }

    /// Returns the expected number of hits, if known.
    #[must_use]
    pub fn total(&self) -> Option<u64> {
        self.bar.length()
    }

    /// Prints a message above the bar.
    ///
    /// # Errors
    ///
    /// Returns [`PaginatorError::ProgressHidden`] if the bar is hidden.
    pub fn write(&self, message: impl AsRef<str>) -> Result<(), PaginatorError> {
        if !self.visible {
            return Err(PaginatorError::ProgressHidden);
        }
        self.bar.println(message);
        Ok(())
    }
}

impl fmt::Debug for Progress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Progress")
            .field("visible", &self.visible)
            .field("position", &self.position())
            .field("total", &self.total())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hidden_progress_rejects_write() {
        let progress = Progress::hidden();
        assert!(matches!(
            progress.write("hello"),
            Err(PaginatorError::ProgressHidden)
        ));
    }

    #[test]
    fn test_visible_progress_accepts_write() {
        let progress = Progress::visible();
        assert!(progress.write("hello").is_ok());
        progress.finish();
    }

    #[test]
    fn test_hidden_progress_still_counts() {
        let progress = Progress::new(false);
        progress.set_total(10);
        progress.advance(4);
        progress.advance(3);

        assert_eq!(progress.position(), 7);
        assert_eq!(progress.total(), Some(10));
    }

    #[test]
    fn test_clones_share_state() {
        let progress = Progress::hidden();
        let handle = progress.clone();
        progress.advance(2);
        handle.finish();

        assert_eq!(handle.position(), 2);
        assert!(progress.is_finished());
    }

    #[test]
    fn test_finish_twice_is_noop() {
        let progress = Progress::hidden();
        progress.finish();
        progress.finish();
        assert!(progress.is_finished());
    }
}
