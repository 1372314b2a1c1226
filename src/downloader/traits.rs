// Fetcher boundary trait definition

use std::path::PathBuf;

use super::errors::DownloadError;
use super::models::{DownloadOptions, ProgressEvent};

/// The external-system boundary: fetches the best audio stream for a URL
/// and hands it to the transcoder, producing an MP3 under
/// `options.output_dir`. Implementations report progress through
/// `on_progress` and return the resolved artifact path.
///
/// Test shells substitute a fake for this trait; nothing else in the crate
/// talks to the network or the extractor directly.
pub trait AudioFetcher {
    /// Name of the fetcher (for logging)
    fn name(&self) -> &'static str;

    fn fetch_and_transcode(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<PathBuf, DownloadError>;
}
