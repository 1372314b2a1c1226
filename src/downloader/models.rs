// Common data models for the download pipeline

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Track metadata reported by the extractor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TrackInfo {
    pub id: String,
    pub title: String,
    pub uploader: String,
    /// Formatted as m:ss
    pub duration: String,
}

/// Options for one download job
#[derive(Debug, Clone)]
pub struct DownloadOptions {
    /// Directory the artifact is produced in (created with parents)
    pub output_dir: PathBuf,
    /// Target audio container/codec handed to the transcoder
    pub audio_format: String,
    /// Quality target handed to the transcoder, yt-dlp syntax
    pub audio_quality: String,
}

impl DownloadOptions {
    pub fn new(output_dir: PathBuf) -> Self {
        Self {
            output_dir,
            ..Self::default()
        }
    }
}

impl Default for DownloadOptions {
    fn default() -> Self {
        Self {
            output_dir: dirs::download_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("yt_mp3_temp"),
            audio_format: "mp3".to_string(),
            audio_quality: "320K".to_string(),
        }
    }
}

/// Progress reported while a job is running
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Raw stream is downloading; percent is 0.0..=100.0
    Downloading { percent: f32 },
    /// Raw download complete, transcoder hand-off begins
    Converting,
    /// Extractor reported an error line; the job itself may still fail later
    Error(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_target_mp3_320k() {
        let opts = DownloadOptions::default();
        assert_eq!(opts.audio_format, "mp3");
        assert_eq!(opts.audio_quality, "320K");
        assert!(opts.output_dir.ends_with("yt_mp3_temp"));
    }

    #[test]
    fn test_new_keeps_format_defaults() {
        let opts = DownloadOptions::new(PathBuf::from("/tmp/work"));
        assert_eq!(opts.output_dir, PathBuf::from("/tmp/work"));
        assert_eq!(opts.audio_format, "mp3");
    }
}
