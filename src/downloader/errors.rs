// Error types for the download pipeline

use std::fmt;

#[derive(Debug, Clone)]
pub enum DownloadError {
    /// Network timeout while talking to the video host
    NetworkTimeout,

    /// The host refused the request (429, bot detection, 403)
    Blocked,

    /// yt-dlp or ffmpeg not found on this system
    ToolNotFound(String),

    /// URL rejected by the extractor
    InvalidUrl(String),

    /// Failed to parse yt-dlp JSON output
    ParseError(String),

    /// Subprocess could not be spawned or driven
    ExecutionError(String),

    /// Extraction reported success but no MP3 could be located
    ArtifactMissing(String),

    /// Unknown error with details
    Unknown(String),
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NetworkTimeout => write!(f, "Network timeout: the video host is not responding"),
            Self::Blocked => write!(
                f,
                "The video host is refusing requests from this address.\n\
                 This usually resolves on its own; try again later or from\n\
                 a different network."
            ),
            Self::ToolNotFound(tool) => write!(f, "Tool not found: {}", tool),
            Self::InvalidUrl(url) => write!(f, "Invalid URL: {}", url),
            Self::ParseError(msg) => write!(f, "Parse error: {}", msg),
            Self::ExecutionError(msg) => write!(f, "Execution error: {}", msg),
            Self::ArtifactMissing(title) => {
                write!(f, "No MP3 found in the output directory for \"{}\"", title)
            }
            Self::Unknown(msg) => write!(f, "Unknown error: {}", msg),
        }
    }
}

impl std::error::Error for DownloadError {}

// Classify raw subprocess stderr into typed variants
impl From<String> for DownloadError {
    fn from(s: String) -> Self {
        let lower = s.to_lowercase();

        if lower.contains("timeout") || lower.contains("timed out") {
            return Self::NetworkTimeout;
        }

        if lower.contains("429")
            || lower.contains("403")
            || lower.contains("forbidden")
            || lower.contains("bot")
            || lower.contains("blocked")
        {
            return Self::Blocked;
        }

        if lower.contains("not found")
            || lower.contains("no such file")
            || lower.contains("command not found")
        {
            return Self::ToolNotFound(s);
        }

        if lower.contains("unsupported url")
            || lower.contains("invalid url")
            || lower.contains("is not a valid url")
        {
            return Self::InvalidUrl(s);
        }

        if lower.contains("json") || lower.contains("parse") {
            return Self::ParseError(s);
        }

        Self::Unknown(s)
    }
}
