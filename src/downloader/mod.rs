// Downloader module - abstraction layer over the external extractor

pub mod backends;
pub mod errors;
pub mod locate;
pub mod models;
pub mod progress;
pub mod tools;
pub mod traits;

pub use backends::YtDlpFetcher;
pub use errors::DownloadError;
pub use locate::locate_artifact;
pub use models::{DownloadOptions, ProgressEvent, TrackInfo};
pub use tools::{ToolInfo, ToolKind, ToolManager};
pub use traits::AudioFetcher;
