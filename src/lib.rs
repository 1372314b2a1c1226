pub mod config;
pub mod downloader;
pub mod finalize;
pub mod shell;

pub use config::AppConfig;
pub use downloader::{AudioFetcher, DownloadError, YtDlpFetcher};
pub use finalize::{FileOpener, SystemOpener};
