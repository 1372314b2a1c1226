// yt-dlp backend
//
// Two-call pattern: a --dump-json metadata probe first, then the download
// run with line-streamed progress. The probe gives us the reported title,
// which the locator needs once post-processing has renamed the file.

use std::io::{BufRead, BufReader};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use crate::downloader::errors::DownloadError;
use crate::downloader::locate::locate_artifact;
use crate::downloader::models::{DownloadOptions, ProgressEvent, TrackInfo};
use crate::downloader::progress::parse_progress_line;
use crate::downloader::tools::{ToolKind, ToolManager};
use crate::downloader::traits::AudioFetcher;

pub struct YtDlpFetcher {
    ytdlp_path: String,
}

impl YtDlpFetcher {
    pub fn new() -> Self {
        Self {
            ytdlp_path: ToolManager::new().resolve_path(ToolKind::YtDlp),
        }
    }

    /// Pin the binary explicitly instead of probing the system.
    pub fn with_binary(path: impl Into<String>) -> Self {
        Self {
            ytdlp_path: path.into(),
        }
    }

    fn probe_metadata(&self, url: &str) -> Result<TrackInfo, DownloadError> {
        let output = Command::new(&self.ytdlp_path)
            .args(["--dump-json", "--no-playlist", "--no-warnings", url])
            .output()
            .map_err(|e| DownloadError::ToolNotFound(format!("yt-dlp: {}", e)))?;

        if !output.status.success() {
            let error = String::from_utf8_lossy(&output.stderr);
            return Err(error.to_string().into());
        }

        parse_track_info(&output.stdout)
    }

    fn build_download_args(&self, url: &str, options: &DownloadOptions) -> Vec<String> {
        vec![
            "-f".to_string(),
            "bestaudio".to_string(),
            "--no-playlist".to_string(),
            "--no-warnings".to_string(),
            "--newline".to_string(),
            "-P".to_string(),
            options.output_dir.to_string_lossy().to_string(),
            // Default yt-dlp template appends " [id]" — override to keep
            // the name locatable by title
            "-o".to_string(),
            "%(title)s.%(ext)s".to_string(),
            "-x".to_string(),
            "--audio-format".to_string(),
            options.audio_format.clone(),
            "--audio-quality".to_string(),
            options.audio_quality.clone(),
            url.to_string(),
        ]
    }

    /// Run the download, feeding each stdout line through the progress
    /// parser. stderr is drained on a collector thread so neither pipe can
    /// fill up and deadlock the child.
    fn run_download(
        &self,
        args: &[String],
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<(), DownloadError> {
        let mut child = Command::new(&self.ytdlp_path)
            .args(args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| DownloadError::ToolNotFound(format!("yt-dlp: {}", e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| DownloadError::ExecutionError("Failed to capture stderr".to_string()))?;

        let stderr_handle = std::thread::spawn(move || {
            let reader = BufReader::new(stderr);
            let mut lines = Vec::new();
            for line in reader.lines().map_while(Result::ok) {
                lines.push(line);
            }
            lines.join("\n")
        });

        let reader = BufReader::new(stdout);
        for line in reader.lines().map_while(Result::ok) {
            if let Some(event) = parse_progress_line(&line) {
                on_progress(event);
            }
        }

        let status = child
            .wait()
            .map_err(|e| DownloadError::ExecutionError(format!("Process error: {}", e)))?;
        let stderr_output = stderr_handle.join().unwrap_or_default();

        if status.success() {
            Ok(())
        } else if stderr_output.is_empty() {
            Err(DownloadError::ExecutionError(format!(
                "yt-dlp exited with {}",
                status
            )))
        } else {
            Err(stderr_output.into())
        }
    }
}

impl Default for YtDlpFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioFetcher for YtDlpFetcher {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    fn fetch_and_transcode(
        &self,
        url: &str,
        options: &DownloadOptions,
        on_progress: &mut dyn FnMut(ProgressEvent),
    ) -> Result<PathBuf, DownloadError> {
        std::fs::create_dir_all(&options.output_dir).map_err(|e| {
            DownloadError::ExecutionError(format!(
                "Failed to create {}: {}",
                options.output_dir.display(),
                e
            ))
        })?;

        let info = self.probe_metadata(url)?;
        eprintln!(
            "[YtDlp] {} — {} ({})",
            info.title, info.uploader, info.duration
        );

        let args = self.build_download_args(url, options);
        self.run_download(&args, on_progress)?;

        locate_artifact(&options.output_dir, &info.title)
            .ok_or(DownloadError::ArtifactMissing(info.title))
    }
}

fn parse_track_info(stdout: &[u8]) -> Result<TrackInfo, DownloadError> {
    let json_str = String::from_utf8_lossy(stdout);
    let json: serde_json::Value = serde_json::from_str(&json_str)
        .map_err(|e| DownloadError::ParseError(format!("Invalid JSON: {}", e)))?;

    let duration_secs = json["duration"].as_f64().unwrap_or(0.0) as i64;
    let minutes = duration_secs / 60;
    let seconds = duration_secs % 60;

    Ok(TrackInfo {
        id: json["id"].as_str().unwrap_or("").to_string(),
        title: json["title"].as_str().unwrap_or("audio").to_string(),
        uploader: json["uploader"].as_str().unwrap_or("Unknown").to_string(),
        duration: format!("{}:{:02}", minutes, seconds),
    })
}
