// Parses yt-dlp `--newline` output into progress events
//
// Representative lines:
// [download]   6.2% of ~ 343.72MiB at  420.30KiB/s ETA 12:32
// [download] 100% of 3.45MiB in 00:02
// [ExtractAudio] Destination: /tmp/yt_mp3_temp/Title.mp3
// ERROR: unable to download video data

use regex::Regex;

use super::models::ProgressEvent;

/// Map one output line to a progress event, if it carries one.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    lazy_static::lazy_static! {
        static ref PROGRESS_RE: Regex =
            Regex::new(r"\[download\]\s+(\d+\.?\d*)%").unwrap();
        static ref EXTRACT_RE: Regex = Regex::new(r"\[ExtractAudio\]").unwrap();
        static ref ALREADY_RE: Regex = Regex::new(r"has already been downloaded").unwrap();
    }

    if let Some(caps) = PROGRESS_RE.captures(line) {
        let percent: f32 = caps.get(1)?.as_str().parse().ok()?;
        return Some(ProgressEvent::Downloading { percent });
    }

    if EXTRACT_RE.is_match(line) {
        return Some(ProgressEvent::Converting);
    }

    if ALREADY_RE.is_match(line) {
        return Some(ProgressEvent::Downloading { percent: 100.0 });
    }

    if let Some(msg) = line.strip_prefix("ERROR:") {
        return Some(ProgressEvent::Error(msg.trim().to_string()));
    }

    None
}
