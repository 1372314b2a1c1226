// Locates the MP3 an extraction run actually produced
//
// The extractor's reported output path is not reliable once post-processing
// has renamed and transcoded the file (extension changes, sanitized titles).

use std::path::{Path, PathBuf};

/// Resolve the artifact for a reported title:
///
/// 1. `<out_dir>/<title>.mp3` if it exists.
/// 2. Otherwise the first `*.mp3` in lexical order whose file name contains
///    the first 10 characters of the title.
///
/// The fallback is a best-effort heuristic: two titles sharing a 10-char
/// prefix can resolve to the wrong file. Lexical ordering keeps the outcome
/// deterministic; the matching itself is intentionally left this loose.
pub fn locate_artifact(out_dir: &Path, title: &str) -> Option<PathBuf> {
    let candidate = out_dir.join(format!("{}.mp3", title));
    if candidate.exists() {
        return Some(candidate);
    }

    let prefix: String = title.chars().take(10).collect();

    let mut mp3s: Vec<PathBuf> = std::fs::read_dir(out_dir)
        .ok()?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.extension()
                .map(|ext| ext.eq_ignore_ascii_case("mp3"))
                .unwrap_or(false)
        })
        .collect();
    mp3s.sort();

    mp3s.into_iter().find(|path| {
        path.file_name()
            .map(|name| name.to_string_lossy().contains(&prefix))
            .unwrap_or(false)
    })
}
