use serde::{Deserialize, Serialize};
use std::process::Command;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum ToolKind {
    Ffmpeg,
    YtDlp,
}

impl ToolKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolKind::Ffmpeg => "ffmpeg",
            ToolKind::YtDlp => "yt-dlp",
        }
    }

    fn version_flag(&self) -> &'static str {
        match self {
            // ffmpeg takes a single dash here
            ToolKind::Ffmpeg => "-version",
            ToolKind::YtDlp => "--version",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    pub kind: ToolKind,
    pub version: Option<String>,
    pub path: Option<String>,
    pub is_available: bool,
}

pub struct ToolManager;

impl ToolManager {
    pub fn new() -> Self {
        Self
    }

    pub fn get_tool_info(&self, kind: ToolKind) -> ToolInfo {
        let name = kind.as_str().to_string();
        let (path, version) = self.detect_tool(kind);

        ToolInfo {
            name,
            kind,
            version: version.clone(),
            path: path.clone(),
            is_available: path.is_some(),
        }
    }

    /// Startup probe for the transcoder. True iff a version query succeeds;
    /// spawn errors and non-zero exits both report unavailable.
    pub fn is_transcoder_available(&self) -> bool {
        self.get_version(ToolKind::Ffmpeg.as_str(), ToolKind::Ffmpeg)
            .is_some()
    }

    /// Resolved invocation path for a tool, falling back to the bare name
    /// so PATH lookup still gets a chance at spawn time.
    pub fn resolve_path(&self, kind: ToolKind) -> String {
        self.detect_tool(kind)
            .0
            .unwrap_or_else(|| kind.as_str().to_string())
    }

    fn detect_tool(&self, kind: ToolKind) -> (Option<String>, Option<String>) {
        let binary_name = kind.as_str();

        // 1. Try common install paths first
        let common_paths = [
            format!("/opt/homebrew/bin/{}", binary_name),
            format!("/usr/local/bin/{}", binary_name),
            format!("/usr/bin/{}", binary_name),
        ];

        for path in common_paths {
            if std::path::Path::new(&path).exists() {
                let version = self.get_version(&path, kind);
                return (Some(path), version);
            }
        }

        // 2. Try `which`
        if let Ok(output) = Command::new("which").arg(binary_name).output() {
            if output.status.success() {
                let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
                if !path.is_empty() {
                    let version = self.get_version(&path, kind);
                    return (Some(path), version);
                }
            }
        }

        // 3. Bare name on PATH, if it answers a version query at all
        if let Some(version) = self.get_version(binary_name, kind) {
            return (Some(binary_name.to_string()), version.into());
        }

        (None, None)
    }

    fn get_version(&self, path: &str, kind: ToolKind) -> Option<String> {
        match Command::new(path).arg(kind.version_flag()).output() {
            Ok(output) if output.status.success() => {
                let out = String::from_utf8_lossy(&output.stdout);
                // First line only; ffmpeg prints a whole build report
                Some(out.lines().next().unwrap_or("").trim().to_string())
            }
            _ => None,
        }
    }
}

impl Default for ToolManager {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        assert_eq!(ToolKind::Ffmpeg.as_str(), "ffmpeg");
        assert_eq!(ToolKind::YtDlp.as_str(), "yt-dlp");
    }

    #[test]
    fn test_version_flags() {
        assert_eq!(ToolKind::Ffmpeg.version_flag(), "-version");
        assert_eq!(ToolKind::YtDlp.version_flag(), "--version");
    }

    #[test]
    fn test_missing_binary_reports_unavailable() {
        let manager = ToolManager::new();
        let version = manager.get_version("yt2mp3-no-such-binary-on-any-system", ToolKind::YtDlp);
        assert!(version.is_none());
    }

    #[test]
    fn test_resolve_path_falls_back_to_bare_name() {
        // Whatever the system has installed, resolve_path never returns
        // an empty invocation target.
        let manager = ToolManager::new();
        assert!(!manager.resolve_path(ToolKind::YtDlp).is_empty());
    }
}
