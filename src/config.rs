// Process-wide path configuration
//
// Resolved once at startup and passed explicitly, so components never read
// the environment ad hoc and tests can point everything at temp dirs.

use std::path::PathBuf;

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Working directory downloads land in before relocation
    pub temp_dir: PathBuf,
    /// Destination used when the user accepts the default at the save prompt
    pub default_save_dir: PathBuf,
}

impl AppConfig {
    /// Resolve from the user's home layout: work happens under
    /// `~/Downloads/yt_mp3_temp`, the default destination is `~/Documents`.
    pub fn from_user_dirs() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            temp_dir: dirs::download_dir()
                .unwrap_or_else(|| home.join("Downloads"))
                .join("yt_mp3_temp"),
            default_save_dir: dirs::document_dir().unwrap_or_else(|| home.join("Documents")),
        }
    }

    pub fn with_temp_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.temp_dir = dir.into();
        self
    }

    pub fn with_default_save_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.default_save_dir = dir.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builders_override_paths() {
        let config = AppConfig::from_user_dirs()
            .with_temp_dir("/tmp/work")
            .with_default_save_dir("/tmp/out");
        assert_eq!(config.temp_dir, PathBuf::from("/tmp/work"));
        assert_eq!(config.default_save_dir, PathBuf::from("/tmp/out"));
    }

    #[test]
    fn test_temp_dir_is_namespaced() {
        let config = AppConfig::from_user_dirs();
        assert!(config.temp_dir.ends_with("yt_mp3_temp"));
    }
}
