// Interactive terminal loop
//
// One URL is processed to completion (success or failure) before the next
// is accepted; failures are reported and the loop re-prompts.

use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::downloader::models::{DownloadOptions, ProgressEvent};
use crate::downloader::traits::AudioFetcher;
use crate::finalize::{cleanup_temp_dir, place_artifact, FileOpener};

/// One parsed line of input at the URL prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Directive {
    Quit,
    Reprompt,
    Download(String),
}

pub fn parse_input(line: &str) -> Directive {
    let trimmed = line.trim();
    if trimmed.eq_ignore_ascii_case("q") {
        Directive::Quit
    } else if trimmed.is_empty() {
        Directive::Reprompt
    } else {
        Directive::Download(trimmed.to_string())
    }
}

/// Empty input maps to the default save directory.
pub fn resolve_destination(input: &str, default_dir: &Path) -> PathBuf {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default_dir.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

/// Create the chosen directory with parents. On failure, report and fall
/// back to the default directory, creating that best-effort too, so the
/// returned path has always been through a creation attempt.
pub fn ensure_destination(choice: PathBuf, default_dir: &Path) -> PathBuf {
    match std::fs::create_dir_all(&choice) {
        Ok(()) => choice,
        Err(e) => {
            eprintln!(
                "[Shell] Error creating directory {}: {}",
                choice.display(),
                e
            );
            let _ = std::fs::create_dir_all(default_dir);
            default_dir.to_path_buf()
        }
    }
}

/// Prompt loop: reads URLs until `q` or EOF.
pub fn run_shell<R: BufRead>(
    config: &AppConfig,
    fetcher: &dyn AudioFetcher,
    opener: &dyn FileOpener,
    input: &mut R,
) {
    loop {
        print!("\n[?] Enter YouTube URL (or 'q' to quit): ");
        flush();

        let line = match read_line(input) {
            Some(line) => line,
            None => break,
        };

        match parse_input(&line) {
            Directive::Quit => break,
            Directive::Reprompt => println!("No URL provided."),
            Directive::Download(url) => run_job(config, fetcher, opener, input, &url),
        }
    }
}

fn run_job<R: BufRead>(
    config: &AppConfig,
    fetcher: &dyn AudioFetcher,
    opener: &dyn FileOpener,
    input: &mut R,
    url: &str,
) {
    let options = DownloadOptions::new(config.temp_dir.clone());

    let mut on_progress = render_progress;
    let artifact = match fetcher.fetch_and_transcode(url, &options, &mut on_progress) {
        Ok(path) => path,
        Err(e) => {
            eprintln!("Error: {}", e);
            println!("Failed to download or convert to MP3.");
            return;
        }
    };

    println!("\nWhere would you like to save the MP3 file?");
    print!("Enter full path to the folder (or press Enter to use Documents): ");
    flush();
    let answer = read_line(input).unwrap_or_default();
    let save_dir = ensure_destination(
        resolve_destination(&answer, &config.default_save_dir),
        &config.default_save_dir,
    );

    match place_artifact(&artifact, &save_dir) {
        Ok(final_path) => {
            println!("\n[SUCCESS] MP3 saved to: {}", final_path.display());
            if let Err(e) = opener.open(&final_path) {
                eprintln!("[Shell] {}", e);
                println!("Could not move file or open it.");
            }
        }
        Err(e) => {
            eprintln!("[Shell] {}", e);
            println!("Could not move file or open it.");
        }
    }

    cleanup_temp_dir(&config.temp_dir);
}

fn render_progress(event: ProgressEvent) {
    match event {
        ProgressEvent::Downloading { percent } => {
            print!("\rDownloading: {:.1}%", percent);
            flush();
        }
        ProgressEvent::Converting => {
            println!("\nDownload finished. Converting to MP3 if needed...");
        }
        ProgressEvent::Error(msg) => {
            eprintln!("\nAn error occurred during download: {}", msg);
        }
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(_) => None,
    }
}

fn flush() {
    let _ = std::io::stdout().flush();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::downloader::errors::DownloadError;
    use std::cell::RefCell;
    use std::fs;
    use std::io::Cursor;

    struct FakeFetcher {
        calls: RefCell<u32>,
        fail: bool,
    }

    impl FakeFetcher {
        fn new() -> Self {
            Self {
                calls: RefCell::new(0),
                fail: false,
            }
        }

        fn failing() -> Self {
            Self {
                calls: RefCell::new(0),
                fail: true,
            }
        }
    }

    impl AudioFetcher for FakeFetcher {
        fn name(&self) -> &'static str {
            "fake"
        }

        fn fetch_and_transcode(
            &self,
            _url: &str,
            options: &DownloadOptions,
            on_progress: &mut dyn FnMut(ProgressEvent),
        ) -> Result<PathBuf, DownloadError> {
            *self.calls.borrow_mut() += 1;
            if self.fail {
                return Err(DownloadError::Unknown("boom".to_string()));
            }
            on_progress(ProgressEvent::Downloading { percent: 100.0 });
            on_progress(ProgressEvent::Converting);
            fs::create_dir_all(&options.output_dir).unwrap();
            let path = options.output_dir.join("Example Title.mp3");
            fs::write(&path, b"audio").unwrap();
            Ok(path)
        }
    }

    struct NullOpener;

    impl FileOpener for NullOpener {
        fn open(&self, _path: &Path) -> Result<(), DownloadError> {
            Ok(())
        }
    }

    fn test_config() -> (tempfile::TempDir, AppConfig) {
        let root = tempfile::tempdir().unwrap();
        let config = AppConfig::from_user_dirs()
            .with_temp_dir(root.path().join("yt_mp3_temp"))
            .with_default_save_dir(root.path().join("Documents"));
        (root, config)
    }

    #[test]
    fn test_parse_input_quit_any_case() {
        assert_eq!(parse_input("q\n"), Directive::Quit);
        assert_eq!(parse_input("Q\n"), Directive::Quit);
        assert_eq!(parse_input("  q  "), Directive::Quit);
    }

    #[test]
    fn test_parse_input_empty_reprompts() {
        assert_eq!(parse_input(""), Directive::Reprompt);
        assert_eq!(parse_input("   \n"), Directive::Reprompt);
    }

    #[test]
    fn test_parse_input_url() {
        assert_eq!(
            parse_input("https://youtu.be/example\n"),
            Directive::Download("https://youtu.be/example".to_string())
        );
    }

    #[test]
    fn test_resolve_destination_default_on_empty() {
        let default = Path::new("/home/user/Documents");
        assert_eq!(resolve_destination("\n", default), default);
        assert_eq!(
            resolve_destination("/data/music\n", default),
            PathBuf::from("/data/music")
        );
    }

    #[test]
    fn test_ensure_destination_falls_back_on_failure() {
        let (_root, config) = test_config();
        // A path under a regular file cannot be created
        let blocker = config.default_save_dir.parent().unwrap().join("blocker");
        fs::write(&blocker, b"x").unwrap();

        let chosen = ensure_destination(blocker.join("nested"), &config.default_save_dir);

        assert_eq!(chosen, config.default_save_dir);
        assert!(chosen.exists());
    }

    #[test]
    fn test_quit_without_downloading() {
        let (_root, config) = test_config();
        let fetcher = FakeFetcher::new();
        let mut input = Cursor::new(b"q\n".to_vec());

        run_shell(&config, &fetcher, &NullOpener, &mut input);

        assert_eq!(*fetcher.calls.borrow(), 0);
    }

    #[test]
    fn test_empty_input_reprompts_without_side_effects() {
        let (_root, config) = test_config();
        let fetcher = FakeFetcher::new();
        let mut input = Cursor::new(b"\n\nQ\n".to_vec());

        run_shell(&config, &fetcher, &NullOpener, &mut input);

        assert_eq!(*fetcher.calls.borrow(), 0);
        assert!(!config.temp_dir.exists());
    }

    #[test]
    fn test_end_to_end_into_default_destination() {
        let (_root, config) = test_config();
        let fetcher = FakeFetcher::new();
        // URL, then Enter at the save prompt, then quit
        let mut input = Cursor::new(b"https://youtu.be/example\n\nq\n".to_vec());

        run_shell(&config, &fetcher, &NullOpener, &mut input);

        assert_eq!(*fetcher.calls.borrow(), 1);
        let final_path = config.default_save_dir.join("Example Title.mp3");
        assert!(final_path.exists());
        // Temp dir was emptied by the move and then removed
        assert!(!config.temp_dir.exists());
    }

    #[test]
    fn test_failure_keeps_looping() {
        let (_root, config) = test_config();
        let fetcher = FakeFetcher::failing();
        let mut input = Cursor::new(b"https://youtu.be/a\nhttps://youtu.be/b\nq\n".to_vec());

        run_shell(&config, &fetcher, &NullOpener, &mut input);

        assert_eq!(*fetcher.calls.borrow(), 2);
    }

    #[test]
    fn test_eof_terminates_loop() {
        let (_root, config) = test_config();
        let fetcher = FakeFetcher::new();
        let mut input = Cursor::new(Vec::new());

        run_shell(&config, &fetcher, &NullOpener, &mut input);

        assert_eq!(*fetcher.calls.borrow(), 0);
    }
}
