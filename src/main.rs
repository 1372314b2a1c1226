use std::io::Write;
use std::process::Command;

use yt2mp3::config::AppConfig;
use yt2mp3::downloader::{ToolKind, ToolManager, YtDlpFetcher};
use yt2mp3::finalize::SystemOpener;
use yt2mp3::shell;

const BANNER: &str = r#"
        _   ___                 _____
  _   _| |_|__ \ _ __ ___  _ __|___ /
 | | | | __|  ) | '_ ` _ \| '_ \ |_ \
 | |_| | |_ / /_| | | | | | |_) |__) |
  \__, |\__|____|_| |_| |_| .__/____/
  |___/                   |_|
      YouTube to MP3 Converter
"#;

fn clear_console() {
    let _ = if cfg!(target_os = "windows") {
        Command::new("cmd").args(["/C", "cls"]).status()
    } else {
        Command::new("clear").status()
    };
}

fn wait_for_enter() {
    print!("\nPress Enter to exit...");
    let _ = std::io::stdout().flush();
    let mut line = String::new();
    let _ = std::io::stdin().read_line(&mut line);
}

fn main() {
    clear_console();
    println!("{}", BANNER);
    println!("Initializing...");

    let tools = ToolManager::new();
    if !tools.is_transcoder_available() {
        println!("\n[ERROR] FFmpeg not found!");
        println!("Please install FFmpeg and ensure it is in your PATH environment variable.");
        wait_for_enter();
        return;
    }

    for kind in [ToolKind::Ffmpeg, ToolKind::YtDlp] {
        let info = tools.get_tool_info(kind);
        match (&info.path, &info.version) {
            (Some(path), Some(version)) => {
                eprintln!("[Init] {} ({})", version, path);
            }
            _ => eprintln!("[Init] {} not found; downloads will fail until installed", info.name),
        }
    }

    let config = AppConfig::from_user_dirs();
    let fetcher = YtDlpFetcher::new();
    let opener = SystemOpener;

    let stdin = std::io::stdin();
    shell::run_shell(&config, &fetcher, &opener, &mut stdin.lock());
}
