use std::fs::{self, OpenOptions};
use std::path::PathBuf;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

/// Environment variable holding the log filter (e.g. `darkroom=debug`)
pub const LOG_ENV: &str = "DARKROOM_LOG";

/// Where the TUI writes its log: `<data_local_dir>/darkroom/darkroom.log`
pub fn log_file_path() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("darkroom")
        .join("darkroom.log")
}

fn filter() -> EnvFilter {
    EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"))
}

/// CLI mode: log to stderr. Stdout stays reserved for command output.
pub fn init_stderr() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_writer(std::io::stderr)
        .try_init();
}

/// TUI mode: the terminal belongs to ratatui, so log to a file.
/// Logging is best-effort; failure to open the file disables it.
pub fn init_file() -> Option<PathBuf> {
    let path = log_file_path();
    if let Some(dir) = path.parent() {
        fs::create_dir_all(dir).ok()?;
    }
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .ok()?;
    tracing_subscriber::fmt()
        .with_env_filter(filter())
        .with_ansi(false)
        .with_writer(Mutex::new(file))
        .try_init()
        .ok()?;
    Some(path)
}
