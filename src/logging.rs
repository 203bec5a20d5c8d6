// File: ./src/logging.rs
// tracing setup shared by the binaries
use std::env;
use std::fs::{self, OpenOptions};
use std::path::Path;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// File-based logging for the TUI, which owns the terminal.
/// Default: WARN level, RUST_LOG override. Logs to `<dir>/<app_name>.log`.
/// If setup fails, prints a warning to stderr and continues without logging.
pub fn init_file(dir: &Path, app_name: &str) {
    if let Err(e) = init_file_inner(dir, app_name) {
        eprintln!("Warning: failed to set up file logging: {e}");
    }
}

/// WARN unless `spec` (RUST_LOG syntax) says otherwise, in either direction.
fn file_filter(spec: &str) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .parse_lossy(spec)
}

fn init_file_inner(dir: &Path, app_name: &str) -> anyhow::Result<()> {
    fs::create_dir_all(dir)?;
    let log_file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(dir.join(format!("{app_name}.log")))?;

    tracing_subscriber::fmt()
        .with_writer(log_file)
        .with_env_filter(file_filter(
            &env::var(EnvFilter::DEFAULT_ENV).unwrap_or_default(),
        ))
        .with_ansi(false)
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))?;
    Ok(())
}

/// Appends panic info to `<dir>/<app_name>_panic.log`, then runs the default hook.
pub fn install_panic_hook(dir: &Path, app_name: &str) {
    let path = dir.join(format!("{app_name}_panic.log"));
    let default_hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        use std::io::Write;
        if let Ok(mut file) = OpenOptions::new().create(true).append(true).open(&path) {
            let _ = writeln!(file, "PANIC: {:?}", info);
        }
        default_hook(info);
    }));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_file_creates_log_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("data");

        init_file(&nested, "hueloom-test");

        assert!(nested.join("hueloom-test.log").is_file());
    }

    #[test]
    fn rust_log_can_raise_or_lower_the_level() {
        assert_eq!(file_filter("").max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(file_filter("debug").max_level_hint(), Some(LevelFilter::DEBUG));
        assert_eq!(file_filter("error").max_level_hint(), Some(LevelFilter::ERROR));
    }
}
