use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config::LoggingSettings;

/// Install the global subscriber writing to `settings.file`.
///
/// Without a file nothing is installed: stdout and stderr belong to the TUI.
pub fn init(settings: &LoggingSettings) -> Result<(), Box<dyn std::error::Error>> {
    let Some(path) = settings.file.as_deref() else {
        return Ok(());
    };

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let file = OpenOptions::new().create(true).append(true).open(path)?;

    let filter =
        EnvFilter::try_from_env("SPINDLE_LOG").or_else(|_| EnvFilter::try_new(&settings.level))?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init()
        .map_err(|e| e.to_string())?;

    Ok(())
}
