use std::fs::{self, OpenOptions};
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::config;

/// Send logs to a file; the terminal belongs to the UI.
///
/// `BGMDECK_LOG` overrides `log.level`. Without a usable log file the
/// program runs without logging.
pub fn init(settings: &config::Settings) {
    let Some(path) = settings.log_file_path() else {
        return;
    };
    if let Some(dir) = path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    let file = match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("bgmdeck: cannot open log file {}: {e}", path.display());
            return;
        }
    };

    let filter = EnvFilter::try_from_env("BGMDECK_LOG")
        .unwrap_or_else(|_| EnvFilter::new(&settings.log.level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .try_init();
}
