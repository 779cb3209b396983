use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing_subscriber::{filter, fmt::writer::BoxMakeWriter, prelude::*};

use super::config::Config;

pub const LOG_FILE_NAME: &str = "promo-upload.log";

pub fn log_file_path(dir: &Path) -> PathBuf {
    dir.join(LOG_FILE_NAME)
}

/// Creates the log directory if needed and truncates the log file.
pub fn open_log_file(dir: &Path) -> io::Result<File> {
    fs::create_dir_all(dir)?;
    File::create(log_file_path(dir))
}

/// Installs a file-backed tracing subscriber. The terminal belongs to the
/// UI, so nothing is logged to stdout.
///
/// Returns the path of the log file.
pub fn setup_logger(config: &Config) -> Result<PathBuf, Box<dyn std::error::Error>> {
    let file = open_log_file(&config.log_dir)?;
    let writer = BoxMakeWriter::new(Arc::new(file));

    let file_log = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_file(false);

    tracing_subscriber::registry()
        .with(
            file_log
                .with_filter(config.log_level)
                .with_filter(filter::filter_fn(|metadata| {
                    !metadata.target().starts_with("hyper")
                        && !metadata.target().starts_with("reqwest")
                        && !metadata.target().starts_with("rustls")
                        && !metadata.target().starts_with("mio")
                })),
        )
        .try_init()?;

    Ok(log_file_path(&config.log_dir))
}
