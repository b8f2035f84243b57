//! File logging.
//!
//! The terminal belongs to the UI, so log records go to a file.

use std::io;
use std::path::Path;

use log::{LevelFilter, SetLoggerError};
use log4rs::append::file::FileAppender;
use log4rs::config::runtime::ConfigErrors;
use log4rs::config::{Appender, Config, Logger, Root};
use log4rs::encode::pattern::PatternEncoder;
use log4rs::Handle;
use thiserror::Error;

const PATTERN: &str = "{d(%Y-%m-%d %H:%M:%S)} {l} {t} - {m}{n}";

/// HTTP stack crates that are only interesting when something breaks.
const QUIET_TARGETS: [&str; 3] = ["hyper", "hyper_util", "rustls"];

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("Cannot open log file: {0}")]
    File(#[from] io::Error),
    #[error(transparent)]
    Config(#[from] ConfigErrors),
    #[error(transparent)]
    Logger(#[from] SetLoggerError),
}

fn config(path: &Path, level: LevelFilter) -> Result<Config, LoggingError> {
    let file = FileAppender::builder()
        .encoder(Box::new(PatternEncoder::new(PATTERN)))
        .build(path)?;

    let mut builder = Config::builder().appender(Appender::builder().build("file", Box::new(file)));
    for target in QUIET_TARGETS {
        builder = builder.logger(Logger::builder().build(target, level.min(LevelFilter::Warn)));
    }

    Ok(builder.build(Root::builder().appender("file").build(level))?)
}

/// Installs the global logger, appending to `path`.
pub fn init(path: &Path, level: LevelFilter) -> Result<Handle, LoggingError> {
    let handle = log4rs::init_config(config(path, level)?)?;
    Ok(handle)
}
