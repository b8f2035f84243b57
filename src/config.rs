//! Command-line and environment configuration.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use reqwest::Url;

use crate::api::DEFAULT_BASE_URL;
use crate::app::Screen;

/// Verbosity of the log file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Base address of the quiz API
    #[arg(long, env = "QUIZ_API_URL", default_value = DEFAULT_BASE_URL)]
    pub api_url: Url,

    /// Screen shown on start-up
    #[arg(long, value_enum, default_value_t = Screen::Quiz)]
    pub screen: Screen,

    /// File the log is written to
    #[arg(long, env = "QUIZ_LOG_FILE", default_value = "quiz-admin.log")]
    pub log_file: PathBuf,

    /// Log verbosity
    #[arg(long, env = "QUIZ_LOG_LEVEL", value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_flags() {
        let config = Config::try_parse_from([
            "quiz-admin",
            "--api-url",
            "http://quiz.internal:9000/api",
            "--screen",
            "create",
            "--log-file",
            "/tmp/quiz.log",
            "--log-level",
            "debug",
        ])
        .unwrap();

        assert_eq!(config.api_url.as_str(), "http://quiz.internal:9000/api");
        assert_eq!(config.screen, Screen::Create);
        assert_eq!(config.log_file, PathBuf::from("/tmp/quiz.log"));
        assert_eq!(LevelFilter::from(config.log_level), LevelFilter::Debug);
    }

    #[test]
    fn test_rejects_malformed_url() {
        assert!(Config::try_parse_from(["quiz-admin", "--api-url", "not a url"]).is_err());
    }

    #[test]
    fn test_rejects_unknown_screen() {
        assert!(Config::try_parse_from(["quiz-admin", "--screen", "lobby"]).is_err());
    }

    #[test]
    fn test_command_is_well_formed() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
