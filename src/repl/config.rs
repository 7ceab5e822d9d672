use std::{path::PathBuf, str::FromStr};

use thiserror::Error;
use tracing::Level;

/// Environment variable holding the log level (`error` through `trace`).
pub const LOG_ENV_VAR: &str = "INTERPRETER_LOG";

/// What to print for each line of input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReplMode {
    /// Print every token the lexer produces.
    Tokens,
    /// Print the parsed program, or the diagnostics if parsing failed.
    #[default]
    Parse,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub mode: ReplMode,
    /// Source file to run once. Reads stdin line by line when absent.
    pub file: Option<PathBuf>,
    pub log_level: Level,
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("unknown flag {0:?}, expected --tokens or --parse")]
    UnknownFlag(String),
    #[error("expected at most one source file, got {0:?} and {1:?}")]
    TooManyFiles(String, String),
}

impl Config {
    /// Builds a config from command-line arguments (without the program
    /// name) and an optional log level setting.
    pub fn from_args<I>(args: I, log_setting: Option<String>) -> Result<Config, ConfigError>
    where
        I: IntoIterator<Item = String>,
    {
        let mut mode = ReplMode::default();
        let mut file: Option<String> = None;

        for arg in args {
            if arg == "--tokens" {
                mode = ReplMode::Tokens;
            } else if arg == "--parse" {
                mode = ReplMode::Parse;
            } else if arg.starts_with("--") {
                return Err(ConfigError::UnknownFlag(arg));
            } else if let Some(existing) = file {
                return Err(ConfigError::TooManyFiles(existing, arg));
            } else {
                file = Some(arg);
            }
        }

        Ok(Config {
            mode,
            file: file.map(PathBuf::from),
            log_level: parse_log_level(log_setting.as_deref()),
        })
    }

    /// Same as [`Config::from_args`], reading the process arguments and
    /// [`LOG_ENV_VAR`].
    pub fn from_env() -> Result<Config, ConfigError> {
        Config::from_args(std::env::args().skip(1), std::env::var(LOG_ENV_VAR).ok())
    }
}

/// Unset or unrecognised settings fall back to `warn`.
pub fn parse_log_level(setting: Option<&str>) -> Level {
    setting
        .and_then(|value| Level::from_str(value.trim()).ok())
        .unwrap_or(Level::WARN)
}
