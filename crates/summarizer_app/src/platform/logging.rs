//! Logger setup for the summarizer app.
//!
//! Tries the configured log file first, then a file in the system temp
//! directory. The outcome is reported on stderr outside the alternate screen.

use std::path::PathBuf;

use engine_logging::{engine_warn, LogDestination, LogSettings};

use super::config::AppConfig;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogSetup {
    Configured,
    Fallback { wanted: PathBuf, used: PathBuf },
    Disabled,
}

impl LogSetup {
    /// Message for stderr, if the user should know where logs went.
    pub fn notice(&self) -> Option<String> {
        match self {
            LogSetup::Configured => None,
            LogSetup::Fallback { wanted, used } => Some(format!(
                "Warning: could not write log file {}; logging to {} instead",
                wanted.display(),
                used.display()
            )),
            LogSetup::Disabled => {
                Some("Warning: no log file could be created; logging is disabled".to_string())
            }
        }
    }
}

pub fn initialize(config: &AppConfig) -> LogSetup {
    initialize_with(config, engine_logging::initialize)
}

fn initialize_with(
    config: &AppConfig,
    mut install: impl FnMut(&LogSettings) -> bool,
) -> LogSetup {
    if install(&config.log_settings()) {
        return LogSetup::Configured;
    }

    let fallback = config.fallback_log_settings();
    if !install(&fallback) {
        return LogSetup::Disabled;
    }

    let setup = LogSetup::Fallback {
        wanted: config.log_file.clone(),
        used: file_of(&fallback),
    };
    if let Some(notice) = setup.notice() {
        engine_warn!("{}", notice);
    }
    setup
}

fn file_of(settings: &LogSettings) -> PathBuf {
    match &settings.destination {
        LogDestination::File(path) | LogDestination::Both(path) => path.clone(),
        LogDestination::Terminal => PathBuf::new(),
    }
}
