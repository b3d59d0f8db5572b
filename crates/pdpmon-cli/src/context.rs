//! Shared error types and store bootstrap for CLI commands.

use std::fmt::{self, Display, Formatter};

use pdpmon_config::{ConfigError, SeedSource, SettingsStore};
use pdpmon_ui::PanelError;

use crate::cli::OutputFormat;

/// CLI-level error type to distinguish validation from operational failures.
#[derive(Debug)]
pub(crate) enum CliError {
    Validation(String),
    Failure(anyhow::Error),
}

/// Convenience alias for functions returning a `CliError`.
pub(crate) type CliResult<T> = Result<T, CliError>;

impl CliError {
    pub(crate) fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub(crate) fn failure(error: impl Into<anyhow::Error>) -> Self {
        Self::Failure(error.into())
    }

    pub(crate) const fn exit_code(&self) -> i32 {
        match self {
            Self::Validation(_) => 2,
            Self::Failure(_) => 3,
        }
    }

    pub(crate) fn display_message(&self) -> String {
        match self {
            Self::Validation(message) => message.clone(),
            Self::Failure(error) => format!("{error:#}"),
        }
    }

    /// Attribute the error to a line of session input.
    pub(crate) fn at_line(self, line: usize) -> Self {
        match self {
            Self::Validation(message) => Self::Validation(format!("line {line}: {message}")),
            Self::Failure(error) => Self::Failure(error.context(format!("line {line}"))),
        }
    }
}

impl Display for CliError {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        formatter.write_str("cli error")
    }
}

impl std::error::Error for CliError {}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidView { value } => Self::validation(format!(
                "invalid view name '{value}' (expected main, instrumentation, controls, automation)"
            )),
            ConfigError::UnknownFlag { value } => Self::validation(format!(
                "unknown feature flag '{value}' (expected instrumentation.graphs, controls.dock, controls.panel, feed_system.show)"
            )),
            ConfigError::UnknownCollection { value } => {
                Self::validation(format!("unknown configuration collection '{value}'"))
            }
            ConfigError::Decode { collection, source } => {
                Self::validation(format!("{collection} payload could not be decoded: {source}"))
            }
            other => {
                let path = match &other {
                    ConfigError::SeedParse { path, .. } | ConfigError::Io { path, .. } => {
                        Some(path.display().to_string())
                    }
                    _ => None,
                };
                let error = anyhow::Error::new(other);
                Self::Failure(match path {
                    Some(path) => error.context(format!("settings seed {path}")),
                    None => error,
                })
            }
        }
    }
}

impl From<PanelError> for CliError {
    fn from(err: PanelError) -> Self {
        match err {
            PanelError::NoSuchOption { index } => {
                Self::validation(format!("no settings option at index {index}"))
            }
            PanelError::NotAToggle { index } => {
                Self::validation(format!("settings option {index} has no switch"))
            }
            PanelError::NotOnMainPage { view } => Self::validation(format!(
                "option rows are only available on the main page (current view: {view})"
            )),
            PanelError::NoEditorMounted => {
                Self::validation("no collection editor is mounted; open a sub-view first")
            }
            PanelError::Config { source } => Self::from(source),
        }
    }
}

/// Execution context shared by command handlers.
#[derive(Debug, Clone)]
pub(crate) struct AppContext {
    pub(crate) seed: SeedSource,
    pub(crate) output: OutputFormat,
}

impl AppContext {
    /// Build a store from the configured seed.
    pub(crate) fn open_store(&self) -> CliResult<SettingsStore> {
        let snapshot = self.seed.load()?;
        Ok(SettingsStore::new(snapshot))
    }
}
