//! Error types for panel interactions.

use pdpmon_config::{ConfigError, SettingsView};
use thiserror::Error;

/// Errors raised when a panel interaction cannot be applied.
#[derive(Debug, Error)]
pub enum PanelError {
    /// Option index did not address a row on the main page.
    #[error("no settings option at index")]
    NoSuchOption {
        /// Index supplied by the caller.
        index: usize,
    },
    /// Switch interaction targeted a navigation row.
    #[error("settings option is not a toggle")]
    NotAToggle {
        /// Index supplied by the caller.
        index: usize,
    },
    /// Option rows were addressed while a collection editor is mounted.
    #[error("option rows are only available on the main page")]
    NotOnMainPage {
        /// View currently mounted.
        view: SettingsView,
    },
    /// Editor interaction attempted while the main page is mounted.
    #[error("no collection editor is mounted")]
    NoEditorMounted,
    /// Store rejected a binding call.
    #[error("settings store operation failed")]
    Config {
        /// Source store error.
        #[from]
        source: ConfigError,
    },
}

/// Convenience alias for panel results.
pub type PanelResult<T> = Result<T, PanelError>;
