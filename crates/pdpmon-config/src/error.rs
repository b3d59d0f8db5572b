//! Error types for settings store boundaries.
//!
//! # Design
//! - Typed transitions and typed collection writes never fail; errors only
//!   arise where free-form input (names, JSON payloads, seed files) enters.
//! - Keep messages constant and carry the offending input as fields.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Primary error type for settings operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// View name did not match a known settings or app view.
    #[error("invalid view name")]
    InvalidView {
        /// View name provided by the caller.
        value: String,
    },
    /// Flag key did not match a known feature flag.
    #[error("unknown feature flag")]
    UnknownFlag {
        /// Flag key provided by the caller.
        value: String,
    },
    /// Collection name did not match a known configuration collection.
    #[error("unknown configuration collection")]
    UnknownCollection {
        /// Collection name provided by the caller.
        value: String,
    },
    /// JSON payload was not an array.
    #[error("collection payload could not be decoded")]
    Decode {
        /// Collection the payload was destined for.
        collection: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Collection could not be rendered as JSON.
    #[error("collection could not be encoded")]
    Encode {
        /// Collection being encoded.
        collection: &'static str,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// Seed document was not valid JSON for a settings snapshot.
    #[error("seed document could not be parsed")]
    SeedParse {
        /// Path of the seed document.
        path: PathBuf,
        /// Source serde error.
        source: serde_json::Error,
    },
    /// File system operation failed.
    #[error("filesystem operation failed")]
    Io {
        /// Operation identifier.
        operation: &'static str,
        /// Path involved in the failure.
        path: PathBuf,
        /// Source IO error.
        source: io::Error,
    },
}

/// Convenience alias for settings results.
pub type ConfigResult<T> = Result<T, ConfigError>;
