//! Ordered record collections with replace-whole semantics.

use std::fmt;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ConfigError, ConfigResult};
use crate::model::{AutomationProfile, CollectionKind, ControlId, InstrumentationSensor};

/// Record type stored in a [`ConfigurationCollection`].
pub trait Record: Clone + fmt::Debug + PartialEq + Serialize + DeserializeOwned {
    /// Collection this record type belongs to.
    const KIND: CollectionKind;
}

impl Record for InstrumentationSensor {
    const KIND: CollectionKind = CollectionKind::Instrumentation;
}

impl Record for ControlId {
    const KIND: CollectionKind = CollectionKind::Controls;
}

impl Record for AutomationProfile {
    const KIND: CollectionKind = CollectionKind::Automation;
}

/// Ordered sequence of records. Edits replace the whole sequence; there is
/// no element-level patching.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigurationCollection<T> {
    records: Vec<T>,
}

impl<T: Record> ConfigurationCollection<T> {
    /// Wrap an initial record sequence.
    #[must_use]
    pub const fn new(records: Vec<T>) -> Self {
        Self { records }
    }

    /// Owned copy of the current records.
    #[must_use]
    pub fn snapshot(&self) -> Vec<T> {
        self.records.clone()
    }

    /// Borrow the current records.
    #[must_use]
    pub fn as_slice(&self) -> &[T] {
        &self.records
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection holds no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Replace every record at once, returning the previous sequence.
    pub fn replace(&mut self, records: Vec<T>) -> Vec<T> {
        std::mem::replace(&mut self.records, records)
    }
}

impl<T> Default for ConfigurationCollection<T> {
    fn default() -> Self {
        Self {
            records: Vec::new(),
        }
    }
}

/// Render records as a JSON array.
///
/// # Errors
///
/// Returns [`ConfigError::Encode`] if a record cannot be represented as JSON.
pub fn encode<T: Record>(records: &[T]) -> ConfigResult<Value> {
    serde_json::to_value(records).map_err(|source| ConfigError::Encode {
        collection: T::KIND.as_str(),
        source,
    })
}

/// Decode a JSON payload into a full record sequence.
///
/// # Errors
///
/// Returns [`ConfigError::Decode`] if the payload is not a JSON array. Array
/// elements are accepted whatever their shape.
pub fn decode<T: Record>(payload: Value) -> ConfigResult<Vec<T>> {
    serde_json::from_value(payload).map_err(|source| ConfigError::Decode {
        collection: T::KIND.as_str(),
        source,
    })
}
