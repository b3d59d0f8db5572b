//! Event payload types published by the settings store.

use chrono::{DateTime, Utc};

/// Identifier assigned to each event emitted by a bus.
pub type EventId = u64;

/// Default buffer size for the in-memory replay ring.
pub const DEFAULT_REPLAY_CAPACITY: usize = 256;

/// Typed store mutations surfaced to subscribers.
///
/// Identifiers are the machine-friendly names used by the store
/// (`instrumentation`, `controls.dock`, ...), so this crate stays independent
/// of the configuration model.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    /// The active settings sub-view changed.
    SettingsViewChanged {
        /// View that was active before the transition.
        from: String,
        /// View that is active now.
        to: String,
    },
    /// The top-level console view changed.
    AppViewChanged {
        /// View that was active before the transition.
        from: String,
        /// View that is active now.
        to: String,
    },
    /// A configuration collection was replaced in full.
    CollectionReplaced {
        /// Collection identifier.
        collection: String,
        /// Number of records after the replacement.
        len: usize,
    },
    /// A feature flag changed value.
    FlagToggled {
        /// Flag key.
        flag: String,
        /// Value after the toggle.
        value: bool,
    },
}

impl Event {
    /// Machine-friendly discriminator for log fields and filters.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::SettingsViewChanged { .. } => "settings_view_changed",
            Self::AppViewChanged { .. } => "app_view_changed",
            Self::CollectionReplaced { .. } => "collection_replaced",
            Self::FlagToggled { .. } => "flag_toggled",
        }
    }
}

/// Metadata wrapper around events. Each envelope tracks the event id and
/// emission timestamp.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
pub struct EventEnvelope {
    /// Sequential identifier, starting at 1 for each bus.
    pub id: EventId,
    /// Wall-clock time when the event was published.
    pub timestamp: DateTime<Utc>,
    /// The event payload.
    pub event: Event,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kind_matches_serde_tag() {
        let events = [
            Event::SettingsViewChanged {
                from: "main".into(),
                to: "controls".into(),
            },
            Event::AppViewChanged {
                from: "settings".into(),
                to: "dashboard".into(),
            },
            Event::CollectionReplaced {
                collection: "automation".into(),
                len: 0,
            },
            Event::FlagToggled {
                flag: "controls.dock".into(),
                value: true,
            },
        ];
        for event in events {
            let value = serde_json::to_value(&event).expect("serialize event");
            assert_eq!(value["type"], json!(event.kind()));
        }
    }

    #[test]
    fn flag_event_serializes_with_fields() {
        let event = Event::FlagToggled {
            flag: "feed_system.show".into(),
            value: false,
        };
        assert_eq!(
            serde_json::to_value(&event).expect("serialize event"),
            json!({"type": "flag_toggled", "flag": "feed_system.show", "value": false})
        );
    }
}
