//! Typed settings models: views, collection records, flags and snapshots.
//!
//! # Design
//! - Pure data carriers used by the store and the panel.
//! - Records wrap the JSON written by the tree editor; any element shape is
//!   stored and handed back untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::fmt;
use std::str::FromStr;

use crate::defaults::default_instrumentation;
use crate::error::ConfigError;

/// Settings sub-view currently mounted in the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SettingsView {
    /// Navigation page listing every settings section.
    #[default]
    Main,
    /// Instrumentation sensor configuration editor.
    Instrumentation,
    /// Controls list editor.
    Controls,
    /// Automation profile editor.
    Automation,
}

impl SettingsView {
    /// Every settings view, in navigation order.
    pub const ALL: [Self; 4] = [
        Self::Main,
        Self::Instrumentation,
        Self::Controls,
        Self::Automation,
    ];

    /// Render the view as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::Instrumentation => "instrumentation",
            Self::Controls => "controls",
            Self::Automation => "automation",
        }
    }

    /// Collection edited by this view, if any.
    #[must_use]
    pub const fn collection(self) -> Option<CollectionKind> {
        match self {
            Self::Main => None,
            Self::Instrumentation => Some(CollectionKind::Instrumentation),
            Self::Controls => Some(CollectionKind::Controls),
            Self::Automation => Some(CollectionKind::Automation),
        }
    }
}

impl fmt::Display for SettingsView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for SettingsView {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::InvalidView {
                value: s.to_string(),
            })
    }
}

/// Top-level console view. The settings page returns to the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppView {
    /// Live instrumentation dashboard.
    Dashboard,
    /// Settings panel.
    #[default]
    Settings,
}

impl AppView {
    /// Every app view.
    pub const ALL: [Self; 2] = [Self::Dashboard, Self::Settings];

    /// Render the view as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for AppView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for AppView {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|view| view.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::InvalidView {
                value: s.to_string(),
            })
    }
}

/// Named configuration collections owned by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CollectionKind {
    /// Instrumentation sensor descriptors.
    Instrumentation,
    /// Control identifiers.
    Controls,
    /// Automation profiles.
    Automation,
}

impl CollectionKind {
    /// Every collection.
    pub const ALL: [Self; 3] = [Self::Instrumentation, Self::Controls, Self::Automation];

    /// Render the collection as its lowercase string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Instrumentation => "instrumentation",
            Self::Controls => "controls",
            Self::Automation => "automation",
        }
    }

    /// Settings view that edits this collection.
    #[must_use]
    pub const fn view(self) -> SettingsView {
        match self {
            Self::Instrumentation => SettingsView::Instrumentation,
            Self::Controls => SettingsView::Controls,
            Self::Automation => SettingsView::Automation,
        }
    }
}

impl fmt::Display for CollectionKind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.as_str())
    }
}

impl FromStr for CollectionKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| ConfigError::UnknownCollection {
                value: s.to_string(),
            })
    }
}

/// Descriptor for one instrumentation channel shown on the dashboard.
///
/// The record is held as the raw JSON the editor produced. Field accessors
/// return `None` when a key is missing or holds another JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InstrumentationSensor(Value);

impl InstrumentationSensor {
    /// Displayed graph channel for `key`, typed by its prefix.
    #[must_use]
    pub fn graph(key: &str, label: &str, size: u32) -> Self {
        let sensor_type = key.split('_').next().unwrap_or(key);
        Self(json!({
            "label": label,
            "key": key,
            "type": sensor_type,
            "display": true,
            "visualizationType": "graph",
            "size": size,
        }))
    }

    /// Human-readable title.
    #[must_use]
    pub fn label(&self) -> Option<&str> {
        text_field(&self.0, "label")
    }

    /// Key of the channel in the instrumentation data frame (e.g. `P_INJECTOR`).
    #[must_use]
    pub fn key(&self) -> Option<&str> {
        text_field(&self.0, "key")
    }

    /// Measurement type code (`P`, `T`, `L`).
    #[must_use]
    pub fn sensor_type(&self) -> Option<&str> {
        text_field(&self.0, "type")
    }

    /// Whether the channel is shown.
    #[must_use]
    pub fn display(&self) -> Option<bool> {
        self.0.get("display").and_then(Value::as_bool)
    }

    /// Visualization kind (e.g. `graph`).
    #[must_use]
    pub fn visualization_type(&self) -> Option<&str> {
        text_field(&self.0, "visualizationType")
    }

    /// Grid width of the visualization.
    #[must_use]
    pub fn size(&self) -> Option<u64> {
        self.0.get("size").and_then(Value::as_u64)
    }

    /// Borrow the record as JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for InstrumentationSensor {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Identifier of a remotely actuated control.
///
/// Normally a JSON string; any other JSON value is kept as written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ControlId(Value);

impl ControlId {
    /// Identifier text, if the record is a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        self.0.as_str()
    }

    /// Borrow the record as JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<&str> for ControlId {
    fn from(value: &str) -> Self {
        Self(Value::from(value))
    }
}

impl From<String> for ControlId {
    fn from(value: String) -> Self {
        Self(Value::from(value))
    }
}

impl From<Value> for ControlId {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl fmt::Display for ControlId {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.0 {
            Value::String(id) => formatter.write_str(id),
            other => write!(formatter, "{other}"),
        }
    }
}

/// Named automation sequence, held as the raw JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AutomationProfile(Value);

impl AutomationProfile {
    /// Profile name.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        text_field(&self.0, "name")
    }

    /// Free-form description.
    #[must_use]
    pub fn description(&self) -> Option<&str> {
        text_field(&self.0, "description")
    }

    /// Borrow the record as JSON.
    #[must_use]
    pub const fn as_value(&self) -> &Value {
        &self.0
    }
}

impl From<Value> for AutomationProfile {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

fn text_field<'a>(record: &'a Value, name: &str) -> Option<&'a str> {
    record.get(name).and_then(Value::as_str)
}

/// Boolean UI feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FeatureFlag {
    /// Show instrumentation graphs.
    InstrumentationGraphs,
    /// Dock the controls strip.
    ControlsDock,
    /// Show the controls panel.
    ControlsPanel,
    /// Show the feed system panel.
    FeedSystemShow,
}

impl FeatureFlag {
    /// Every flag.
    pub const ALL: [Self; 4] = [
        Self::InstrumentationGraphs,
        Self::ControlsDock,
        Self::ControlsPanel,
        Self::FeedSystemShow,
    ];

    /// Dotted key of the flag within the UI configuration tree.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::InstrumentationGraphs => "instrumentation.graphs",
            Self::ControlsDock => "controls.dock",
            Self::ControlsPanel => "controls.panel",
            Self::FeedSystemShow => "feed_system.show",
        }
    }
}

impl fmt::Display for FeatureFlag {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.key())
    }
}

impl FromStr for FeatureFlag {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim();
        Self::ALL
            .into_iter()
            .find(|flag| flag.key() == key)
            .ok_or_else(|| ConfigError::UnknownFlag {
                value: s.to_string(),
            })
    }
}

/// Instrumentation display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct InstrumentationUi {
    /// Render graphs for instrumentation channels.
    pub graphs: bool,
}

/// Controls display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsUi {
    /// Dock the controls strip.
    pub dock: bool,
    /// Show the controls panel.
    pub panel: bool,
}

/// Feed system display toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSystemUi {
    /// Show the feed system panel.
    pub show: bool,
}

/// Tree of UI feature flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfiguration {
    /// Instrumentation toggles.
    pub instrumentation: InstrumentationUi,
    /// Controls toggles.
    pub controls: ControlsUi,
    /// Feed system toggles.
    pub feed_system: FeedSystemUi,
}

impl UiConfiguration {
    /// Current value of `flag`.
    #[must_use]
    pub const fn get(&self, flag: FeatureFlag) -> bool {
        match flag {
            FeatureFlag::InstrumentationGraphs => self.instrumentation.graphs,
            FeatureFlag::ControlsDock => self.controls.dock,
            FeatureFlag::ControlsPanel => self.controls.panel,
            FeatureFlag::FeedSystemShow => self.feed_system.show,
        }
    }

    /// Set `flag` to `value`, returning the previous value.
    pub const fn set(&mut self, flag: FeatureFlag, value: bool) -> bool {
        let slot = match flag {
            FeatureFlag::InstrumentationGraphs => &mut self.instrumentation.graphs,
            FeatureFlag::ControlsDock => &mut self.controls.dock,
            FeatureFlag::ControlsPanel => &mut self.controls.panel,
            FeatureFlag::FeedSystemShow => &mut self.feed_system.show,
        };
        std::mem::replace(slot, value)
    }
}

/// Serializable aggregate of every collection and flag.
///
/// Missing sections take their defaults when deserialized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SettingsSnapshot {
    /// Instrumentation sensor descriptors.
    pub instrumentation: Vec<InstrumentationSensor>,
    /// Control identifiers.
    pub controls: Vec<ControlId>,
    /// Automation profiles.
    pub automation: Vec<AutomationProfile>,
    /// UI feature flags.
    pub ui: UiConfiguration,
}

impl Default for SettingsSnapshot {
    fn default() -> Self {
        Self {
            instrumentation: default_instrumentation(),
            controls: Vec::new(),
            automation: Vec::new(),
            ui: UiConfiguration::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_names_round_trip_through_from_str() {
        for view in SettingsView::ALL {
            assert_eq!(view.as_str().parse::<SettingsView>().ok(), Some(view));
        }
        assert_eq!(
            "DASHBOARD".parse::<AppView>().ok(),
            Some(AppView::Dashboard)
        );
        assert!(matches!(
            "graphs".parse::<SettingsView>(),
            Err(ConfigError::InvalidView { value }) if value == "graphs"
        ));
    }

    #[test]
    fn views_map_to_collections() {
        assert_eq!(SettingsView::Main.collection(), None);
        for kind in CollectionKind::ALL {
            assert_eq!(kind.view().collection(), Some(kind));
        }
    }

    #[test]
    fn flag_keys_parse_back() {
        for flag in FeatureFlag::ALL {
            assert_eq!(flag.key().parse::<FeatureFlag>().ok(), Some(flag));
        }
        assert!(matches!(
            "controls.undock".parse::<FeatureFlag>(),
            Err(ConfigError::UnknownFlag { .. })
        ));
    }

    #[test]
    fn ui_configuration_set_returns_previous() {
        let mut ui = UiConfiguration::default();
        assert!(!ui.set(FeatureFlag::ControlsDock, true));
        assert!(ui.get(FeatureFlag::ControlsDock));
        assert!(!ui.get(FeatureFlag::ControlsPanel));
        assert!(ui.set(FeatureFlag::ControlsDock, false));
    }

    #[test]
    fn sensor_preserves_unknown_keys() {
        let raw = json!({
            "label": "Injector Pressure",
            "key": "P_INJECTOR",
            "type": "P",
            "visualizationType": "graph",
            "colour": "red"
        });
        let sensor: InstrumentationSensor =
            serde_json::from_value(raw.clone()).expect("decode sensor");
        assert_eq!(sensor.sensor_type(), Some("P"));
        assert_eq!(sensor.display(), None);
        assert_eq!(sensor.as_value()["colour"], "red");
        assert_eq!(serde_json::to_value(&sensor).expect("encode sensor"), raw);
    }

    #[test]
    fn mistyped_fields_are_kept_and_read_as_absent() {
        let raw = json!({"key": "P_X", "size": 6.5, "display": "yes", "label": null});
        let sensor: InstrumentationSensor =
            serde_json::from_value(raw.clone()).expect("decode sensor");
        assert_eq!(sensor.key(), Some("P_X"));
        assert_eq!(sensor.size(), None);
        assert_eq!(sensor.display(), None);
        assert_eq!(sensor.label(), None);
        assert_eq!(serde_json::to_value(&sensor).expect("encode sensor"), raw);

        let control: ControlId = serde_json::from_value(json!({"id": "MEV"})).expect("control");
        assert_eq!(control.as_str(), None);
        assert_eq!(control.to_string(), r#"{"id":"MEV"}"#);
    }

    #[test]
    fn graph_channel_takes_type_from_key_prefix() {
        let sensor = InstrumentationSensor::graph("T_POST_COMB", "Post Comb Chmbr. Temp", 4);
        assert_eq!(sensor.sensor_type(), Some("T"));
        assert_eq!(sensor.display(), Some(true));
        assert_eq!(sensor.size(), Some(4));
    }

    #[test]
    fn snapshot_fills_missing_sections_with_defaults() {
        let raw = json!({"controls": ["N2OF"], "ui": {"controls": {"dock": true}}});
        let snapshot: SettingsSnapshot = serde_json::from_value(raw).expect("decode snapshot");
        assert_eq!(snapshot.controls, vec![ControlId::from("N2OF")]);
        assert!(snapshot.ui.controls.dock);
        assert!(!snapshot.ui.controls.panel);
        assert_eq!(snapshot.instrumentation, default_instrumentation());
        assert!(snapshot.automation.is_empty());
    }
}
