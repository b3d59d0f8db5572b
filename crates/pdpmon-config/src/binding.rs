//! Read/write contract between the settings view layer and the store.
//!
//! # Design
//! - Views depend on this trait, never on the concrete store.
//! - Typed writes replace a whole collection and cannot fail.
//! - The JSON entry points exist for the tree editor. Any JSON array is
//!   stored as-is; only a non-array payload leaves the store untouched.

use pdpmon_events::{EventId, EventSubscriber};
use serde_json::Value;

use crate::collection::{decode, encode};
use crate::error::ConfigResult;
use crate::model::{
    AppView, AutomationProfile, CollectionKind, ControlId, FeatureFlag, InstrumentationSensor,
    SettingsView,
};

/// Binding adapter exposed by a settings store.
pub trait SettingsBinding {
    /// Settings sub-view currently active.
    fn current_view(&self) -> SettingsView;
    /// Transition to `target`. Every target is valid.
    fn set_view(&mut self, target: SettingsView);
    /// Top-level console view currently active.
    fn app_view(&self) -> AppView;
    /// Transition the console to `target`.
    fn set_app_view(&mut self, target: AppView);

    /// Snapshot of the instrumentation sensor descriptors.
    fn instrumentation_config(&self) -> Vec<InstrumentationSensor>;
    /// Replace every instrumentation sensor descriptor.
    fn update_instrumentation_config(&mut self, sensors: Vec<InstrumentationSensor>);
    /// Snapshot of the controls list.
    fn controls_list(&self) -> Vec<ControlId>;
    /// Replace the controls list.
    fn update_controls_list(&mut self, controls: Vec<ControlId>);
    /// Snapshot of the automation profiles.
    fn automation_profiles(&self) -> Vec<AutomationProfile>;
    /// Replace every automation profile.
    fn update_automation_profiles(&mut self, profiles: Vec<AutomationProfile>);

    /// Current value of `flag`.
    fn flag(&self, flag: FeatureFlag) -> bool;
    /// Set `flag` to `value`.
    fn toggle(&mut self, flag: FeatureFlag, value: bool);

    /// Subscribe to change notifications, replaying events newer than `since`.
    fn subscribe(&self, since: Option<EventId>) -> EventSubscriber;

    /// JSON rendering of a collection, as handed to the tree editor.
    ///
    /// # Errors
    ///
    /// Returns an encode error if a record cannot be represented as JSON.
    fn read_json(&self, collection: CollectionKind) -> ConfigResult<Value> {
        match collection {
            CollectionKind::Instrumentation => encode(&self.instrumentation_config()),
            CollectionKind::Controls => encode(&self.controls_list()),
            CollectionKind::Automation => encode(&self.automation_profiles()),
        }
    }

    /// Replace a collection from a tree-editor payload.
    ///
    /// # Errors
    ///
    /// Returns a decode error, leaving the collection untouched, if the payload
    /// is not a JSON array.
    fn write_json(&mut self, collection: CollectionKind, payload: Value) -> ConfigResult<()> {
        match collection {
            CollectionKind::Instrumentation => {
                let sensors = decode(payload)?;
                self.update_instrumentation_config(sensors);
            }
            CollectionKind::Controls => {
                let controls = decode(payload)?;
                self.update_controls_list(controls);
            }
            CollectionKind::Automation => {
                let profiles = decode(payload)?;
                self.update_automation_profiles(profiles);
            }
        }
        Ok(())
    }
}
