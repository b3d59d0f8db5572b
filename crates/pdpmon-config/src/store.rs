//! In-memory settings store implementing [`SettingsBinding`].
//!
//! # Design
//! - One store per console session; view state resets to `main` on creation.
//! - Every state change publishes exactly one event on the store's own bus.
//! - View transitions and flag writes that leave the value unchanged publish
//!   nothing; collection replacements always publish.

use pdpmon_events::{Event, EventBus, EventId, EventSubscriber};
use tracing::debug;

use crate::binding::SettingsBinding;
use crate::collection::{ConfigurationCollection, Record};
use crate::model::{
    AppView, AutomationProfile, ControlId, FeatureFlag, InstrumentationSensor, SettingsSnapshot,
    SettingsView, UiConfiguration,
};

/// Settings store owning view state, collections, flags and the change bus.
pub struct SettingsStore {
    settings_view: SettingsView,
    app_view: AppView,
    instrumentation: ConfigurationCollection<InstrumentationSensor>,
    controls: ConfigurationCollection<ControlId>,
    automation: ConfigurationCollection<AutomationProfile>,
    ui: UiConfiguration,
    events: EventBus,
}

impl SettingsStore {
    /// Build a store seeded from `seed` with a fresh event bus.
    #[must_use]
    pub fn new(seed: SettingsSnapshot) -> Self {
        Self::with_bus(seed, EventBus::new())
    }

    /// Build a store seeded from `seed` that publishes on `events`.
    #[must_use]
    pub fn with_bus(seed: SettingsSnapshot, events: EventBus) -> Self {
        let SettingsSnapshot {
            instrumentation,
            controls,
            automation,
            ui,
        } = seed;
        Self {
            settings_view: SettingsView::default(),
            app_view: AppView::default(),
            instrumentation: ConfigurationCollection::new(instrumentation),
            controls: ConfigurationCollection::new(controls),
            automation: ConfigurationCollection::new(automation),
            ui,
            events,
        }
    }

    /// Copy of every collection and flag.
    #[must_use]
    pub fn snapshot(&self) -> SettingsSnapshot {
        SettingsSnapshot {
            instrumentation: self.instrumentation.snapshot(),
            controls: self.controls.snapshot(),
            automation: self.automation.snapshot(),
            ui: self.ui,
        }
    }

    /// Current UI flag tree.
    #[must_use]
    pub const fn ui_configuration(&self) -> &UiConfiguration {
        &self.ui
    }

    /// Bus the store publishes on.
    #[must_use]
    pub const fn events(&self) -> &EventBus {
        &self.events
    }
}

impl Default for SettingsStore {
    fn default() -> Self {
        Self::new(SettingsSnapshot::default())
    }
}

fn replace_collection<T: Record>(
    collection: &mut ConfigurationCollection<T>,
    events: &EventBus,
    records: Vec<T>,
) {
    let previous = collection.replace(records).len();
    let len = collection.len();
    let id = events.publish(Event::CollectionReplaced {
        collection: T::KIND.as_str().to_string(),
        len,
    });
    debug!(
        event_id = id,
        collection = T::KIND.as_str(),
        previous,
        len,
        "collection replaced"
    );
}

impl SettingsBinding for SettingsStore {
    fn current_view(&self) -> SettingsView {
        self.settings_view
    }

    fn set_view(&mut self, target: SettingsView) {
        let from = std::mem::replace(&mut self.settings_view, target);
        if from == target {
            return;
        }
        let id = self.events.publish(Event::SettingsViewChanged {
            from: from.as_str().to_string(),
            to: target.as_str().to_string(),
        });
        debug!(event_id = id, %from, to = %target, "settings view changed");
    }

    fn app_view(&self) -> AppView {
        self.app_view
    }

    fn set_app_view(&mut self, target: AppView) {
        let from = std::mem::replace(&mut self.app_view, target);
        if from == target {
            return;
        }
        let id = self.events.publish(Event::AppViewChanged {
            from: from.as_str().to_string(),
            to: target.as_str().to_string(),
        });
        debug!(event_id = id, %from, to = %target, "app view changed");
    }

    fn instrumentation_config(&self) -> Vec<InstrumentationSensor> {
        self.instrumentation.snapshot()
    }

    fn update_instrumentation_config(&mut self, sensors: Vec<InstrumentationSensor>) {
        replace_collection(&mut self.instrumentation, &self.events, sensors);
    }

    fn controls_list(&self) -> Vec<ControlId> {
        self.controls.snapshot()
    }

    fn update_controls_list(&mut self, controls: Vec<ControlId>) {
        replace_collection(&mut self.controls, &self.events, controls);
    }

    fn automation_profiles(&self) -> Vec<AutomationProfile> {
        self.automation.snapshot()
    }

    fn update_automation_profiles(&mut self, profiles: Vec<AutomationProfile>) {
        replace_collection(&mut self.automation, &self.events, profiles);
    }

    fn flag(&self, flag: FeatureFlag) -> bool {
        self.ui.get(flag)
    }

    fn toggle(&mut self, flag: FeatureFlag, value: bool) {
        if self.ui.set(flag, value) == value {
            return;
        }
        let id = self.events.publish(Event::FlagToggled {
            flag: flag.key().to_string(),
            value,
        });
        debug!(event_id = id, flag = flag.key(), value, "feature flag toggled");
    }

    fn subscribe(&self, since: Option<EventId>) -> EventSubscriber {
        self.events.subscribe(since)
    }
}
