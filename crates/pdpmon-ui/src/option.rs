//! Settings option rows shown on the main page.
//!
//! # Design
//! - A row either navigates to a sub-view or owns a switch bound to a flag.
//! - Switch state is local to the mounted row, seeded from the store and
//!   written back through the binding on every change.

use pdpmon_config::{FeatureFlag, SettingsBinding, SettingsView};

/// Elevation of a row while the pointer rests elsewhere.
pub const RESTING_ELEVATION: u8 = 0;
/// Elevation of a row while the pointer is over it.
pub const HOVER_ELEVATION: u8 = 1;

/// What a settings option does.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionAction {
    /// Open a settings sub-view.
    Navigate(SettingsView),
    /// Switch a feature flag.
    Toggle(FeatureFlag),
}

/// Static description of a settings option.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettingsOption {
    /// Row label.
    pub label: &'static str,
    /// Behaviour of the row.
    pub action: OptionAction,
}

impl SettingsOption {
    /// Option that opens `view`.
    #[must_use]
    pub const fn navigate(label: &'static str, view: SettingsView) -> Self {
        Self {
            label,
            action: OptionAction::Navigate(view),
        }
    }

    /// Option with a switch bound to `flag`.
    #[must_use]
    pub const fn toggle(label: &'static str, flag: FeatureFlag) -> Self {
        Self {
            label,
            action: OptionAction::Toggle(flag),
        }
    }

    /// Whether the option renders a switch.
    #[must_use]
    pub const fn is_toggle(&self) -> bool {
        matches!(self.action, OptionAction::Toggle(_))
    }
}

/// Mounted option row with its view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionRow {
    option: SettingsOption,
    elevation: u8,
    toggle_state: bool,
}

impl OptionRow {
    /// Mount `option`, seeding the switch from the store.
    #[must_use]
    pub fn mount<B: SettingsBinding + ?Sized>(option: SettingsOption, binding: &B) -> Self {
        let toggle_state = match option.action {
            OptionAction::Toggle(flag) => binding.flag(flag),
            OptionAction::Navigate(_) => false,
        };
        Self {
            option,
            elevation: RESTING_ELEVATION,
            toggle_state,
        }
    }

    /// Static description of the row.
    #[must_use]
    pub const fn option(&self) -> &SettingsOption {
        &self.option
    }

    /// Current elevation.
    #[must_use]
    pub const fn elevation(&self) -> u8 {
        self.elevation
    }

    /// Switch position, or `None` for navigation rows.
    #[must_use]
    pub const fn toggle_state(&self) -> Option<bool> {
        if self.option.is_toggle() {
            Some(self.toggle_state)
        } else {
            None
        }
    }

    /// Raise the row while the pointer is over it.
    pub const fn pointer_enter(&mut self) {
        self.elevation = HOVER_ELEVATION;
    }

    /// Lower the row once the pointer leaves.
    pub const fn pointer_leave(&mut self) {
        self.elevation = RESTING_ELEVATION;
    }

    /// Handle a click on the row body. Navigation rows transition the router
    /// and return `true`; toggle rows ignore body clicks.
    pub fn activate<B: SettingsBinding + ?Sized>(&self, binding: &mut B) -> bool {
        match self.option.action {
            OptionAction::Navigate(view) => {
                binding.set_view(view);
                true
            }
            OptionAction::Toggle(_) => false,
        }
    }

    /// Flip the switch and write the new value, returning it. Navigation rows
    /// have no switch and return `None`.
    pub fn change_toggle<B: SettingsBinding + ?Sized>(&mut self, binding: &mut B) -> Option<bool> {
        let OptionAction::Toggle(flag) = self.option.action else {
            return None;
        };
        self.toggle_state = !self.toggle_state;
        binding.toggle(flag, self.toggle_state);
        Some(self.toggle_state)
    }

    /// Re-read the switch position from the store.
    pub fn refresh<B: SettingsBinding + ?Sized>(&mut self, binding: &B) {
        if let OptionAction::Toggle(flag) = self.option.action {
            self.toggle_state = binding.flag(flag);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pdpmon_config::SettingsStore;

    #[test]
    fn hover_raises_and_lowers_elevation() {
        let store = SettingsStore::default();
        let mut row = OptionRow::mount(
            SettingsOption::navigate("Controls Configuration", SettingsView::Controls),
            &store,
        );
        assert_eq!(row.elevation(), RESTING_ELEVATION);
        row.pointer_enter();
        assert_eq!(row.elevation(), HOVER_ELEVATION);
        row.pointer_leave();
        assert_eq!(row.elevation(), RESTING_ELEVATION);
    }

    #[test]
    fn navigation_row_transitions_router() {
        let mut store = SettingsStore::default();
        let row = OptionRow::mount(
            SettingsOption::navigate("Automation Profiles", SettingsView::Automation),
            &store,
        );
        assert_eq!(row.toggle_state(), None);
        assert!(row.activate(&mut store));
        assert_eq!(store.current_view(), SettingsView::Automation);
    }

    #[test]
    fn toggle_row_ignores_body_clicks() {
        let mut store = SettingsStore::default();
        let row = OptionRow::mount(
            SettingsOption::toggle("Controls Dock", FeatureFlag::ControlsDock),
            &store,
        );
        assert!(!row.activate(&mut store));
        assert_eq!(store.current_view(), SettingsView::Main);
        assert!(!store.flag(FeatureFlag::ControlsDock));
    }

    #[test]
    fn switch_flips_local_state_and_store() {
        let mut store = SettingsStore::default();
        store.toggle(FeatureFlag::FeedSystemShow, true);
        let mut row = OptionRow::mount(
            SettingsOption::toggle("Feed System Panel", FeatureFlag::FeedSystemShow),
            &store,
        );
        assert_eq!(row.toggle_state(), Some(true));
        assert_eq!(row.change_toggle(&mut store), Some(false));
        assert!(!store.flag(FeatureFlag::FeedSystemShow));
        assert_eq!(row.change_toggle(&mut store), Some(true));
        assert!(store.flag(FeatureFlag::FeedSystemShow));
    }

    #[test]
    fn refresh_picks_up_external_writes() {
        let mut store = SettingsStore::default();
        let mut row = OptionRow::mount(
            SettingsOption::toggle("Controls Panel", FeatureFlag::ControlsPanel),
            &store,
        );
        store.toggle(FeatureFlag::ControlsPanel, true);
        assert_eq!(row.toggle_state(), Some(false));
        row.refresh(&store);
        assert_eq!(row.toggle_state(), Some(true));
    }

    #[test]
    fn navigation_rows_have_no_switch() {
        let mut store = SettingsStore::default();
        let mut row = OptionRow::mount(
            SettingsOption::navigate("Instrumentation Configuration", SettingsView::Instrumentation),
            &store,
        );
        assert_eq!(row.change_toggle(&mut store), None);
    }
}
