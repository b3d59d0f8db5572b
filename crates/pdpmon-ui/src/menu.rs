//! Main settings page: sectioned list of navigation and toggle options.

use pdpmon_config::{FeatureFlag, SettingsBinding, SettingsView};

use crate::option::{OptionRow, SettingsOption};

/// Heading rendered above the main page sections.
pub const MAIN_HEADING: &str = "Settings";

/// Titled group of options on the main page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuSection {
    /// Section title.
    pub title: &'static str,
    /// Options in display order.
    pub options: &'static [SettingsOption],
}

/// Main page sections in display order.
pub const MAIN_SECTIONS: [MenuSection; 4] = [
    MenuSection {
        title: "Automation",
        options: &[SettingsOption::navigate(
            "Automation Profiles",
            SettingsView::Automation,
        )],
    },
    MenuSection {
        title: "Instrumentation",
        options: &[
            SettingsOption::navigate("Instrumentation Configuration", SettingsView::Instrumentation),
            SettingsOption::toggle(
                "Instrumentation Visualization",
                FeatureFlag::InstrumentationGraphs,
            ),
        ],
    },
    MenuSection {
        title: "Controls",
        options: &[
            SettingsOption::navigate("Controls Configuration", SettingsView::Controls),
            SettingsOption::toggle("Controls Dock", FeatureFlag::ControlsDock),
            SettingsOption::toggle("Controls Panel", FeatureFlag::ControlsPanel),
        ],
    },
    MenuSection {
        title: "Feed System",
        options: &[SettingsOption::toggle(
            "Feed System Panel",
            FeatureFlag::FeedSystemShow,
        )],
    },
];

/// Section with its rows mounted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MountedSection {
    /// Section title.
    pub title: &'static str,
    /// Mounted rows in display order.
    pub rows: Vec<OptionRow>,
}

/// Mounted main page.
///
/// Rows are addressed by a flat index across all sections, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MainContent {
    sections: Vec<MountedSection>,
}

impl MainContent {
    /// Mount every section, seeding switches from the store.
    #[must_use]
    pub fn mount<B: SettingsBinding + ?Sized>(binding: &B) -> Self {
        let sections = MAIN_SECTIONS
            .iter()
            .map(|section| MountedSection {
                title: section.title,
                rows: section
                    .options
                    .iter()
                    .map(|option| OptionRow::mount(*option, binding))
                    .collect(),
            })
            .collect();
        Self { sections }
    }

    /// Page heading.
    #[must_use]
    pub const fn heading(&self) -> &'static str {
        MAIN_HEADING
    }

    /// Mounted sections in display order.
    #[must_use]
    pub fn sections(&self) -> &[MountedSection] {
        &self.sections
    }

    /// Every row in display order.
    pub fn rows(&self) -> impl Iterator<Item = &OptionRow> {
        self.sections.iter().flat_map(|section| section.rows.iter())
    }

    /// Row at flat `index`.
    #[must_use]
    pub fn row(&self, index: usize) -> Option<&OptionRow> {
        self.rows().nth(index)
    }

    /// Mutable row at flat `index`.
    pub fn row_mut(&mut self, index: usize) -> Option<&mut OptionRow> {
        self.sections
            .iter_mut()
            .flat_map(|section| section.rows.iter_mut())
            .nth(index)
    }

    /// Re-read every switch from the store.
    pub fn refresh<B: SettingsBinding + ?Sized>(&mut self, binding: &B) {
        for section in &mut self.sections {
            for row in &mut section.rows {
                row.refresh(binding);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::OptionAction;
    use pdpmon_config::SettingsStore;

    #[test]
    fn sections_follow_display_order() {
        let titles: Vec<_> = MAIN_SECTIONS.iter().map(|section| section.title).collect();
        assert_eq!(
            titles,
            ["Automation", "Instrumentation", "Controls", "Feed System"]
        );
    }

    #[test]
    fn every_flag_and_sub_view_has_one_option() {
        let actions: Vec<_> = MAIN_SECTIONS
            .iter()
            .flat_map(|section| section.options.iter().map(|option| option.action))
            .collect();
        for flag in FeatureFlag::ALL {
            let count = actions
                .iter()
                .filter(|action| **action == OptionAction::Toggle(flag))
                .count();
            assert_eq!(count, 1, "{flag}");
        }
        for view in SettingsView::ALL {
            if view == SettingsView::Main {
                continue;
            }
            let count = actions
                .iter()
                .filter(|action| **action == OptionAction::Navigate(view))
                .count();
            assert_eq!(count, 1, "{view}");
        }
    }

    #[test]
    fn flat_index_spans_sections() {
        let store = SettingsStore::default();
        let content = MainContent::mount(&store);
        assert_eq!(content.heading(), "Settings");
        assert_eq!(content.rows().count(), 7);
        assert_eq!(
            content.row(0).map(|row| row.option().label),
            Some("Automation Profiles")
        );
        assert_eq!(
            content.row(6).map(|row| row.option().label),
            Some("Feed System Panel")
        );
        assert!(content.row(7).is_none());
    }

    #[test]
    fn refresh_syncs_every_switch() {
        let mut store = SettingsStore::default();
        let mut content = MainContent::mount(&store);
        store.toggle(FeatureFlag::ControlsDock, true);
        store.toggle(FeatureFlag::InstrumentationGraphs, true);
        content.refresh(&store);
        let switches: Vec<_> = content.rows().filter_map(OptionRow::toggle_state).collect();
        assert_eq!(switches, [true, true, false, false]);
    }
}
