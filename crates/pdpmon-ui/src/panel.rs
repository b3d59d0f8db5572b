//! Settings panel: mounts the active sub-view and dispatches interactions.
//!
//! # Design
//! - Exactly one sub-view is mounted; mounting is an exhaustive match over
//!   [`SettingsView`].
//! - The panel subscribes to the store's bus on creation. `sync` drains it and
//!   re-mounts when the view moved underneath the panel, or refreshes switches
//!   when flags changed.
//! - The panel's own actions sync immediately.

use pdpmon_config::{AppView, CollectionKind, SettingsBinding, SettingsView};
use pdpmon_events::{Event, EventSubscriber};
use tracing::debug;

use crate::editor::{EditorSection, TreeEditor};
use crate::error::{PanelError, PanelResult};
use crate::menu::MainContent;
use crate::option::OptionRow;

/// Content currently mounted in the panel.
#[derive(Debug, Clone, PartialEq)]
pub enum MountedView {
    /// Main page with its option rows.
    Main(MainContent),
    /// Collection editor sub-view.
    Editor(EditorSection),
}

impl MountedView {
    fn mount<B: SettingsBinding + ?Sized>(view: SettingsView, binding: &B) -> Self {
        match view {
            SettingsView::Main => Self::Main(MainContent::mount(binding)),
            SettingsView::Instrumentation => {
                Self::Editor(EditorSection::for_collection(CollectionKind::Instrumentation))
            }
            SettingsView::Controls => {
                Self::Editor(EditorSection::for_collection(CollectionKind::Controls))
            }
            SettingsView::Automation => {
                Self::Editor(EditorSection::for_collection(CollectionKind::Automation))
            }
        }
    }
}

/// Drawing surface for the panel.
pub trait PanelRenderer {
    /// Tree editor used for collection sub-views.
    type Editor: TreeEditor;

    /// Draw the main page.
    fn main_page(&mut self, content: &MainContent);
    /// Draw a collection sub-view's chrome before its editor renders.
    fn editor_page(&mut self, section: &EditorSection);
    /// Editor instance that renders collection JSON.
    fn tree_editor(&mut self) -> &mut Self::Editor;
}

/// Settings panel view model.
pub struct SettingsPanel {
    view: SettingsView,
    mounted: MountedView,
    events: EventSubscriber,
}

impl SettingsPanel {
    /// Mount the store's current view and subscribe to its changes.
    #[must_use]
    pub fn new<B: SettingsBinding + ?Sized>(binding: &B) -> Self {
        let events = binding.subscribe(None);
        let view = binding.current_view();
        Self {
            view,
            mounted: MountedView::mount(view, binding),
            events,
        }
    }

    /// View the panel has mounted.
    #[must_use]
    pub const fn view(&self) -> SettingsView {
        self.view
    }

    /// Content the panel has mounted.
    #[must_use]
    pub const fn mounted(&self) -> &MountedView {
        &self.mounted
    }

    /// Apply pending store changes. Returns `true` when the panel re-mounted.
    pub fn sync<B: SettingsBinding + ?Sized>(&mut self, binding: &B) -> bool {
        let mut flags_changed = false;
        for envelope in self.events.drain() {
            if matches!(envelope.event, Event::FlagToggled { .. }) {
                flags_changed = true;
            }
        }

        let current = binding.current_view();
        if current != self.view {
            debug!(from = %self.view, to = %current, "settings panel re-mounted");
            self.view = current;
            self.mounted = MountedView::mount(current, binding);
            return true;
        }
        if flags_changed && let MountedView::Main(content) = &mut self.mounted {
            content.refresh(binding);
        }
        false
    }

    /// Activate the option row at `index` on the main page. Returns `true`
    /// when the row navigated.
    ///
    /// # Errors
    ///
    /// Fails when an editor is mounted or `index` addresses no row.
    pub fn select<B: SettingsBinding + ?Sized>(
        &mut self,
        binding: &mut B,
        index: usize,
    ) -> PanelResult<bool> {
        let navigated = self.main_row(index)?.activate(binding);
        self.sync(&*binding);
        Ok(navigated)
    }

    /// Flip the switch of the option row at `index`, returning its new value.
    ///
    /// # Errors
    ///
    /// Fails when an editor is mounted, `index` addresses no row, or the row
    /// has no switch.
    pub fn switch<B: SettingsBinding + ?Sized>(
        &mut self,
        binding: &mut B,
        index: usize,
    ) -> PanelResult<bool> {
        let value = self
            .main_row(index)?
            .change_toggle(binding)
            .ok_or(PanelError::NotAToggle { index })?;
        self.sync(&*binding);
        Ok(value)
    }

    /// Move the pointer onto (`inside == true`) or off the row at `index`.
    ///
    /// # Errors
    ///
    /// Fails when an editor is mounted or `index` addresses no row.
    pub fn hover(&mut self, index: usize, inside: bool) -> PanelResult<()> {
        let row = self.main_row(index)?;
        if inside {
            row.pointer_enter();
        } else {
            row.pointer_leave();
        }
        Ok(())
    }

    /// Back action: the main page returns to the dashboard, a sub-view returns
    /// to the main page.
    pub fn back<B: SettingsBinding + ?Sized>(&mut self, binding: &mut B) {
        match self.mounted {
            MountedView::Main(_) => binding.set_app_view(AppView::Dashboard),
            MountedView::Editor(_) => binding.set_view(SettingsView::Main),
        }
        self.sync(&*binding);
    }

    /// Render the mounted content. Collection sub-views also mount the tree
    /// editor and forward its edits; the accepted payload count is returned.
    ///
    /// # Errors
    ///
    /// Returns the editor's first rejected payload.
    pub fn render<B, R>(&mut self, binding: &mut B, renderer: &mut R) -> PanelResult<usize>
    where
        B: SettingsBinding + ?Sized,
        R: PanelRenderer + ?Sized,
    {
        let outcome = match &self.mounted {
            MountedView::Main(content) => {
                renderer.main_page(content);
                Ok(0)
            }
            MountedView::Editor(section) => {
                renderer.editor_page(section);
                section.mount(binding, renderer.tree_editor())
            }
        };
        self.sync(&*binding);
        outcome.map_err(PanelError::from)
    }

    /// Render only the tree editor of the mounted sub-view.
    ///
    /// # Errors
    ///
    /// Fails when the main page is mounted or the editor's payload is rejected.
    pub fn edit<B, E>(&mut self, binding: &mut B, editor: &mut E) -> PanelResult<usize>
    where
        B: SettingsBinding + ?Sized,
        E: TreeEditor + ?Sized,
    {
        let MountedView::Editor(section) = &self.mounted else {
            return Err(PanelError::NoEditorMounted);
        };
        let outcome = section.mount(binding, editor);
        self.sync(&*binding);
        outcome.map_err(PanelError::from)
    }

    fn main_row(&mut self, index: usize) -> PanelResult<&mut OptionRow> {
        match &mut self.mounted {
            MountedView::Main(content) => content
                .row_mut(index)
                .ok_or(PanelError::NoSuchOption { index }),
            MountedView::Editor(_) => Err(PanelError::NotOnMainPage { view: self.view }),
        }
    }
}
