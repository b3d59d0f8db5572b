//! Tree editor seam for the collection sub-views.
//!
//! # Design
//! - The editor is an external collaborator; the panel only hands it a JSON
//!   snapshot and forwards every change payload verbatim to `write_json`.
//! - A rejected payload is logged and reported; later payloads from the same
//!   render are still forwarded.

use pdpmon_config::defaults::sensor_template;
use pdpmon_config::{CollectionKind, ConfigError, ConfigResult, SettingsBinding};
use serde_json::Value;
use tracing::{debug, warn};

/// Presentation options handed to the tree editor.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayOptions {
    /// Base font size in pixels.
    pub root_font_size: u8,
    /// Editor colour theme name.
    pub theme: &'static str,
    /// Depth collapsed by default; `0` starts fully collapsed.
    pub collapse: u8,
    /// Label of the root node.
    pub root_name: &'static str,
    /// Collapse animation duration.
    pub collapse_animation_time_ms: u16,
    /// Template inserted for new elements, if any.
    pub default_value: Option<Value>,
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            root_font_size: 12,
            theme: "githubDark",
            collapse: 0,
            root_name: "Config",
            collapse_animation_time_ms: 100,
            default_value: None,
        }
    }
}

/// Hierarchical JSON editor collaborator.
pub trait TreeEditor {
    /// Present `data` and report each edited document through `on_change`.
    fn render(
        &mut self,
        data: &Value,
        on_change: &mut dyn FnMut(Value),
        options: &DisplayOptions,
    );
}

/// Collection sub-view: a title plus a tree editor over one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct EditorSection {
    /// Collection being edited.
    pub collection: CollectionKind,
    /// Page title.
    pub title: &'static str,
    /// Options handed to the editor.
    pub options: DisplayOptions,
}

impl EditorSection {
    /// Sub-view for `collection`.
    #[must_use]
    pub fn for_collection(collection: CollectionKind) -> Self {
        let (title, default_value) = match collection {
            CollectionKind::Instrumentation => (
                "Instrumentation Configuration",
                Some(sensor_template().as_value().clone()),
            ),
            CollectionKind::Controls => ("Controls Configuration", None),
            CollectionKind::Automation => ("Automation Profiles", None),
        };
        Self {
            collection,
            title,
            options: DisplayOptions {
                default_value,
                ..DisplayOptions::default()
            },
        }
    }

    /// Render the editor over the current collection and forward its edits.
    /// Returns the number of payloads the store accepted.
    ///
    /// # Errors
    ///
    /// Returns the first rejected payload's error, or an encode error if the
    /// collection cannot be rendered as JSON.
    pub fn mount<B, E>(&self, binding: &mut B, editor: &mut E) -> ConfigResult<usize>
    where
        B: SettingsBinding + ?Sized,
        E: TreeEditor + ?Sized,
    {
        let collection = self.collection;
        let data = binding.read_json(collection)?;
        let mut applied = 0_usize;
        let mut first_error: Option<ConfigError> = None;
        let mut forward = |payload: Value| match binding.write_json(collection, payload) {
            Ok(()) => {
                applied += 1;
                debug!(collection = collection.as_str(), "editor payload applied");
            }
            Err(err) => {
                warn!(collection = collection.as_str(), error = ?err, "editor payload rejected");
                if first_error.is_none() {
                    first_error = Some(err);
                }
            }
        };
        editor.render(&data, &mut forward, &self.options);
        first_error.map_or(Ok(applied), Err)
    }
}
