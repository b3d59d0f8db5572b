#![forbid(unsafe_code)]
#![deny(
    warnings,
    dead_code,
    unused,
    unused_imports,
    unused_must_use,
    unreachable_pub,
    clippy::all,
    clippy::pedantic,
    clippy::nursery,
    rustdoc::broken_intra_doc_links,
    rustdoc::bare_urls,
    missing_docs
)]
#![allow(clippy::module_name_repetitions)]

//! Settings panel view model for the PDP monitoring console.
//!
//! The panel mounts exactly one sub-view at a time and talks to configuration
//! only through [`pdpmon_config::SettingsBinding`]. Drawing is delegated to a
//! [`PanelRenderer`]; JSON editing is delegated to a [`TreeEditor`].
//!
//! Layout: `option.rs` (option rows), `menu.rs` (main page sections),
//! `editor.rs` (tree editor seam), `panel.rs` (mount/dispatch), `error.rs`.

pub mod editor;
pub mod error;
pub mod menu;
pub mod option;
pub mod panel;

pub use editor::{DisplayOptions, EditorSection, TreeEditor};
pub use error::{PanelError, PanelResult};
pub use menu::{MAIN_HEADING, MAIN_SECTIONS, MainContent, MenuSection, MountedSection};
pub use option::{OptionAction, OptionRow, SettingsOption};
pub use panel::{MountedView, PanelRenderer, SettingsPanel};
