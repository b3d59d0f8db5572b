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

//! In-memory settings store for the PDP monitoring console.
//!
//! Layout: `model.rs` (views, records, flags, snapshots), `collection.rs`
//! (replace-whole collections), `binding.rs` (`SettingsBinding` contract),
//! `store.rs` (`SettingsStore`), `loader.rs` (seed documents), `defaults.rs`
//! (built-in instrumentation channels and templates).

pub mod binding;
pub mod collection;
pub mod defaults;
pub mod error;
pub mod loader;
pub mod model;
pub mod store;

pub use binding::SettingsBinding;
pub use collection::{ConfigurationCollection, Record};
pub use error::{ConfigError, ConfigResult};
pub use loader::{SEED_ENV_VAR, SeedSource, load_seed};
pub use model::{
    AppView, AutomationProfile, CollectionKind, ControlId, ControlsUi, FeatureFlag, FeedSystemUi,
    InstrumentationSensor, InstrumentationUi, SettingsSnapshot, SettingsView, UiConfiguration,
};
pub use store::SettingsStore;
