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

//! Change-notification bus for the settings store.
//!
//! The bus provides a typed event enum, sequential identifiers, and replay of
//! recent events for subscribers that attach late (for example a panel that is
//! re-mounted after the store was mutated). Internally it uses
//! `tokio::broadcast` with a bounded buffer; when a subscriber falls behind,
//! the oldest events are dropped for that subscriber only.
//!
//! Layout: `payloads.rs` (event types), `routing.rs` (`EventBus` and
//! `EventSubscriber`).

pub mod payloads;
pub mod routing;

pub use payloads::{DEFAULT_REPLAY_CAPACITY, Event, EventEnvelope, EventId};
pub use routing::{EventBus, EventSubscriber};
