//! Command handlers grouped by concern.

mod session;
mod show;

pub(crate) use session::handle_session;
pub(crate) use show::{handle_show, handle_snapshot};
