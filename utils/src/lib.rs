//! Shared helpers for the tessera workspace.

pub mod logging;
pub mod time;

pub use logging::init_tracing;
pub use time::format_duration;
