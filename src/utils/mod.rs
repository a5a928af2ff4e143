//! Process-level helpers
//!
//! Currently only graceful shutdown on termination signals.

pub mod signals;

pub use signals::shutdown_signal;
