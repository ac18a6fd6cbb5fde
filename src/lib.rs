//! Library root for the `console-tee` crate.
//!
//! The core is [`TeeWriter`], a [`std::io::Write`] implementation that mirrors
//! every write into a console sink and an append-mode log file. Callers install
//! it by passing it wherever output is produced instead of replacing a
//! process-wide stream. A small CLI drives it from stdin, and the logging
//! helpers let consumers initialize tracing the same way the binary does.

pub mod cli;
pub mod logging;
pub mod tee;

pub use crate::tee::FlushErrorPolicy;
pub use crate::tee::TeeWriter;

/// Re-export the logging initializer so callers can do `console_tee::init_tracing`.
pub use crate::logging::init_tracing;

/// Re-export the default JSON log path helper.
pub use crate::logging::default_json_log_path;
