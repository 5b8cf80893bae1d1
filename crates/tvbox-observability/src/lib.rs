//! Observability setup for the TV-box storefront tools.
//!
//! This crate provides:
//! - `LogLevel` / `LogFormat` - Logging vocabulary shared with config files
//! - `LogSettings` - Level, format and target display
//! - `init_logging` - Installs the global `tracing` subscriber

mod logging;

pub use logging::*;
