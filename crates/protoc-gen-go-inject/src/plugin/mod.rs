//! Startup plumbing for the plugin binary.
//!
//! - [`config`] - CLI/environment settings (`CliArgs`, `PluginConfig`).
//! - [`telemetry`] - stderr logging.

pub mod config;
pub mod telemetry;
