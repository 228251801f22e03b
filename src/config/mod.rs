//! Configuration module for the textmetrics analyzer
//!
//! Compile-time resource limits live in `constants`; user-facing runtime
//! preferences (environment variables and the optional TOML config file)
//! live in `runtime`.

pub mod constants;
pub mod runtime;
