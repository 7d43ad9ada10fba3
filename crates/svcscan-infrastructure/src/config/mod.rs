//! Configuration
//!
//! [`ScanConfig`] is loaded by [`ConfigLoader`] from defaults, an optional
//! `svcscan.toml` and `SVCSCAN_*` environment variables.

pub mod loader;
pub mod types;

pub use loader::ConfigLoader;
pub use types::*;
