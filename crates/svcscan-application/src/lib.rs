//! # svcscan Application Layer
//!
//! Discovers types in the selected modules and registers them as services.
//!
//! ## Architecture
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`engine`] | [`ScanEngine`]: caches, worker pool and configuration shared by sessions |
//! | [`domain_services`] | Eligibility, assignability and registrable interfaces |
//! | [`use_cases`] | Module selection, type discovery, the typestate scanner and registration |
//!
//! Data flows one way: module selection feeds type discovery, discovery feeds
//! the chosen strategy, and the terminal lifetime call runs the register.
//!
//! ## Dependencies
//!
//! - `svcscan-domain`: type metadata, descriptors, ports
//! - `svcscan-infrastructure`: caches, module registry, configuration
//! - `rayon`: bounded fan-out for module resolution and type filtering

pub mod domain_services;
pub mod engine;
pub mod use_cases;

pub use domain_services::*;
pub use engine::{EngineCacheStats, ScanEngine};
pub use use_cases::*;
