//! # Infrastructure Layer
//!
//! Technical capabilities the scanning pipeline is built on.
//!
//! ## Module Categories
//!
//! ### Caching
//! | Module | Description |
//! |--------|-------------|
//! | [`cache`] | Bounded LRU cache and the module/type cache |
//!
//! ### Modules & Containers
//! | Module | Description |
//! |--------|-------------|
//! | [`registry`] | linkme-backed module registry |
//! | [`container`] | In-memory service collection |
//!
//! ### Configuration & Observability
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | TOML/env configuration via figment |
//! | [`logging`] | Structured logging with tracing |
//! | [`constants`] | Centralized defaults |

pub mod cache;
pub mod config;
pub mod constants;
pub mod container;
pub mod error_ext;
pub mod logging;
pub mod registry;
pub mod utils;

// Re-export commonly used types
pub use cache::{BoundedCache, CacheStats, ModuleCache};
pub use config::{ConfigLoader, ScanConfig};
pub use container::ServiceCollection;
pub use error_ext::ErrorContext;
pub use registry::ModuleRegistry;
pub use utils::TimedOperation;
