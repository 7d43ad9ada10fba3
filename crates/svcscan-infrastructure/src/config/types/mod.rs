//! Configuration types module

pub mod cache;
pub mod discovery;
pub mod logging;
pub mod parallelism;
pub mod scan;

// Re-export main types
pub use cache::CacheConfig;
pub use discovery::DiscoveryConfig;
pub use logging::LoggingConfig;
pub use parallelism::ParallelismConfig;
pub use scan::ScanConfig;
