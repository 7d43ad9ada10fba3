//! Caching infrastructure
//!
//! [`BoundedCache`] is the memoizing primitive every other cache is built on.
//! [`ModuleCache`] layers module lookup and type enumeration on top of it.

pub mod bounded;
pub mod module_cache;

pub use bounded::{BoundedCache, CacheEntry, CacheStats};
pub use module_cache::ModuleCache;
