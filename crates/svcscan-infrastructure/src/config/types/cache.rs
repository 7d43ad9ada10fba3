//! Cache configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};

/// Capacities of the engine caches
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Name → module entries
    pub module_capacity: usize,

    /// Module → declared types entries
    pub type_capacity: usize,

    /// (service, implementation) assignability entries
    pub assignability_capacity: usize,

    /// Type → registrable interfaces entries
    pub interface_capacity: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            module_capacity: MODULE_CACHE_CAPACITY,
            type_capacity: TYPE_CACHE_CAPACITY,
            assignability_capacity: ASSIGNABILITY_CACHE_CAPACITY,
            interface_capacity: INTERFACE_CACHE_CAPACITY,
        }
    }
}
