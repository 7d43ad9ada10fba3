//! Parallelism configuration types

use crate::constants::*;
use serde::{Deserialize, Serialize};
use svcscan_domain::constants::{
    LOADED_MODULES_PARALLEL_THRESHOLD, MODULE_PARALLEL_THRESHOLD, TYPE_PARALLEL_THRESHOLD,
};

/// Worker pool size and the counts above which work fans out
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallelismConfig {
    /// Upper bound on worker threads
    pub max_workers: usize,

    /// Module names or handles resolved in parallel above this count
    pub module_threshold: usize,

    /// Loaded modules filtered in parallel above this count
    pub loaded_module_threshold: usize,

    /// Modules scanned for types in parallel above this count
    pub type_threshold: usize,
}

impl Default for ParallelismConfig {
    fn default() -> Self {
        Self {
            max_workers: DEFAULT_MAX_WORKERS,
            module_threshold: MODULE_PARALLEL_THRESHOLD,
            loaded_module_threshold: LOADED_MODULES_PARALLEL_THRESHOLD,
            type_threshold: TYPE_PARALLEL_THRESHOLD,
        }
    }
}
