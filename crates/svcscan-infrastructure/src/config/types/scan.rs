//! Root configuration

use serde::{Deserialize, Serialize};

use super::{CacheConfig, DiscoveryConfig, LoggingConfig, ParallelismConfig};

/// Engine configuration
///
/// ```toml
/// [cache]
/// assignability_capacity = 8192
///
/// [parallelism]
/// max_workers = 8
///
/// [discovery]
/// excluded_namespaces = ["legacy::generated"]
///
/// [logging]
/// level = "debug"
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScanConfig {
    /// Cache capacities
    pub cache: CacheConfig,
    /// Worker pool and fan-out thresholds
    pub parallelism: ParallelismConfig,
    /// Namespace exclusions
    pub discovery: DiscoveryConfig,
    /// Logging output
    pub logging: LoggingConfig,
}
