//! Discovery configuration types

use serde::{Deserialize, Serialize};
use svcscan_domain::constants::SYSTEM_NAMESPACE_PREFIXES;

/// Namespaces and modules left out of discovery
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscoveryConfig {
    /// Prefixes marking system modules and namespaces
    pub system_prefixes: Vec<String>,

    /// Extra namespace prefixes whose types are never eligible
    pub excluded_namespaces: Vec<String>,
}

impl Default for DiscoveryConfig {
    fn default() -> Self {
        Self {
            system_prefixes: SYSTEM_NAMESPACE_PREFIXES
                .iter()
                .map(|prefix| (*prefix).to_string())
                .collect(),
            excluded_namespaces: Vec::new(),
        }
    }
}
