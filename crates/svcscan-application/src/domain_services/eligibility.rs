//! Eligibility rules
//!
//! A type is an eligible class when it is a public, concrete, non-nested
//! class outside every system and excluded namespace, and, unless open
//! generics are allowed, not an open generic definition.

use svcscan_domain::value_objects::{TypeRef, has_segment_prefix};
use svcscan_infrastructure::config::DiscoveryConfig;

/// Namespace exclusions and the eligibility predicate
#[derive(Debug, Clone)]
pub struct DiscoveryRules {
    system_prefixes: Vec<String>,
    excluded_namespaces: Vec<String>,
}

impl DiscoveryRules {
    /// Rules from the discovery section of the configuration
    pub fn new(config: &DiscoveryConfig) -> Self {
        Self {
            system_prefixes: config.system_prefixes.clone(),
            excluded_namespaces: config.excluded_namespaces.clone(),
        }
    }

    /// Whether a module name denotes a system module
    pub fn is_system_module(&self, name: &str) -> bool {
        has_segment_prefix(name, &self.system_prefixes)
    }

    /// Whether a namespace belongs to the system
    pub fn is_system_namespace(&self, namespace: &str) -> bool {
        has_segment_prefix(namespace, &self.system_prefixes)
    }

    /// Whether a namespace is system or explicitly excluded
    pub fn is_excluded_namespace(&self, namespace: &str) -> bool {
        self.is_system_namespace(namespace)
            || has_segment_prefix(namespace, &self.excluded_namespaces)
    }

    /// Whether `ty` is an eligible class
    pub fn is_eligible(&self, ty: TypeRef, allow_open_generics: bool) -> bool {
        ty.is_class()
            && ty.is_public
            && !ty.is_abstract
            && !ty.is_nested
            && (allow_open_generics || !ty.is_generic_definition())
            && !self.is_excluded_namespace(ty.namespace)
    }

    /// Whether discovery may return `ty` at all
    ///
    /// Eligibility plus the exclude-from-registration marker, which every
    /// discovery call honours.
    pub fn is_discoverable(&self, ty: TypeRef, allow_open_generics: bool) -> bool {
        !ty.exclude_from_registration && self.is_eligible(ty, allow_open_generics)
    }
}

impl Default for DiscoveryRules {
    fn default() -> Self {
        Self::new(&DiscoveryConfig::default())
    }
}
