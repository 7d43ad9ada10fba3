//! Assignability and registrable interfaces
//!
//! `service` is assignable from `implementation` when they are the same type,
//! when `service` is a base class or an implemented interface of
//! `implementation`, or, for an open generic `service`, when the
//! implementation or one of its bases or interfaces instantiates the same
//! generic definition. Definitions are compared by [`GenericKey`], never by
//! instantiation.
//!
//! [`GenericKey`]: svcscan_domain::value_objects::GenericKey

use std::sync::Arc;

use svcscan_domain::error::Result;
use svcscan_domain::value_objects::TypeRef;
use svcscan_infrastructure::cache::{BoundedCache, CacheStats};

use super::eligibility::DiscoveryRules;

/// Uncached assignability check
pub fn is_assignable(service: TypeRef, implementation: TypeRef) -> bool {
    if service == implementation {
        return true;
    }

    if service.is_generic_definition() {
        let key = service.generic_key();
        let instantiates = |ty: TypeRef| ty.generic_key() == key;
        return instantiates(implementation)
            || implementation.ancestors().any(instantiates)
            || implementation.all_interfaces().into_iter().any(instantiates);
    }

    implementation.ancestors().any(|base| base == service)
        || implementation.all_interfaces().contains(&service)
}

/// Memoized assignability keyed by (service, implementation)
#[derive(Debug)]
pub struct AssignabilityCache {
    cache: BoundedCache<(TypeRef, TypeRef), bool>,
}

impl AssignabilityCache {
    /// Create a cache holding at most `capacity` pairs
    pub fn new(capacity: usize) -> Self {
        Self {
            cache: BoundedCache::new("assignability", capacity),
        }
    }

    /// Whether `service` can be satisfied by `implementation`
    pub fn is_assignable(&self, service: TypeRef, implementation: TypeRef) -> Result<bool> {
        self.cache.get_or_add((service, implementation), || {
            is_assignable(service, implementation)
        })
    }

    /// Drop every memoized pair
    pub fn clear(&self) -> Result<()> {
        self.cache.clear()
    }

    /// Close the cache
    pub fn close(&self) {
        self.cache.close();
    }

    /// Cache counters
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}

/// Memoized registrable interfaces per implementation type
///
/// Registrable interfaces are every implemented interface except disposal
/// markers and system-namespace interfaces. For an open generic
/// implementation, an interface closed only over generic parameters is
/// replaced by its open definition.
#[derive(Debug)]
pub struct InterfaceCache {
    cache: BoundedCache<TypeRef, Arc<[TypeRef]>>,
    rules: DiscoveryRules,
}

impl InterfaceCache {
    /// Create a cache holding at most `capacity` types
    pub fn new(capacity: usize, rules: DiscoveryRules) -> Self {
        Self {
            cache: BoundedCache::new("interfaces", capacity),
            rules,
        }
    }

    /// Registrable interfaces of `implementation`, in discovery order
    pub fn registrable_interfaces(&self, implementation: TypeRef) -> Result<Arc<[TypeRef]>> {
        self.cache
            .get_or_add(implementation, || self.compute(implementation))
    }

    fn compute(&self, implementation: TypeRef) -> Arc<[TypeRef]> {
        let open = implementation.is_generic_definition();
        let mut out: Vec<TypeRef> = Vec::new();
        for interface in implementation.all_interfaces() {
            if interface.is_disposal_marker() || self.rules.is_system_namespace(interface.namespace)
            {
                continue;
            }
            let service = if open && interface.is_closed_over_parameters() {
                interface.generic_definition_type().unwrap_or(interface)
            } else {
                interface
            };
            if !out.contains(&service) {
                out.push(service);
            }
        }
        out.into()
    }

    /// Drop every memoized list
    pub fn clear(&self) -> Result<()> {
        self.cache.clear()
    }

    /// Close the cache
    pub fn close(&self) {
        self.cache.close();
    }

    /// Cache counters
    pub fn stats(&self) -> CacheStats {
        self.cache.stats()
    }
}
