//! In-memory service collection
//!
//! The default [`ServiceContainer`]: an ordered list of descriptors. Modes
//! are decided against what is already stored:
//!
//! | Mode | Stored when |
//! |------|-------------|
//! | `Default` | always |
//! | `TryAdd` | no descriptor exists for the service type |
//! | `TryAddEnumerable` | the (service, implementation) pair is absent |

use svcscan_domain::error::Result;
use svcscan_domain::ports::ServiceContainer;
use svcscan_domain::value_objects::{RegistrationMode, ServiceDescriptor, TypeRef};

/// Ordered, in-memory list of service descriptors
#[derive(Debug, Clone, Default)]
pub struct ServiceCollection {
    descriptors: Vec<ServiceDescriptor>,
}

impl ServiceCollection {
    /// Empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored descriptors
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Whether nothing is stored
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }

    /// Stored descriptors in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, ServiceDescriptor> {
        self.descriptors.iter()
    }

    /// Descriptors registered under `service_type`
    pub fn descriptors_for(&self, service_type: TypeRef) -> Vec<&ServiceDescriptor> {
        self.descriptors
            .iter()
            .filter(|descriptor| descriptor.service_type == service_type)
            .collect()
    }

    /// Whether any descriptor is registered under `service_type`
    pub fn contains(&self, service_type: TypeRef) -> bool {
        self.descriptors
            .iter()
            .any(|descriptor| descriptor.service_type == service_type)
    }

    /// Whether `service_type` is implemented by `implementation_type`
    pub fn contains_pair(&self, service_type: TypeRef, implementation_type: TypeRef) -> bool {
        self.descriptors.iter().any(|descriptor| {
            descriptor.service_type == service_type
                && descriptor.implementation_type() == implementation_type
        })
    }
}

impl ServiceContainer for ServiceCollection {
    fn add(&mut self, descriptor: ServiceDescriptor, mode: RegistrationMode) -> Result<bool> {
        let skip = match mode {
            RegistrationMode::Default => false,
            RegistrationMode::TryAdd => self.contains(descriptor.service_type),
            RegistrationMode::TryAddEnumerable => {
                self.contains_pair(descriptor.service_type, descriptor.implementation_type())
            }
        };
        if skip {
            return Ok(false);
        }
        self.descriptors.push(descriptor);
        Ok(true)
    }

    fn descriptors(&self) -> &[ServiceDescriptor] {
        &self.descriptors
    }
}

impl<'a> IntoIterator for &'a ServiceCollection {
    type Item = &'a ServiceDescriptor;
    type IntoIter = std::slice::Iter<'a, ServiceDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.descriptors.iter()
    }
}
