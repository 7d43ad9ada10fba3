//! Registration value objects
//!
//! Lifetimes, insertion modes, strategies, the descriptors emitted into a
//! container and the summary returned after a registration batch.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

use super::types::TypeRef;

/// Service lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lifetime {
    /// One instance for the life of the container
    Singleton,
    /// One instance per logical unit of work
    Scoped,
    /// A new instance per resolution
    Transient,
}

impl fmt::Display for Lifetime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Singleton => "singleton",
            Self::Scoped => "scoped",
            Self::Transient => "transient",
        };
        f.write_str(name)
    }
}

/// Policy applied when a service type already has descriptors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RegistrationMode {
    /// Always add
    #[default]
    Default,
    /// Add only if the service type has no descriptor yet
    TryAdd,
    /// Add only if the exact (service, implementation) pair is absent
    TryAddEnumerable,
}

/// How discovered types map to service types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RegistrationStrategyKind {
    /// One descriptor per registrable implemented interface
    AsImplementedInterfaces,
    /// One descriptor keyed by the implementation itself
    AsSelf,
    /// One descriptor per configured, assignable service type
    AsSpecificTypes,
    /// One factory-bound descriptor per configured service type
    UsingFactory,
}

/// An instance produced by a service factory
pub type Instance = Arc<dyn Any + Send + Sync>;

/// What a factory is asked to build
#[derive(Debug, Clone, Copy)]
pub struct FactoryContext {
    /// Service type being resolved
    pub service_type: TypeRef,
    /// Discovered type the descriptor was emitted for
    pub implementation_type: TypeRef,
}

/// Factory producing service instances; `None` is rejected at resolution
pub type ServiceFactory = Arc<dyn Fn(&FactoryContext) -> Option<Instance> + Send + Sync>;

/// Wrap a closure as a [`ServiceFactory`]
pub fn service_factory<F>(factory: F) -> ServiceFactory
where
    F: Fn(&FactoryContext) -> Option<Instance> + Send + Sync + 'static,
{
    Arc::new(factory)
}

/// How a descriptor's service is implemented
#[derive(Clone)]
pub enum Implementation {
    /// Constructed from the implementation type
    Type(TypeRef),
    /// Produced by a factory
    Factory {
        /// Discovered type the factory stands in for
        implementation_type: TypeRef,
        /// The factory
        factory: ServiceFactory,
    },
}

impl fmt::Debug for Implementation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Type(ty) => f.debug_tuple("Type").field(ty).finish(),
            Self::Factory {
                implementation_type,
                ..
            } => f
                .debug_struct("Factory")
                .field("implementation_type", implementation_type)
                .finish_non_exhaustive(),
        }
    }
}

/// A registration emitted into a container
#[derive(Debug, Clone)]
pub struct ServiceDescriptor {
    /// Key under which the service is resolved
    pub service_type: TypeRef,
    /// How the service is implemented
    pub implementation: Implementation,
    /// Lifetime of resolved instances
    pub lifetime: Lifetime,
}

impl ServiceDescriptor {
    /// Descriptor implemented by a type
    pub fn new(service_type: TypeRef, implementation_type: TypeRef, lifetime: Lifetime) -> Self {
        Self {
            service_type,
            implementation: Implementation::Type(implementation_type),
            lifetime,
        }
    }

    /// Descriptor implemented by a factory
    pub fn with_factory(
        service_type: TypeRef,
        implementation_type: TypeRef,
        factory: ServiceFactory,
        lifetime: Lifetime,
    ) -> Self {
        Self {
            service_type,
            implementation: Implementation::Factory {
                implementation_type,
                factory,
            },
            lifetime,
        }
    }

    /// The discovered type this descriptor was emitted for
    pub fn implementation_type(&self) -> TypeRef {
        match &self.implementation {
            Implementation::Type(ty) => *ty,
            Implementation::Factory {
                implementation_type,
                ..
            } => *implementation_type,
        }
    }

    /// Whether the descriptor is factory-based
    pub fn is_factory(&self) -> bool {
        matches!(self.implementation, Implementation::Factory { .. })
    }

    /// Whether service and implementation are the same type
    pub fn is_self_registration(&self) -> bool {
        self.service_type == self.implementation_type()
    }

    /// Invoke the factory, rejecting an empty result
    pub fn instantiate(&self) -> Result<Instance> {
        match &self.implementation {
            Implementation::Factory {
                implementation_type,
                factory,
            } => {
                let context = FactoryContext {
                    service_type: self.service_type,
                    implementation_type: *implementation_type,
                };
                factory(&context)
                    .ok_or_else(|| Error::factory_returned_none(self.service_type.full_name()))
            }
            Implementation::Type(ty) => Err(Error::invalid_operation(format!(
                "descriptor for {} is implemented by type {}, not by a factory",
                self.service_type, ty
            ))),
        }
    }
}

/// Summary of one registration batch
#[derive(Debug, Clone, Default)]
pub struct RegistrationResult {
    /// Successfully registered source types, in registration order
    pub registered_types: Vec<TypeRef>,
    /// Always `registered_types.len()`
    pub count: usize,
    /// Wall-clock time spent on the batch
    pub elapsed: Duration,
}

impl RegistrationResult {
    /// Build a result; `count` is derived from the list
    pub fn new(registered_types: Vec<TypeRef>, elapsed: Duration) -> Self {
        let count = registered_types.len();
        Self {
            registered_types,
            count,
            elapsed,
        }
    }

    /// Zero result for an empty batch
    pub fn empty() -> Self {
        Self::default()
    }
}
