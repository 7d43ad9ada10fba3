//! Domain Value Objects
//!
//! Immutable values describing what the engine scans and what it emits.
//!
//! | Value Object | Description |
//! |--------------|-------------|
//! | [`TypeInfo`] | Static metadata of one type |
//! | [`ModuleInfo`] | Static metadata of one module and its type loader |
//! | [`AutoRegisterDescriptor`] | Per-type registration override |
//! | [`ServiceDescriptor`] | A registration emitted into a container |
//! | [`RegistrationResult`] | Summary of a registration batch |
//! | [`NamePattern`] | Wildcard-or-substring name matcher |

/// Module metadata
pub mod module;
/// Name matching helpers
pub mod naming;
/// Lifetimes, modes, descriptors and results
pub mod registration;
/// Type metadata
pub mod types;

pub use module::{ModuleInfo, ModuleRef, TypeLoad, TypeLoadError};
pub use naming::{NamePattern, has_segment_prefix};
pub use registration::{
    FactoryContext, Implementation, Instance, Lifetime, RegistrationMode, RegistrationResult,
    RegistrationStrategyKind, ServiceDescriptor, ServiceFactory, service_factory,
};
pub use types::{
    Ancestors, AutoRegisterDescriptor, GenericKey, GenericShape, TypeInfo, TypeKind, TypeRef,
    well_known,
};
