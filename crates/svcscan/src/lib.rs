//! # svcscan
//!
//! Type discovery and service registration for dependency-injection
//! containers.
//!
//! Modules describe their types with `'static` metadata and register
//! themselves at link time. A scanning session selects modules, discovers the
//! classes matching its filters, chooses how each class is exposed, and emits
//! service descriptors into a container under a lifetime and insertion mode.
//!
//! ## Example
//!
//! ```
//! use svcscan::prelude::*;
//!
//! static IWIDGET_SERVICE: TypeInfo =
//!     TypeInfo::interface("IWidgetService", "app::widgets", "app-widgets");
//! static WIDGET_SERVICE: TypeInfo = TypeInfo {
//!     interfaces: &[&IWIDGET_SERVICE],
//!     ..TypeInfo::class("WidgetService", "app::widgets", "app-widgets")
//! };
//!
//! #[svcscan::linkme::distributed_slice(svcscan::LOADED_MODULES)]
//! #[linkme(crate = svcscan::linkme)]
//! static WIDGETS: ModuleInfo = ModuleInfo::new("app-widgets", || {
//!     vec![Ok(&IWIDGET_SERVICE), Ok(&WIDGET_SERVICE)]
//! });
//!
//! # fn main() -> svcscan::Result<()> {
//! let engine = ScanEngine::linked()?;
//! let mut services = ServiceCollection::new();
//!
//! let result = engine
//!     .scan()
//!     .from_module_of(&WIDGET_SERVICE)?
//!     .add_classes_implementing(&IWIDGET_SERVICE)?
//!     .as_implemented_interfaces()
//!     .with_scoped_lifetime(&mut services)?;
//!
//! assert_eq!(result.count, 1);
//! assert!(services.contains_pair(&IWIDGET_SERVICE, &WIDGET_SERVICE));
//! # Ok(())
//! # }
//! ```
//!
//! ## Architecture
//!
//! - `domain` - type metadata, descriptors, ports and the error type
//! - `application` - the engine, selectors, typestate scanner and register
//! - `infrastructure` - caches, module registry, service collection, config, logging

/// Domain layer - type metadata, descriptors and ports
///
/// Re-exports from the domain crate for convenience
pub mod domain {
    pub use svcscan_domain::*;
}

/// Application layer - scanning pipeline
///
/// Re-exports from the application crate for convenience
pub mod application {
    pub use svcscan_application::*;
}

/// Infrastructure layer - caches, registry, config and logging
///
/// Re-exports from the infrastructure crate for convenience
pub mod infrastructure {
    pub use svcscan_infrastructure::*;
}

/// Commonly used items
pub mod prelude {
    pub use svcscan_application::ScanEngine;
    pub use svcscan_domain::ports::{ModuleLoader, ServiceContainer};
    pub use svcscan_domain::value_objects::{
        AutoRegisterDescriptor, FactoryContext, GenericShape, Instance, Lifetime, ModuleInfo,
        ModuleRef, RegistrationMode, RegistrationResult, ServiceDescriptor, TypeInfo,
        TypeLoadError, TypeRef, service_factory,
    };
    pub use svcscan_infrastructure::config::{ConfigLoader, ScanConfig};
    pub use svcscan_infrastructure::container::ServiceCollection;
    pub use svcscan_infrastructure::registry::ModuleRegistry;
}

pub use linkme;

// Re-export commonly used types at the crate root
pub use domain::{Error, Result};
pub use svcscan_application::{EngineCacheStats, ScanEngine};
pub use svcscan_infrastructure::logging::init_logging;
pub use svcscan_infrastructure::registry::{DEFERRED_MODULES, LOADED_MODULES};
