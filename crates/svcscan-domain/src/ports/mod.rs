//! Domain Port Interfaces
//!
//! Boundary contracts between the engine and its collaborators:
//!
//! - **container** - where descriptors are emitted
//! - **modules** - where modules come from

/// Dependency-injection container port
pub mod container;
/// Module loading port
pub mod modules;

pub use container::ServiceContainer;
pub use modules::ModuleLoader;
