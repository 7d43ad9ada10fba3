//! Service Container Port
//!
//! The engine never implements a container; it hands descriptors to one.
//! Insertion policy ([`RegistrationMode`]) is entrusted to the container so
//! the engine never has to read existing registrations itself.

use crate::error::Result;
use crate::value_objects::{RegistrationMode, ServiceDescriptor};

/// Target of service registration
///
/// # Example
///
/// ```ignore
/// let mut services = ServiceCollection::new();
/// let added = services.add(descriptor, RegistrationMode::TryAdd)?;
/// ```
pub trait ServiceContainer: Send {
    /// Add a descriptor under `mode`
    ///
    /// Returns `Ok(true)` when the descriptor was stored and `Ok(false)` when
    /// the mode decided to skip it. An `Err` aborts the current batch.
    fn add(&mut self, descriptor: ServiceDescriptor, mode: RegistrationMode) -> Result<bool>;

    /// Every stored descriptor in insertion order
    fn descriptors(&self) -> &[ServiceDescriptor];
}
