//! Service container adapters
//!
//! | Adapter | Description |
//! |---------|-------------|
//! | [`ServiceCollection`] | In-memory descriptor list honouring every [`RegistrationMode`](svcscan_domain::RegistrationMode) |

pub mod collection;

pub use collection::ServiceCollection;
