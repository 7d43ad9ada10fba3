//! Domain services
//!
//! Type rules the selection and registration stages share.
//!
//! | Service | Description |
//! |---------|-------------|
//! | [`DiscoveryRules`] | Eligibility and system/excluded namespace checks |
//! | [`AssignabilityCache`] | Memoized (service, implementation) assignability |
//! | [`InterfaceCache`] | Memoized registrable interfaces per type |

pub mod assignability;
pub mod eligibility;

pub use assignability::{AssignabilityCache, InterfaceCache, is_assignable};
pub use eligibility::DiscoveryRules;
