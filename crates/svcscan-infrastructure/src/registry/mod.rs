//! Module Registry System
//!
//! Modules register themselves at link time through `linkme` distributed
//! slices, replacing a runtime catalog of loaded modules.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                     Module Registration Flow                     │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  1. Module defines:  #[linkme::distributed_slice(LOADED_MODULES)]│
//! │                      static APP: ModuleInfo = ...               │
//! │                              ↓                                  │
//! │  2. Registry reads:  ModuleRegistry::linked()                   │
//! │                              ↓                                  │
//! │  3. ModuleCache indexes loaded modules, loads deferred ones     │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ### Registering a module
//!
//! ```ignore
//! use svcscan_infrastructure::registry::LOADED_MODULES;
//!
//! #[linkme::distributed_slice(LOADED_MODULES)]
//! static WIDGETS: ModuleInfo = ModuleInfo::new("app-widgets", || vec![Ok(&WIDGET_SERVICE)]);
//! ```

pub mod modules;

pub use modules::{DEFERRED_MODULES, LOADED_MODULES, ModuleRegistry, list_linked_modules};
