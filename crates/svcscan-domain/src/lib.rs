//! # svcscan Domain Layer
//!
//! Core types for the type-discovery and service-registration engine.
//! Nothing in here performs discovery or registration; this crate only
//! describes the vocabulary the other layers speak.
//!
//! ## Contents
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`value_objects`] | Static type and module metadata, descriptors, results |
//! | [`ports`] | Container and module-loader contracts |
//! | [`error`] | Domain error type and `Result` alias |
//! | [`constants`] | System prefixes, disposal markers, fan-out thresholds |
//!
//! ## Static metadata
//!
//! Rust has no runtime type catalog, so every registrable type describes
//! itself through a `'static` [`TypeInfo`](value_objects::TypeInfo) and every
//! module through a [`ModuleInfo`](value_objects::ModuleInfo):
//!
//! ```
//! use svcscan_domain::value_objects::{ModuleInfo, TypeInfo, TypeRef};
//!
//! static IGREETER: TypeInfo = TypeInfo::interface("IGreeter", "app::greet", "app-greet");
//! static GREETER: TypeInfo = TypeInfo {
//!     interfaces: &[&IGREETER],
//!     ..TypeInfo::class("Greeter", "app::greet", "app-greet")
//! };
//! static APP: ModuleInfo = ModuleInfo::new("app-greet", || vec![Ok(&GREETER), Ok(&IGREETER)]);
//!
//! let greeter: TypeRef = &GREETER;
//! assert_eq!(greeter.full_name(), "app::greet::Greeter");
//! assert_eq!((APP.types)().len(), 2);
//! ```

pub mod constants;
pub mod error;
pub mod ports;
pub mod value_objects;

pub use error::{Error, Result};
pub use ports::{ModuleLoader, ServiceContainer};
pub use value_objects::*;
