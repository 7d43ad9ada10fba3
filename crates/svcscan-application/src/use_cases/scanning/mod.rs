//! Scanning pipeline
//!
//! ModuleSelector → TypeSelector → strategy → ServiceRegister, driven by the
//! typestate [`TypeScanner`].

pub mod module_selector;
pub mod register;
pub mod scanner;
pub mod type_selector;

pub use module_selector::{CandidateModuleSet, ModuleSelector};
pub use register::{RegistrationPlan, ServiceRegister};
pub use scanner::{
    DiscoversTypes, Initial, ModulesSelected, SelectsModules, StrategyChosen, TypeScanner,
    TypesSelected,
};
pub use type_selector::TypeSelector;
