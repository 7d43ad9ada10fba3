//! Module Loader Port

use crate::error::Result;
use crate::value_objects::ModuleRef;

/// Source of modules to scan
///
/// `loaded_modules` is the set present at start-up; `load` resolves a module
/// on demand and may fail.
pub trait ModuleLoader: Send + Sync {
    /// Modules currently loaded in the process
    fn loaded_modules(&self) -> Vec<ModuleRef>;

    /// Load a module that is not among the loaded ones
    fn load(&self, name: &str) -> Result<ModuleRef>;
}
