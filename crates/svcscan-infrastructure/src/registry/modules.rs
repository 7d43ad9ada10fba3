//! Link-time module registry
//!
//! `LOADED_MODULES` holds modules present from start-up. `DEFERRED_MODULES`
//! holds modules that are only available through an explicit load by name.

use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ModuleLoader;
use svcscan_domain::value_objects::{ModuleInfo, ModuleRef};

/// Modules loaded at start-up
#[linkme::distributed_slice]
pub static LOADED_MODULES: [ModuleInfo] = [..];

/// Modules loadable on demand by name
#[linkme::distributed_slice]
pub static DEFERRED_MODULES: [ModuleInfo] = [..];

/// Default [`ModuleLoader`]
///
/// Built from the linkme slices with [`ModuleRegistry::linked`], or
/// assembled explicitly for isolated scans and tests.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    loaded: Vec<ModuleRef>,
    deferred: Vec<ModuleRef>,
}

impl ModuleRegistry {
    /// Empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry over every module registered in the linkme slices
    pub fn linked() -> Self {
        Self {
            loaded: LOADED_MODULES.into_iter().collect(),
            deferred: DEFERRED_MODULES.into_iter().collect(),
        }
    }

    /// Add modules to the loaded set
    pub fn with_loaded<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        self.loaded.extend(modules);
        self
    }

    /// Add modules to the deferred set
    pub fn with_deferred<I>(mut self, modules: I) -> Self
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        self.deferred.extend(modules);
        self
    }
}

impl ModuleLoader for ModuleRegistry {
    fn loaded_modules(&self) -> Vec<ModuleRef> {
        self.loaded.clone()
    }

    fn load(&self, name: &str) -> Result<ModuleRef> {
        self.deferred
            .iter()
            .chain(self.loaded.iter())
            .find(|module| module.name == name)
            .copied()
            .ok_or_else(|| Error::module_load(name, "module is not registered"))
    }
}

/// Names of every module in the linkme slices, loaded first
pub fn list_linked_modules() -> Vec<&'static str> {
    LOADED_MODULES
        .iter()
        .chain(DEFERRED_MODULES.iter())
        .map(|module| module.name)
        .collect()
}
