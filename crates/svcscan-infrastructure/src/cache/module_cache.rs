//! Module and type cache
//!
//! Resolves module names to handles and handles to their declared types.
//! Already-loaded modules are indexed once, lazily; other names go through
//! the [`ModuleLoader`] and only successful loads are memoized, so a module
//! that fails to load is retried on the next lookup.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ModuleLoader;
use svcscan_domain::value_objects::{ModuleRef, TypeRef};
use tracing::{Level, debug};

use super::bounded::{BoundedCache, CacheStats};
use crate::constants::{MODULE_CACHE_CAPACITY, TYPE_CACHE_CAPACITY};

struct LoadedIndex {
    ordered: Vec<ModuleRef>,
    by_name: HashMap<&'static str, ModuleRef>,
}

/// Name → module and module → types cache
pub struct ModuleCache {
    loader: Arc<dyn ModuleLoader>,
    loaded: OnceLock<LoadedIndex>,
    modules: BoundedCache<String, ModuleRef>,
    types: BoundedCache<ModuleRef, Arc<[TypeRef]>>,
}

impl ModuleCache {
    /// Create a cache over `loader` with default capacities
    pub fn new(loader: Arc<dyn ModuleLoader>) -> Self {
        Self::with_capacity(loader, MODULE_CACHE_CAPACITY, TYPE_CACHE_CAPACITY)
    }

    /// Create a cache with explicit capacities
    pub fn with_capacity(
        loader: Arc<dyn ModuleLoader>,
        module_capacity: usize,
        type_capacity: usize,
    ) -> Self {
        Self {
            loader,
            loaded: OnceLock::new(),
            modules: BoundedCache::new("modules", module_capacity),
            types: BoundedCache::new("module-types", type_capacity),
        }
    }

    fn loaded_index(&self) -> &LoadedIndex {
        self.loaded.get_or_init(|| {
            let ordered = self.loader.loaded_modules();
            let by_name = ordered.iter().map(|module| (module.name, *module)).collect();
            if tracing::enabled!(Level::DEBUG) {
                debug!(count = ordered.len(), "indexed loaded modules");
            }
            LoadedIndex { ordered, by_name }
        })
    }

    fn ensure_open(&self) -> Result<()> {
        if self.modules.is_closed() {
            return Err(Error::cache_closed(self.modules.name()));
        }
        Ok(())
    }

    /// Every module currently loaded, in loader order
    pub fn loaded_modules(&self) -> Result<Vec<ModuleRef>> {
        self.ensure_open()?;
        Ok(self.loaded_index().ordered.clone())
    }

    /// Resolve a module by name
    ///
    /// Returns `Ok(None)` when the module is neither loaded nor loadable;
    /// only a closed cache is reported as an error.
    pub fn get_or_load(&self, name: &str) -> Result<Option<ModuleRef>> {
        self.ensure_open()?;
        if let Some(module) = self.loaded_index().by_name.get(name) {
            return Ok(Some(*module));
        }

        match self
            .modules
            .try_get_or_add(name.to_owned(), || self.loader.load(name))
        {
            Ok(module) => Ok(Some(module)),
            Err(error @ Error::CacheClosed { .. }) => Err(error),
            Err(error) => {
                if tracing::enabled!(Level::DEBUG) {
                    debug!(module = name, error = %error, "module load failed");
                }
                Ok(None)
            }
        }
    }

    /// Declared types of `module` that could be resolved
    pub fn get_types(&self, module: ModuleRef) -> Result<Arc<[TypeRef]>> {
        self.types.get_or_add(module, || resolve_types(module))
    }

    /// Drop every memoized module and type list
    pub fn clear(&self) -> Result<()> {
        self.modules.clear()?;
        self.types.clear()
    }

    /// Close both caches
    pub fn close(&self) {
        self.modules.close();
        self.types.close();
    }

    /// Counters of the module and type caches
    pub fn stats(&self) -> (CacheStats, CacheStats) {
        (self.modules.stats(), self.types.stats())
    }
}

fn resolve_types(module: ModuleRef) -> Arc<[TypeRef]> {
    (module.types)()
        .into_iter()
        .filter_map(|load| match load {
            Ok(ty) => Some(ty),
            Err(error) => {
                if tracing::enabled!(Level::DEBUG) {
                    debug!(module = module.name, error = %error, "skipping unresolvable type");
                }
                None
            }
        })
        .collect()
}

impl std::fmt::Debug for ModuleCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ModuleCache")
            .field("modules", &self.modules)
            .field("types", &self.types)
            .finish_non_exhaustive()
    }
}
