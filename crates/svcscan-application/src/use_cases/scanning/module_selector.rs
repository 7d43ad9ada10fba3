//! Module selection
//!
//! Five additive strategies populate a session's [`CandidateModuleSet`]:
//!
//! | Strategy | Source |
//! |----------|--------|
//! | `from_modules` | Handles given directly |
//! | `from_module_names` | Names resolved through the module cache |
//! | `from_module_of` | The module declaring a marker type |
//! | `from_module_pattern` | Loaded modules whose name matches a [`NamePattern`] |
//! | `from_loaded_modules` | Every loaded module that is not a system module |
//!
//! Above the configured thresholds the per-module work runs on the engine's
//! worker pool. Whatever the scheduling, the resulting set is the same.

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, PoisonError};

use rayon::prelude::*;
use svcscan_domain::error::Result;
use svcscan_domain::value_objects::{ModuleRef, NamePattern, TypeRef};
use tracing::{Level, debug, warn};

use crate::engine::ScanEngine;

#[derive(Debug, Default)]
struct ModuleSetState {
    ordered: Vec<ModuleRef>,
    names: HashSet<&'static str>,
}

/// Modules selected for one session, unique by name
///
/// Insertion is guarded by a single lock; iteration follows insertion order.
#[derive(Debug, Default)]
pub struct CandidateModuleSet {
    state: Mutex<ModuleSetState>,
}

impl CandidateModuleSet {
    /// Empty set
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ModuleSetState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Add `module`; returns `false` when it was already present
    pub fn insert(&self, module: ModuleRef) -> bool {
        let mut state = self.lock();
        if !state.names.insert(module.name) {
            return false;
        }
        state.ordered.push(module);
        true
    }

    /// Number of selected modules
    pub fn len(&self) -> usize {
        self.lock().ordered.len()
    }

    /// Whether no module is selected
    pub fn is_empty(&self) -> bool {
        self.lock().ordered.is_empty()
    }

    /// Whether a module with `name` is selected
    pub fn contains(&self, name: &str) -> bool {
        self.lock().names.contains(name)
    }

    /// Selected modules in insertion order
    pub fn snapshot(&self) -> Vec<ModuleRef> {
        self.lock().ordered.clone()
    }
}

/// Populates a [`CandidateModuleSet`] from the engine's modules
pub struct ModuleSelector<'a> {
    engine: &'a ScanEngine,
    set: &'a CandidateModuleSet,
}

impl<'a> ModuleSelector<'a> {
    /// Selector adding into `set`
    pub fn new(engine: &'a ScanEngine, set: &'a CandidateModuleSet) -> Self {
        Self { engine, set }
    }

    /// Add the given modules
    pub fn from_modules<I>(&self, modules: I)
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        for module in modules {
            self.set.insert(module);
        }
    }

    /// Resolve and add modules by name; unknown names are logged and skipped
    pub fn from_module_names<S>(&self, names: &[S]) -> Result<()>
    where
        S: AsRef<str> + Sync,
    {
        let threshold = self.engine.config().parallelism.module_threshold;
        if names.len() > threshold {
            self.engine.pool().install(|| {
                names
                    .par_iter()
                    .try_for_each(|name| self.add_by_name(name.as_ref()))
            })
        } else {
            names
                .iter()
                .try_for_each(|name| self.add_by_name(name.as_ref()))
        }
    }

    /// Add the module declaring `marker`
    pub fn from_module_of(&self, marker: TypeRef) -> Result<()> {
        self.add_by_name(marker.module)
    }

    /// Add every loaded module whose name matches `pattern`
    ///
    /// Fails with an invalid-argument error on a blank pattern.
    pub fn from_module_pattern(&self, pattern: &str) -> Result<()> {
        let pattern = NamePattern::new(pattern)?;
        let loaded = self.engine.module_cache().loaded_modules()?;
        let threshold = self.engine.config().parallelism.module_threshold;
        self.add_matching(&loaded, threshold, |module| pattern.matches(module.name));
        Ok(())
    }

    /// Add every loaded module that is not a system module
    pub fn from_loaded_modules(&self) -> Result<()> {
        let loaded = self.engine.module_cache().loaded_modules()?;
        let threshold = self.engine.config().parallelism.loaded_module_threshold;
        let rules = self.engine.rules();
        self.add_matching(&loaded, threshold, |module| {
            !rules.is_system_module(module.name)
        });
        Ok(())
    }

    fn add_by_name(&self, name: &str) -> Result<()> {
        match self.engine.module_cache().get_or_load(name)? {
            Some(module) => {
                self.add(module);
            }
            None => {
                if tracing::enabled!(Level::WARN) {
                    warn!(module = name, "module {} not found", name);
                }
            }
        }
        Ok(())
    }

    fn add_matching<F>(&self, candidates: &[ModuleRef], threshold: usize, keep: F)
    where
        F: Fn(ModuleRef) -> bool + Sync,
    {
        let visit = |module: &ModuleRef| {
            if keep(*module) {
                self.add(*module);
            }
        };
        if candidates.len() > threshold {
            self.engine
                .pool()
                .install(|| candidates.par_iter().for_each(visit));
        } else {
            candidates.iter().for_each(visit);
        }
    }

    fn add(&self, module: ModuleRef) {
        if self.set.insert(module) && tracing::enabled!(Level::DEBUG) {
            debug!(module = module.name, "module selected");
        }
    }
}
