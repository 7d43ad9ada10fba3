//! Type discovery
//!
//! Filters the declared types of the selected modules down to discoverable
//! classes (see [`DiscoveryRules`](crate::domain_services::DiscoveryRules))
//! that also satisfy a discovery filter. Results keep module order, then
//! declaration order inside each module. When more modules are selected than
//! the configured threshold, modules are scanned on the worker pool and the
//! per-module results are concatenated in module order.

use rayon::prelude::*;
use svcscan_domain::error::{Error, Result};
use svcscan_domain::value_objects::{ModuleRef, NamePattern, TypeRef};
use tracing::{Level, debug};

use super::module_selector::CandidateModuleSet;
use crate::engine::ScanEngine;

/// Runs discovery filters over a session's modules
pub struct TypeSelector<'a> {
    engine: &'a ScanEngine,
    modules: &'a CandidateModuleSet,
    allow_open_generics: bool,
}

impl<'a> TypeSelector<'a> {
    /// Selector over `modules`
    pub fn new(
        engine: &'a ScanEngine,
        modules: &'a CandidateModuleSet,
        allow_open_generics: bool,
    ) -> Self {
        Self {
            engine,
            modules,
            allow_open_generics,
        }
    }

    /// Every discoverable class
    pub fn classes(&self) -> Result<Vec<TypeRef>> {
        self.select(|_| Ok(true))
    }

    /// Discoverable classes accepted by `predicate`
    pub fn classes_where<F>(&self, predicate: F) -> Result<Vec<TypeRef>>
    where
        F: Fn(TypeRef) -> bool + Sync,
    {
        self.select(|ty| Ok(predicate(ty)))
    }

    /// Discoverable classes assignable to `interface`
    ///
    /// An open generic definition matches every class implementing one of
    /// its instantiations.
    pub fn classes_implementing(&self, interface: TypeRef) -> Result<Vec<TypeRef>> {
        let assignability = self.engine.assignability();
        self.select(|ty| assignability.is_assignable(interface, ty))
    }

    /// Discoverable classes deriving from `base`, excluding `base` itself
    pub fn classes_inheriting(&self, base: TypeRef) -> Result<Vec<TypeRef>> {
        let assignability = self.engine.assignability();
        self.select(|ty| Ok(ty != base && assignability.is_assignable(base, ty)?))
    }

    /// Discoverable classes whose namespace starts with `prefix`
    pub fn classes_in_namespace(&self, prefix: &str) -> Result<Vec<TypeRef>> {
        if prefix.trim().is_empty() {
            return Err(Error::invalid_argument("namespace prefix cannot be empty"));
        }
        self.select(|ty| Ok(ty.namespace.starts_with(prefix)))
    }

    /// Discoverable classes carrying `attribute`
    pub fn classes_with_attribute(&self, attribute: TypeRef) -> Result<Vec<TypeRef>> {
        self.select(|ty| Ok(ty.has_attribute(attribute)))
    }

    /// Discoverable classes carrying an auto-register descriptor
    pub fn classes_with_auto_register(&self) -> Result<Vec<TypeRef>> {
        self.select(|ty| Ok(ty.auto_register.is_some()))
    }

    /// Discoverable classes whose name matches `pattern`
    pub fn classes_with_name_pattern(&self, pattern: &str) -> Result<Vec<TypeRef>> {
        let pattern = NamePattern::new(pattern)?;
        self.select(|ty| Ok(pattern.matches(ty.name)))
    }

    fn select<F>(&self, filter: F) -> Result<Vec<TypeRef>>
    where
        F: Fn(TypeRef) -> Result<bool> + Sync,
    {
        let modules = self.modules.snapshot();
        if modules.is_empty() {
            return Err(Error::NoModulesSpecified);
        }

        let scan = |module: &ModuleRef| self.scan_module(*module, &filter);
        let per_module: Vec<Vec<TypeRef>> =
            if modules.len() > self.engine.config().parallelism.type_threshold {
                self.engine
                    .pool()
                    .install(|| modules.par_iter().map(scan).collect::<Result<_>>())?
            } else {
                modules.iter().map(scan).collect::<Result<_>>()?
            };

        let found: Vec<TypeRef> = per_module.into_iter().flatten().collect();
        if tracing::enabled!(Level::DEBUG) {
            debug!(
                modules = modules.len(),
                found = found.len(),
                "discovery filter applied"
            );
        }
        Ok(found)
    }

    fn scan_module<F>(&self, module: ModuleRef, filter: &F) -> Result<Vec<TypeRef>>
    where
        F: Fn(TypeRef) -> Result<bool>,
    {
        let rules = self.engine.rules();
        let mut matched = Vec::new();
        for ty in self.engine.module_cache().get_types(module)?.iter().copied() {
            if rules.is_discoverable(ty, self.allow_open_generics) && filter(ty)? {
                matched.push(ty);
            }
        }
        Ok(matched)
    }
}
