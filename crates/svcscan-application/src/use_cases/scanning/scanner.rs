//! Typestate scanning builder
//!
//! A session moves through four states and each state only offers the calls
//! valid there, so an out-of-order call does not compile:
//!
//! ```text
//! Initial ──select──▶ ModulesSelected ──discover──▶ TypesSelected ──strategy──▶ StrategyChosen
//!                        │    ▲                        │    ▲                          │
//!                        └────┘ select                 └────┘ discover          lifetime/mode
//!                                                                                      ▼
//!                                                                           RegistrationResult
//! ```
//!
//! The lifetime methods consume the builder, so a session registers once.

use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ServiceContainer;
use svcscan_domain::value_objects::{
    Lifetime, ModuleRef, RegistrationMode, RegistrationResult, RegistrationStrategyKind,
    ServiceFactory, TypeRef,
};

use super::module_selector::{CandidateModuleSet, ModuleSelector};
use super::register::{RegistrationPlan, ServiceRegister};
use super::type_selector::TypeSelector;
use crate::engine::ScanEngine;

/// No module selected yet
#[derive(Debug, Clone, Copy, Default)]
pub struct Initial;

/// At least one module selection call made
#[derive(Debug, Clone, Copy, Default)]
pub struct ModulesSelected;

/// At least one discovery call made
#[derive(Debug, Clone, Copy, Default)]
pub struct TypesSelected;

/// Strategy recorded; awaiting lifetime and mode
#[derive(Clone)]
pub struct StrategyChosen {
    strategy: RegistrationStrategyKind,
    service_types: Vec<TypeRef>,
    factory: Option<ServiceFactory>,
}

impl std::fmt::Debug for StrategyChosen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StrategyChosen")
            .field("strategy", &self.strategy)
            .field("service_types", &self.service_types)
            .finish_non_exhaustive()
    }
}

/// States offering module selection
pub trait SelectsModules {}
impl SelectsModules for Initial {}
impl SelectsModules for ModulesSelected {}

/// States offering type discovery
pub trait DiscoversTypes {}
impl DiscoversTypes for ModulesSelected {}
impl DiscoversTypes for TypesSelected {}

/// One scanning session
pub struct TypeScanner<'e, S = Initial> {
    engine: &'e ScanEngine,
    modules: CandidateModuleSet,
    types: Vec<TypeRef>,
    allow_open_generics: bool,
    state: S,
}

impl<S: std::fmt::Debug> std::fmt::Debug for TypeScanner<'_, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let modules: Vec<&str> = self
            .modules
            .snapshot()
            .iter()
            .map(|module| module.name)
            .collect();
        f.debug_struct("TypeScanner")
            .field("modules", &modules)
            .field("types", &self.types)
            .field("allow_open_generics", &self.allow_open_generics)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl<'e> TypeScanner<'e, Initial> {
    /// Start a session on `engine`
    pub fn new(engine: &'e ScanEngine) -> Self {
        Self {
            engine,
            modules: CandidateModuleSet::new(),
            types: Vec::new(),
            allow_open_generics: false,
            state: Initial,
        }
    }
}

impl<'e, S> TypeScanner<'e, S> {
    fn into_state<T>(self, state: T) -> TypeScanner<'e, T> {
        TypeScanner {
            engine: self.engine,
            modules: self.modules,
            types: self.types,
            allow_open_generics: self.allow_open_generics,
            state,
        }
    }

    /// Modules selected so far, in insertion order
    pub fn selected_modules(&self) -> Vec<ModuleRef> {
        self.modules.snapshot()
    }

    /// Types discovered so far, in discovery order
    pub fn discovered_types(&self) -> &[TypeRef] {
        &self.types
    }
}

impl<'e, S: SelectsModules> TypeScanner<'e, S> {
    fn selector(&self) -> ModuleSelector<'_> {
        ModuleSelector::new(self.engine, &self.modules)
    }

    /// Add the given modules
    pub fn from_modules<I>(self, modules: I) -> TypeScanner<'e, ModulesSelected>
    where
        I: IntoIterator<Item = ModuleRef>,
    {
        self.selector().from_modules(modules);
        self.into_state(ModulesSelected)
    }

    /// Add modules by name; unknown names are logged and skipped
    pub fn from_module_names<N>(self, names: &[N]) -> Result<TypeScanner<'e, ModulesSelected>>
    where
        N: AsRef<str> + Sync,
    {
        self.selector().from_module_names(names)?;
        Ok(self.into_state(ModulesSelected))
    }

    /// Add the module declaring `marker`
    pub fn from_module_of(self, marker: TypeRef) -> Result<TypeScanner<'e, ModulesSelected>> {
        self.selector().from_module_of(marker)?;
        Ok(self.into_state(ModulesSelected))
    }

    /// Add every loaded module whose name matches `pattern`
    pub fn from_module_pattern(self, pattern: &str) -> Result<TypeScanner<'e, ModulesSelected>> {
        self.selector().from_module_pattern(pattern)?;
        Ok(self.into_state(ModulesSelected))
    }

    /// Add every loaded, non-system module
    pub fn from_loaded_modules(self) -> Result<TypeScanner<'e, ModulesSelected>> {
        self.selector().from_loaded_modules()?;
        Ok(self.into_state(ModulesSelected))
    }
}

impl<'e, S: DiscoversTypes> TypeScanner<'e, S> {
    fn discover<F>(mut self, find: F) -> Result<TypeScanner<'e, TypesSelected>>
    where
        F: FnOnce(&TypeSelector<'_>) -> Result<Vec<TypeRef>>,
    {
        let found = find(&TypeSelector::new(
            self.engine,
            &self.modules,
            self.allow_open_generics,
        ))?;
        self.types.extend(found);
        Ok(self.into_state(TypesSelected))
    }

    /// Let later discovery calls return open generic definitions
    pub fn allow_open_generics(mut self) -> Self {
        self.allow_open_generics = true;
        self
    }

    /// Add every discoverable class
    pub fn add_classes(self) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes())
    }

    /// Add discoverable classes accepted by `predicate`
    pub fn add_classes_where<F>(self, predicate: F) -> Result<TypeScanner<'e, TypesSelected>>
    where
        F: Fn(TypeRef) -> bool + Sync,
    {
        self.discover(|selector| selector.classes_where(predicate))
    }

    /// Add classes assignable to `interface`, open generics included
    pub fn add_classes_implementing(
        self,
        interface: TypeRef,
    ) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_implementing(interface))
    }

    /// Add classes deriving from `base`, excluding `base`
    pub fn add_classes_inheriting(self, base: TypeRef) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_inheriting(base))
    }

    /// Add classes whose namespace starts with `prefix`
    pub fn add_classes_in_namespace(self, prefix: &str) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_in_namespace(prefix))
    }

    /// Add classes carrying `attribute`
    pub fn add_classes_with_attribute(
        self,
        attribute: TypeRef,
    ) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_with_attribute(attribute))
    }

    /// Add classes carrying an auto-register descriptor
    pub fn add_classes_with_auto_register(self) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_with_auto_register())
    }

    /// Add classes whose name matches `pattern`
    pub fn add_classes_with_name_pattern(
        self,
        pattern: &str,
    ) -> Result<TypeScanner<'e, TypesSelected>> {
        self.discover(|selector| selector.classes_with_name_pattern(pattern))
    }
}

impl<'e> TypeScanner<'e, TypesSelected> {
    fn choose(
        self,
        strategy: RegistrationStrategyKind,
        service_types: Vec<TypeRef>,
        factory: Option<ServiceFactory>,
    ) -> TypeScanner<'e, StrategyChosen> {
        self.into_state(StrategyChosen {
            strategy,
            service_types,
            factory,
        })
    }

    /// Register under `service_type`
    pub fn as_type(self, service_type: TypeRef) -> TypeScanner<'e, StrategyChosen> {
        self.choose(
            RegistrationStrategyKind::AsSpecificTypes,
            vec![service_type],
            None,
        )
    }

    /// Register under each of `service_types` the type is assignable to
    ///
    /// Fails immediately on an empty list.
    pub fn as_types(self, service_types: &[TypeRef]) -> Result<TypeScanner<'e, StrategyChosen>> {
        if service_types.is_empty() {
            return Err(Error::invalid_argument("service types cannot be empty"));
        }
        Ok(self.choose(
            RegistrationStrategyKind::AsSpecificTypes,
            service_types.to_vec(),
            None,
        ))
    }

    /// Register under every registrable implemented interface
    pub fn as_implemented_interfaces(self) -> TypeScanner<'e, StrategyChosen> {
        self.choose(RegistrationStrategyKind::AsImplementedInterfaces, Vec::new(), None)
    }

    /// Register each type as itself
    pub fn as_self(self) -> TypeScanner<'e, StrategyChosen> {
        self.choose(RegistrationStrategyKind::AsSelf, Vec::new(), None)
    }

    /// Register `service_type` produced by `factory`
    pub fn using_factory(
        self,
        service_type: TypeRef,
        factory: ServiceFactory,
    ) -> TypeScanner<'e, StrategyChosen> {
        self.choose(
            RegistrationStrategyKind::UsingFactory,
            vec![service_type],
            Some(factory),
        )
    }

    /// Register each of `service_types` produced by `factory`
    pub fn using_factory_for(
        self,
        service_types: &[TypeRef],
        factory: ServiceFactory,
    ) -> TypeScanner<'e, StrategyChosen> {
        self.choose(
            RegistrationStrategyKind::UsingFactory,
            service_types.to_vec(),
            Some(factory),
        )
    }
}

impl<'e> TypeScanner<'e, StrategyChosen> {
    /// Register with an explicit lifetime and mode
    pub fn with_lifetime<C>(
        self,
        lifetime: Lifetime,
        mode: RegistrationMode,
        container: &mut C,
    ) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        let StrategyChosen {
            strategy,
            service_types,
            factory,
        } = self.state;
        let plan = RegistrationPlan {
            strategy,
            lifetime,
            mode,
            service_types,
            factory,
        };
        ServiceRegister::new(self.engine).register_all(&self.types, &plan, container)
    }

    /// Register as scoped, always adding
    pub fn with_scoped_lifetime<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Scoped, RegistrationMode::Default, container)
    }

    /// Register as singleton, always adding
    pub fn with_singleton_lifetime<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Singleton, RegistrationMode::Default, container)
    }

    /// Register as transient, always adding
    pub fn with_transient_lifetime<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Transient, RegistrationMode::Default, container)
    }

    /// Register as scoped unless the service type is already registered
    pub fn try_add_scoped<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Scoped, RegistrationMode::TryAdd, container)
    }

    /// Register as singleton unless the service type is already registered
    pub fn try_add_singleton<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Singleton, RegistrationMode::TryAdd, container)
    }

    /// Register as transient unless the service type is already registered
    pub fn try_add_transient<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Transient, RegistrationMode::TryAdd, container)
    }

    /// Register as scoped unless the exact pair is already registered
    pub fn try_add_enumerable_scoped<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Scoped, RegistrationMode::TryAddEnumerable, container)
    }

    /// Register as singleton unless the exact pair is already registered
    pub fn try_add_enumerable_singleton<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Singleton, RegistrationMode::TryAddEnumerable, container)
    }

    /// Register as transient unless the exact pair is already registered
    pub fn try_add_enumerable_transient<C>(self, container: &mut C) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        self.with_lifetime(Lifetime::Transient, RegistrationMode::TryAddEnumerable, container)
    }
}
