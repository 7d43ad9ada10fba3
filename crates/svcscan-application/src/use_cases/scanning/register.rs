//! Service registration
//!
//! The terminal stage: turns discovered types into [`ServiceDescriptor`]s and
//! hands them to a [`ServiceContainer`]. Types are processed strictly in
//! order. A type carrying an [`AutoRegisterDescriptor`] is registered the
//! way its descriptor asks; every other type follows the session strategy.
//!
//! The first failure is logged and returned. Descriptors already added stay
//! in the container.

use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ServiceContainer;
use svcscan_domain::value_objects::{
    AutoRegisterDescriptor, Lifetime, RegistrationMode, RegistrationResult,
    RegistrationStrategyKind, ServiceDescriptor, ServiceFactory, TypeRef,
};
use svcscan_infrastructure::utils::TimedOperation;
use tracing::{Level, debug, error, info};

use crate::engine::ScanEngine;

/// Everything the register needs besides the types
#[derive(Clone)]
pub struct RegistrationPlan {
    /// Session strategy
    pub strategy: RegistrationStrategyKind,
    /// Session lifetime
    pub lifetime: Lifetime,
    /// Insertion mode
    pub mode: RegistrationMode,
    /// Configured service types (specific types and factory strategies)
    pub service_types: Vec<TypeRef>,
    /// Configured factory (factory strategy)
    pub factory: Option<ServiceFactory>,
}

impl RegistrationPlan {
    /// Plan without service types or factory
    pub fn new(
        strategy: RegistrationStrategyKind,
        lifetime: Lifetime,
        mode: RegistrationMode,
    ) -> Self {
        Self {
            strategy,
            lifetime,
            mode,
            service_types: Vec::new(),
            factory: None,
        }
    }
}

impl std::fmt::Debug for RegistrationPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegistrationPlan")
            .field("strategy", &self.strategy)
            .field("lifetime", &self.lifetime)
            .field("mode", &self.mode)
            .field("service_types", &self.service_types)
            .field("has_factory", &self.factory.is_some())
            .finish()
    }
}

/// Emits descriptors for discovered types
pub struct ServiceRegister<'a> {
    engine: &'a ScanEngine,
}

impl<'a> ServiceRegister<'a> {
    /// Register backed by the engine's caches
    pub fn new(engine: &'a ScanEngine) -> Self {
        Self { engine }
    }

    /// Register every type under `plan`
    pub fn register_all<C>(
        &self,
        types: &[TypeRef],
        plan: &RegistrationPlan,
        container: &mut C,
    ) -> Result<RegistrationResult>
    where
        C: ServiceContainer + ?Sized,
    {
        if types.is_empty() {
            if tracing::enabled!(Level::INFO) {
                info!("no types discovered");
            }
            return Ok(RegistrationResult::empty());
        }

        if tracing::enabled!(Level::INFO) {
            info!(count = types.len(), "{} types discovered", types.len());
        }

        let timer = TimedOperation::start();
        let mut registered = Vec::with_capacity(types.len());
        for &ty in types {
            if let Err(error) = self.register_type(ty, plan, container) {
                if tracing::enabled!(Level::ERROR) {
                    error!(
                        type_name = %ty,
                        error = %error,
                        "failed registering type {}: {}",
                        ty,
                        error
                    );
                }
                return Err(error);
            }
            registered.push(ty);
        }

        Ok(RegistrationResult::new(registered, timer.elapsed()))
    }

    fn register_type<C>(
        &self,
        ty: TypeRef,
        plan: &RegistrationPlan,
        container: &mut C,
    ) -> Result<()>
    where
        C: ServiceContainer + ?Sized,
    {
        let descriptors = match ty.auto_register {
            Some(auto) => self.auto_descriptors(ty, auto, plan.lifetime)?,
            None => self.strategy_descriptors(ty, plan)?,
        };

        for descriptor in descriptors {
            let service = descriptor.service_type;
            let added = container.add(descriptor, plan.mode)?;
            if tracing::enabled!(Level::DEBUG) {
                if service == ty {
                    debug!(type_name = %ty, added, "type {} registered as self", ty);
                } else {
                    debug!(
                        type_name = %ty,
                        service = %service,
                        added,
                        "type {} registered as {}",
                        ty,
                        service
                    );
                }
            }
        }
        Ok(())
    }

    fn auto_descriptors(
        &self,
        ty: TypeRef,
        auto: &AutoRegisterDescriptor,
        session_lifetime: Lifetime,
    ) -> Result<Vec<ServiceDescriptor>> {
        let lifetime = auto.lifetime.unwrap_or(session_lifetime);
        let mut services: Vec<TypeRef> = Vec::new();

        for &service in auto.service_types {
            if !self.engine.assignability().is_assignable(service, ty)? {
                return Err(Error::invalid_operation(format!(
                    "{ty} is not assignable to {service}"
                )));
            }
            services.push(service);
        }
        if auto.as_implemented_interfaces {
            services.extend(self.engine.interfaces().registrable_interfaces(ty)?.iter());
        }
        if auto.as_self || services.is_empty() {
            services.push(ty);
        }

        Ok(services
            .into_iter()
            .map(|service| ServiceDescriptor::new(service, ty, lifetime))
            .collect())
    }

    fn strategy_descriptors(
        &self,
        ty: TypeRef,
        plan: &RegistrationPlan,
    ) -> Result<Vec<ServiceDescriptor>> {
        let lifetime = plan.lifetime;
        let descriptors = match plan.strategy {
            RegistrationStrategyKind::AsImplementedInterfaces => {
                let interfaces = self.engine.interfaces().registrable_interfaces(ty)?;
                if interfaces.is_empty() {
                    vec![ServiceDescriptor::new(ty, ty, lifetime)]
                } else {
                    interfaces
                        .iter()
                        .map(|&service| ServiceDescriptor::new(service, ty, lifetime))
                        .collect()
                }
            }
            RegistrationStrategyKind::AsSelf => vec![ServiceDescriptor::new(ty, ty, lifetime)],
            RegistrationStrategyKind::AsSpecificTypes => {
                if plan.service_types.is_empty() {
                    return Err(Error::invalid_operation("service types were not specified"));
                }
                let mut descriptors = Vec::new();
                for &service in &plan.service_types {
                    if self.engine.assignability().is_assignable(service, ty)? {
                        descriptors.push(ServiceDescriptor::new(service, ty, lifetime));
                    }
                }
                descriptors
            }
            RegistrationStrategyKind::UsingFactory => {
                let factory = match &plan.factory {
                    Some(factory) if !plan.service_types.is_empty() => factory,
                    _ => {
                        return Err(Error::invalid_operation(
                            "factory or service types not specified",
                        ));
                    }
                };
                plan.service_types
                    .iter()
                    .map(|&service| {
                        ServiceDescriptor::with_factory(service, ty, factory.clone(), lifetime)
                    })
                    .collect()
            }
        };
        Ok(descriptors)
    }
}
