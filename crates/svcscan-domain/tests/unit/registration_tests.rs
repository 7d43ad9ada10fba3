//! Unit tests for registration value objects

use std::sync::Arc;
use std::time::Duration;

use svcscan_domain::Error;
use svcscan_domain::value_objects::{
    Instance, Lifetime, RegistrationMode, RegistrationResult, ServiceDescriptor, TypeInfo, TypeRef,
    service_factory,
};

static ICLOCK: TypeInfo = TypeInfo::interface("IClock", "app::time", "app-time");
static CLOCK: TypeInfo = TypeInfo {
    interfaces: &[&ICLOCK],
    ..TypeInfo::class("Clock", "app::time", "app-time")
};

#[test]
fn test_type_descriptor() {
    let descriptor = ServiceDescriptor::new(&ICLOCK, &CLOCK, Lifetime::Scoped);
    assert_eq!(descriptor.implementation_type(), &CLOCK as TypeRef);
    assert!(!descriptor.is_factory());
    assert!(!descriptor.is_self_registration());
    assert!(descriptor.instantiate().is_err());
}

#[test]
fn test_factory_descriptor_instantiates() {
    let factory = service_factory(|_| Some(Arc::new(42_u32) as Instance));
    let descriptor = ServiceDescriptor::with_factory(&ICLOCK, &CLOCK, factory, Lifetime::Singleton);
    assert!(descriptor.is_factory());

    let instance = descriptor.instantiate().unwrap();
    assert_eq!(instance.downcast_ref::<u32>(), Some(&42));
}

#[test]
fn test_factory_returning_none_fails() {
    let factory = service_factory(|_| None);
    let descriptor = ServiceDescriptor::with_factory(&ICLOCK, &CLOCK, factory, Lifetime::Transient);
    match descriptor.instantiate() {
        Err(Error::FactoryReturnedNone { service_type }) => {
            assert_eq!(service_type, "app::time::IClock")
        }
        other => panic!("Expected FactoryReturnedNone, got {other:?}"),
    }
}

#[test]
fn test_result_count_matches_types() {
    let result = RegistrationResult::new(vec![&CLOCK, &ICLOCK], Duration::from_millis(3));
    assert_eq!(result.count, result.registered_types.len());

    let empty = RegistrationResult::empty();
    assert_eq!(empty.count, 0);
    assert_eq!(empty.elapsed, Duration::ZERO);
}

#[test]
fn test_lifetime_and_mode_serde() {
    assert_eq!(serde_json::to_string(&Lifetime::Scoped).unwrap(), "\"scoped\"");
    let mode: RegistrationMode = serde_json::from_str("\"try_add_enumerable\"").unwrap();
    assert_eq!(mode, RegistrationMode::TryAddEnumerable);
    assert_eq!(RegistrationMode::default(), RegistrationMode::Default);
}
