//! Unit tests for the in-memory service collection

use svcscan_domain::ports::ServiceContainer;
use svcscan_domain::value_objects::{
    Lifetime, RegistrationMode, ServiceDescriptor, TypeInfo, TypeRef,
};
use svcscan_infrastructure::container::ServiceCollection;

static ICLOCK: TypeInfo = TypeInfo::interface("IClock", "app::time", "app-time");
static SYSTEM_CLOCK: TypeInfo = TypeInfo::class("SystemClock", "app::time", "app-time");
static FAKE_CLOCK: TypeInfo = TypeInfo::class("FakeClock", "app::time", "app-time");

fn descriptor(service: TypeRef, implementation: TypeRef) -> ServiceDescriptor {
    ServiceDescriptor::new(service, implementation, Lifetime::Singleton)
}

#[test]
fn test_default_mode_always_adds() {
    let mut services = ServiceCollection::new();
    assert!(services.add(descriptor(&ICLOCK, &SYSTEM_CLOCK), RegistrationMode::Default).unwrap());
    assert!(services.add(descriptor(&ICLOCK, &SYSTEM_CLOCK), RegistrationMode::Default).unwrap());
    assert_eq!(services.len(), 2);
}

#[test]
fn test_try_add_skips_existing_service_type() {
    let mut services = ServiceCollection::new();
    services
        .add(descriptor(&ICLOCK, &SYSTEM_CLOCK), RegistrationMode::Default)
        .unwrap();

    let added = services
        .add(descriptor(&ICLOCK, &FAKE_CLOCK), RegistrationMode::TryAdd)
        .unwrap();

    assert!(!added);
    assert_eq!(services.descriptors_for(&ICLOCK).len(), 1);
    assert!(!services.contains_pair(&ICLOCK, &FAKE_CLOCK));
}

#[test]
fn test_try_add_enumerable_skips_only_exact_pairs() {
    let mut services = ServiceCollection::new();
    let mode = RegistrationMode::TryAddEnumerable;

    assert!(services.add(descriptor(&ICLOCK, &SYSTEM_CLOCK), mode).unwrap());
    assert!(services.add(descriptor(&ICLOCK, &FAKE_CLOCK), mode).unwrap());
    assert!(!services.add(descriptor(&ICLOCK, &SYSTEM_CLOCK), mode).unwrap());

    let implementations: Vec<_> = services
        .descriptors_for(&ICLOCK)
        .iter()
        .map(|d| d.implementation_type().name)
        .collect();
    assert_eq!(implementations, ["SystemClock", "FakeClock"]);
}

#[test]
fn test_descriptors_keep_insertion_order() {
    let mut services = ServiceCollection::new();
    services
        .add(descriptor(&SYSTEM_CLOCK, &SYSTEM_CLOCK), RegistrationMode::Default)
        .unwrap();
    services
        .add(descriptor(&ICLOCK, &SYSTEM_CLOCK), RegistrationMode::Default)
        .unwrap();

    let services_in_order: Vec<_> = services
        .descriptors()
        .iter()
        .map(|d| d.service_type.name)
        .collect();
    assert_eq!(services_in_order, ["SystemClock", "IClock"]);
    assert!(services.iter().next().is_some_and(|d| d.is_self_registration()));
}
