//! Unit tests for the typestate scanning builder

use std::sync::Arc;

use svcscan_domain::error::Error;
use svcscan_domain::value_objects::{
    Instance, Lifetime, ModuleRef, RegistrationMode, service_factory,
};
use svcscan_infrastructure::container::ServiceCollection;
use tracing::Level;

use crate::fixtures::*;
use crate::log_capture::{at_level, capture};

#[test]
fn test_widget_service_end_to_end() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let result = engine
        .scan()
        .from_module_of(&WIDGET_SERVICE)
        .unwrap()
        .add_classes_implementing(&IWIDGET_SERVICE)
        .unwrap()
        .as_implemented_interfaces()
        .with_scoped_lifetime(&mut services)
        .unwrap();

    assert_eq!(result.count, 1);
    assert_eq!(services.len(), 1);
    let descriptors = services.descriptors_for(&IWIDGET_SERVICE);
    let descriptor = descriptors[0];
    assert_eq!(descriptor.implementation_type(), &WIDGET_SERVICE);
    assert_eq!(descriptor.lifetime, Lifetime::Scoped);
}

#[test]
fn test_zero_discovered_types_end_to_end() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let (result, events) = capture(|| {
        engine
            .scan()
            .from_module_names(&["app-widgets"])?
            .add_classes_with_name_pattern("Nothing*")?
            .as_self()
            .with_transient_lifetime(&mut services)
    });
    let result = result.unwrap();

    assert_eq!(result.count, 0);
    assert!(result.elapsed.is_zero());
    assert_eq!(at_level(&events, Level::INFO).len(), 1);
}

#[test]
fn test_discovery_without_resolved_modules_fails() {
    let engine = engine();
    let result = engine
        .scan()
        .from_module_names(&["app-missing"])
        .unwrap()
        .add_classes();
    assert!(matches!(result, Err(Error::NoModulesSpecified)));
}

#[test]
fn test_discovery_accumulates_without_dedup() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let scanner = engine
        .scan()
        .from_modules([&WIDGETS as ModuleRef])
        .add_classes_implementing(&IWIDGET_SERVICE)
        .unwrap()
        .add_classes_with_name_pattern("Widget*")
        .unwrap();
    assert_eq!(scanner.discovered_types().len(), 2);

    scanner.as_self().with_singleton_lifetime(&mut services).unwrap();
    assert_eq!(services.descriptors_for(&WIDGET_SERVICE).len(), 2);
}

#[test]
fn test_try_add_keeps_first_registration() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    for _ in 0..2 {
        engine
            .scan()
            .from_module_of(&PLAIN_CLOCK)
            .unwrap()
            .add_classes_where(|ty| ty.name == "PlainClock")
            .unwrap()
            .as_self()
            .try_add_singleton(&mut services)
            .unwrap();
    }
    assert_eq!(services.descriptors_for(&PLAIN_CLOCK).len(), 1);
}

#[test]
fn test_try_add_enumerable_allows_distinct_implementations() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    for _ in 0..2 {
        engine
            .scan()
            .from_module_pattern("app-data")
            .unwrap()
            .allow_open_generics()
            .add_classes_implementing(&IREPOSITORY)
            .unwrap()
            .as_type(&IREPOSITORY)
            .try_add_enumerable_transient(&mut services)
            .unwrap();
    }

    let implementations: Vec<_> = services
        .descriptors_for(&IREPOSITORY)
        .iter()
        .map(|d| d.implementation_type().name)
        .collect();
    assert_eq!(implementations, ["Repository", "UserRepository"]);
}

#[test]
fn test_as_types_rejects_empty_list() {
    let engine = engine();
    let result = engine
        .scan()
        .from_loaded_modules()
        .unwrap()
        .add_classes()
        .unwrap()
        .as_types(&[]);
    assert!(matches!(result, Err(Error::InvalidArgument { .. })));
}

#[test]
fn test_factory_strategy_through_builder() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    engine
        .scan()
        .from_module_of(&WIDGET_SERVICE)
        .unwrap()
        .add_classes_implementing(&IWIDGET_SERVICE)
        .unwrap()
        .using_factory(
            &IWIDGET_SERVICE,
            service_factory(|_| Some(Arc::new(7_u8) as Instance)),
        )
        .with_lifetime(Lifetime::Singleton, RegistrationMode::Default, &mut services)
        .unwrap();

    let descriptors = services.descriptors_for(&IWIDGET_SERVICE);
    let descriptor = descriptors[0];
    assert!(descriptor.is_factory());
    assert_eq!(
        descriptor.instantiate().unwrap().downcast_ref::<u8>(),
        Some(&7)
    );
}

#[test]
fn test_using_factory_for_without_services_fails_at_registration() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let result = engine
        .scan()
        .from_module_of(&WIDGET_SERVICE)
        .unwrap()
        .add_classes()
        .unwrap()
        .using_factory_for(&[], service_factory(|_| None))
        .with_scoped_lifetime(&mut services);

    assert!(matches!(result, Err(Error::InvalidOperation { .. })));
}

#[test]
fn test_loaded_modules_scan_registers_interfaces() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let result = engine
        .scan()
        .from_loaded_modules()
        .unwrap()
        .add_classes_in_namespace("app::catalog")
        .unwrap()
        .as_implemented_interfaces()
        .try_add_scoped(&mut services)
        .unwrap();

    assert_eq!(result.count, 2);
    assert!(services.contains_pair(&IWRITER, &CATALOG_STORE));
    assert!(services.contains_pair(&IREADER, &CATALOG_STORE));
    assert!(services.contains_pair(&PLAIN_CLOCK, &PLAIN_CLOCK));
}

#[test]
fn test_selected_modules_keep_first_insertion() {
    let engine = engine();

    let scanner = engine
        .scan()
        .from_module_names(&["app-data", "app-widgets", "app-data"])
        .unwrap();

    let names: Vec<_> = scanner
        .selected_modules()
        .iter()
        .map(|module| module.name)
        .collect();
    assert_eq!(names, ["app-data", "app-widgets"]);
}

#[test]
fn test_inheriting_classes_try_add_transient() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    for _ in 0..2 {
        engine
            .scan()
            .from_module_of(&STORE_BASE)
            .unwrap()
            .add_classes_inheriting(&STORE_BASE)
            .unwrap()
            .as_self()
            .try_add_transient(&mut services)
            .unwrap();
    }

    let descriptors = services.descriptors_for(&CATALOG_STORE);
    assert_eq!(descriptors.len(), 1);
    assert_eq!(descriptors[0].lifetime, Lifetime::Transient);
    assert!(!services.contains(&STORE_BASE));
}

#[test]
fn test_attribute_classes_try_add_enumerable_scoped() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    for _ in 0..2 {
        engine
            .scan()
            .from_module_names(&["app-catalog"])
            .unwrap()
            .add_classes_with_attribute(&SERVICE_ATTRIBUTE)
            .unwrap()
            .as_type(&IWRITER)
            .try_add_enumerable_scoped(&mut services)
            .unwrap();
    }

    assert_eq!(services.len(), 1);
    assert!(services.contains_pair(&IWRITER, &CATALOG_STORE));
}

#[test]
fn test_try_add_enumerable_singleton_through_builder() {
    let engine = engine();
    let mut services = ServiceCollection::new();

    let result = engine
        .scan()
        .from_modules([&WIDGETS as ModuleRef])
        .add_classes_implementing(&IWIDGET_SERVICE)
        .unwrap()
        .as_implemented_interfaces()
        .try_add_enumerable_singleton(&mut services)
        .unwrap();

    assert_eq!(result.registered_types, [&WIDGET_SERVICE]);
    assert_eq!(
        services.descriptors_for(&IWIDGET_SERVICE)[0].lifetime,
        Lifetime::Singleton
    );
}

#[test]
fn test_scanner_debug_lists_session_state() {
    let engine = engine();

    let error = engine
        .scan()
        .from_module_names(&["app-missing"])
        .unwrap()
        .add_classes()
        .unwrap_err();
    assert!(matches!(error, Error::NoModulesSpecified));

    let scanner = engine
        .scan()
        .from_modules([&WIDGETS as ModuleRef])
        .add_classes_implementing(&IWIDGET_SERVICE)
        .unwrap();
    let rendered = format!("{scanner:?}");
    assert!(rendered.contains("app-widgets"));
    assert!(rendered.contains("WidgetService"));
    assert!(rendered.contains("TypesSelected"));
}
