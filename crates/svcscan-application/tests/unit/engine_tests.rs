//! Unit tests for the scan engine

use svcscan_application::ScanEngine;
use svcscan_domain::error::Error;
use svcscan_domain::value_objects::{ModuleInfo, TypeInfo};
use svcscan_infrastructure::config::ScanConfig;
use svcscan_infrastructure::container::ServiceCollection;
use svcscan_infrastructure::registry::LOADED_MODULES;

use crate::fixtures::*;

static ILINKED: TypeInfo = TypeInfo::interface("ILinked", "linked::svc", "linked-svc");
static LINKED_SERVICE: TypeInfo = TypeInfo {
    interfaces: &[&ILINKED],
    ..TypeInfo::class("LinkedService", "linked::svc", "linked-svc")
};

#[linkme::distributed_slice(LOADED_MODULES)]
static LINKED: ModuleInfo = ModuleInfo::new("linked-svc", || vec![Ok(&LINKED_SERVICE)]);

#[test]
fn test_linked_engine_sees_registered_modules() {
    let engine = ScanEngine::linked().unwrap();
    let mut services = ServiceCollection::new();

    engine
        .scan()
        .from_module_of(&LINKED_SERVICE)
        .unwrap()
        .add_classes()
        .unwrap()
        .as_implemented_interfaces()
        .with_scoped_lifetime(&mut services)
        .unwrap();

    assert!(services.contains_pair(&ILINKED, &LINKED_SERVICE));
}

#[test]
fn test_global_engine_is_initialized_once() {
    let first = ScanEngine::global().unwrap();
    let second = ScanEngine::global().unwrap();
    assert!(std::ptr::eq(first, second));

    let replacement = ScanEngine::linked().unwrap();
    assert!(matches!(
        ScanEngine::install_global(replacement),
        Err(Error::InvalidOperation { .. })
    ));
}

#[test]
fn test_worker_count_follows_configuration() {
    let mut config = ScanConfig::default();
    config.parallelism.max_workers = 2;
    let engine = engine_with(config);
    assert_eq!(engine.config().parallelism.max_workers, 2);
    assert!(format!("{engine:?}").contains("workers: 2"));
}

#[test]
fn test_clear_caches_resets_memoized_entries() {
    let engine = engine();
    let mut services = ServiceCollection::new();
    engine
        .scan()
        .from_module_names(&["plugin-hello"])
        .unwrap()
        .add_classes()
        .unwrap()
        .as_implemented_interfaces()
        .with_transient_lifetime(&mut services)
        .unwrap();

    let before = engine.cache_stats();
    assert_eq!(before.modules.entries, 1);
    assert_eq!(before.module_types.entries, 1);
    assert_eq!(before.interfaces.entries, 1);

    engine.clear_caches().unwrap();
    let after = engine.cache_stats();
    assert_eq!(after.modules.entries, 0);
    assert_eq!(after.module_types.entries, 0);
    assert_eq!(after.interfaces.entries, 0);
}

#[test]
fn test_closed_engine_rejects_sessions() {
    let engine = engine();
    engine.close();

    let result = engine.scan().from_module_of(&WIDGET_SERVICE);
    assert!(matches!(result, Err(Error::CacheClosed { .. })));
    let result = engine.scan().from_loaded_modules();
    assert!(matches!(result, Err(Error::CacheClosed { .. })));
}
