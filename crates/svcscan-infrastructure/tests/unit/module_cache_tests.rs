//! Unit tests for the module and type cache

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ModuleLoader;
use svcscan_domain::value_objects::{ModuleInfo, ModuleRef, TypeInfo, TypeLoadError};
use svcscan_infrastructure::cache::ModuleCache;
use svcscan_infrastructure::registry::ModuleRegistry;

static ORDER: TypeInfo = TypeInfo::class("Order", "shop::orders", "shop-orders");
static INVOICE: TypeInfo = TypeInfo::class("Invoice", "shop::orders", "shop-orders");

static ORDERS: ModuleInfo = ModuleInfo::new("shop-orders", || {
    vec![
        Ok(&ORDER),
        Err(TypeLoadError::new("shop::orders::Ghost", "unresolved base")),
        Ok(&INVOICE),
    ]
});
static PLUGINS: ModuleInfo = ModuleInfo::new("shop-plugins", Vec::new);

/// Loader that counts dynamic loads
struct CountingLoader {
    inner: ModuleRegistry,
    loads: AtomicUsize,
}

impl CountingLoader {
    fn new() -> Self {
        Self {
            inner: ModuleRegistry::new()
                .with_loaded([&ORDERS as ModuleRef])
                .with_deferred([&PLUGINS as ModuleRef]),
            loads: AtomicUsize::new(0),
        }
    }
}

impl ModuleLoader for CountingLoader {
    fn loaded_modules(&self) -> Vec<ModuleRef> {
        self.inner.loaded_modules()
    }

    fn load(&self, name: &str) -> Result<ModuleRef> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        self.inner.load(name)
    }
}

#[test]
fn test_loaded_module_resolves_without_loader() {
    let loader = Arc::new(CountingLoader::new());
    let cache = ModuleCache::new(loader.clone());

    let module = cache.get_or_load("shop-orders").unwrap();
    assert_eq!(module.map(|m| m.name), Some("shop-orders"));
    assert_eq!(loader.loads.load(Ordering::SeqCst), 0);
}

#[test]
fn test_dynamic_load_is_memoized() {
    let loader = Arc::new(CountingLoader::new());
    let cache = ModuleCache::new(loader.clone());

    let first = cache.get_or_load("shop-plugins").unwrap().unwrap();
    let second = cache.get_or_load("shop-plugins").unwrap().unwrap();

    assert!(std::ptr::eq(first, second));
    assert_eq!(loader.loads.load(Ordering::SeqCst), 1);
}

#[test]
fn test_failed_load_is_retried() {
    let loader = Arc::new(CountingLoader::new());
    let cache = ModuleCache::new(loader.clone());

    assert!(cache.get_or_load("shop-missing").unwrap().is_none());
    assert!(cache.get_or_load("shop-missing").unwrap().is_none());
    assert_eq!(loader.loads.load(Ordering::SeqCst), 2);
}

#[test]
fn test_types_skip_load_errors_in_declaration_order() {
    let cache = ModuleCache::new(Arc::new(CountingLoader::new()));
    let types = cache.get_types(&ORDERS).unwrap();

    let names: Vec<_> = types.iter().map(|ty| ty.name).collect();
    assert_eq!(names, ["Order", "Invoice"]);

    let (_, type_stats) = cache.stats();
    cache.get_types(&ORDERS).unwrap();
    assert_eq!(cache.stats().1.hits, type_stats.hits + 1);
}

#[test]
fn test_closed_cache_reports_error() {
    let cache = ModuleCache::new(Arc::new(CountingLoader::new()));
    cache.close();

    assert!(matches!(
        cache.get_or_load("shop-plugins"),
        Err(Error::CacheClosed { .. })
    ));
    assert!(matches!(
        cache.get_types(&ORDERS),
        Err(Error::CacheClosed { .. })
    ));
}

#[test]
fn test_closed_cache_rejects_loaded_modules() {
    let cache = ModuleCache::new(Arc::new(CountingLoader::new()));
    assert_eq!(cache.loaded_modules().unwrap().len(), 1);
    cache.close();

    assert!(matches!(
        cache.get_or_load("shop-orders"),
        Err(Error::CacheClosed { .. })
    ));
    assert!(matches!(
        cache.loaded_modules(),
        Err(Error::CacheClosed { .. })
    ));
}
