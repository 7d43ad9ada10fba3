//! Scan engine
//!
//! [`ScanEngine`] owns everything a scanning session shares: the module
//! cache, the assignability and interface caches, the worker pool and the
//! configuration. Sessions borrow it:
//!
//! ```ignore
//! let engine = ScanEngine::linked()?;
//! let mut services = ServiceCollection::new();
//! engine
//!     .scan()
//!     .from_module_of(&WIDGET_SERVICE)?
//!     .add_classes_implementing(&IWIDGET_SERVICE)?
//!     .as_implemented_interfaces()
//!     .with_scoped_lifetime(&mut services)?;
//! ```
//!
//! A process-wide engine is available through [`ScanEngine::global`]. It is
//! initialized once, either explicitly with [`ScanEngine::install_global`] or
//! lazily from the link-time module registry, and is read-mostly afterwards;
//! caches are only ever dropped through [`ScanEngine::clear_caches`].

use std::sync::{Arc, OnceLock};

use rayon::{ThreadPool, ThreadPoolBuilder};
use svcscan_domain::error::{Error, Result};
use svcscan_domain::ports::ModuleLoader;
use svcscan_infrastructure::cache::{CacheStats, ModuleCache};
use svcscan_infrastructure::config::ScanConfig;
use svcscan_infrastructure::constants::WORKER_THREAD_PREFIX;
use svcscan_infrastructure::error_ext::ErrorContext;
use svcscan_infrastructure::registry::ModuleRegistry;
use tracing::{Level, debug};

use crate::domain_services::{AssignabilityCache, DiscoveryRules, InterfaceCache};
use crate::use_cases::scanning::{Initial, TypeScanner};

static GLOBAL_ENGINE: OnceLock<ScanEngine> = OnceLock::new();

/// Counters of every engine cache
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EngineCacheStats {
    /// Name → module cache
    pub modules: CacheStats,
    /// Module → types cache
    pub module_types: CacheStats,
    /// (service, implementation) assignability cache
    pub assignability: CacheStats,
    /// Registrable interfaces cache
    pub interfaces: CacheStats,
}

/// Shared state of every scanning session
pub struct ScanEngine {
    config: ScanConfig,
    rules: DiscoveryRules,
    modules: ModuleCache,
    assignability: AssignabilityCache,
    interfaces: InterfaceCache,
    pool: ThreadPool,
}

impl ScanEngine {
    /// Create an engine over `loader`
    ///
    /// Fails when the worker pool cannot be built.
    pub fn new(loader: Arc<dyn ModuleLoader>, config: ScanConfig) -> Result<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(config.parallelism.max_workers.max(1))
            .thread_name(|index| format!("{WORKER_THREAD_PREFIX}-{index}"))
            .build()
            .context("Failed to build the scan worker pool")?;

        let rules = DiscoveryRules::new(&config.discovery);
        let cache = &config.cache;
        let engine = Self {
            modules: ModuleCache::with_capacity(loader, cache.module_capacity, cache.type_capacity),
            assignability: AssignabilityCache::new(cache.assignability_capacity),
            interfaces: InterfaceCache::new(cache.interface_capacity, rules.clone()),
            rules,
            pool,
            config,
        };

        if tracing::enabled!(Level::DEBUG) {
            debug!(
                workers = engine.pool.current_num_threads(),
                "scan engine created"
            );
        }
        Ok(engine)
    }

    /// Engine over the link-time module registry with default configuration
    pub fn linked() -> Result<Self> {
        Self::from_config(ScanConfig::default())
    }

    /// Engine over the link-time module registry
    pub fn from_config(config: ScanConfig) -> Result<Self> {
        Self::new(Arc::new(ModuleRegistry::linked()), config)
    }

    /// The process-wide engine, created from the link-time registry on first use
    pub fn global() -> Result<&'static ScanEngine> {
        if let Some(engine) = GLOBAL_ENGINE.get() {
            return Ok(engine);
        }
        let engine = Self::linked()?;
        Ok(GLOBAL_ENGINE.get_or_init(|| engine))
    }

    /// Install `engine` as the process-wide engine
    ///
    /// Fails when a global engine already exists.
    pub fn install_global(engine: ScanEngine) -> Result<&'static ScanEngine> {
        GLOBAL_ENGINE
            .set(engine)
            .map_err(|_| Error::invalid_operation("global scan engine is already initialized"))?;
        GLOBAL_ENGINE
            .get()
            .ok_or_else(|| Error::internal("global scan engine vanished after install"))
    }

    /// Start a scanning session
    pub fn scan(&self) -> TypeScanner<'_, Initial> {
        TypeScanner::new(self)
    }

    /// Engine configuration
    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Eligibility and namespace rules
    pub fn rules(&self) -> &DiscoveryRules {
        &self.rules
    }

    /// Module and type cache
    pub fn module_cache(&self) -> &ModuleCache {
        &self.modules
    }

    /// Assignability cache
    pub fn assignability(&self) -> &AssignabilityCache {
        &self.assignability
    }

    /// Registrable interfaces cache
    pub fn interfaces(&self) -> &InterfaceCache {
        &self.interfaces
    }

    pub(crate) fn pool(&self) -> &ThreadPool {
        &self.pool
    }

    /// Drop every memoized module load, type list and assignability result
    ///
    /// The index of loaded modules is built once per engine and is kept.
    pub fn clear_caches(&self) -> Result<()> {
        self.modules.clear()?;
        self.assignability.clear()?;
        self.interfaces.clear()?;
        if tracing::enabled!(Level::DEBUG) {
            debug!("scan engine caches cleared");
        }
        Ok(())
    }

    /// Close every cache; later sessions fail with a cache-closed error
    pub fn close(&self) {
        self.modules.close();
        self.assignability.close();
        self.interfaces.close();
    }

    /// Counters of every cache
    pub fn cache_stats(&self) -> EngineCacheStats {
        let (modules, module_types) = self.modules.stats();
        EngineCacheStats {
            modules,
            module_types,
            assignability: self.assignability.stats(),
            interfaces: self.interfaces.stats(),
        }
    }
}

impl std::fmt::Debug for ScanEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScanEngine")
            .field("config", &self.config)
            .field("modules", &self.modules)
            .field("workers", &self.pool.current_num_threads())
            .finish_non_exhaustive()
    }
}
