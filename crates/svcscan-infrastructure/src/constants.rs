//! Infrastructure layer constants
//!
//! Defaults for configuration, caching, parallelism and logging.
//! Discovery rules (system prefixes, thresholds) are defined in
//! `svcscan_domain::constants`.

// ============================================================================
// CONFIGURATION CONSTANTS
// ============================================================================

/// Default configuration file name
pub const DEFAULT_CONFIG_FILENAME: &str = "svcscan.toml";

/// Default configuration directory name
pub const DEFAULT_CONFIG_DIR: &str = "svcscan";

/// Environment variable prefix for configuration
pub const CONFIG_ENV_PREFIX: &str = "SVCSCAN";

/// Separator between nested keys in environment variables
pub const CONFIG_ENV_SEPARATOR: &str = "__";

// ============================================================================
// CACHE CONSTANTS
// ============================================================================

/// Default capacity of the name → module cache
pub const MODULE_CACHE_CAPACITY: usize = 256;

/// Default capacity of the module → types cache
pub const TYPE_CACHE_CAPACITY: usize = 256;

/// Default capacity of the (service, implementation) assignability cache
pub const ASSIGNABILITY_CACHE_CAPACITY: usize = 4096;

/// Default capacity of the registrable-interfaces cache
pub const INTERFACE_CACHE_CAPACITY: usize = 1024;

// ============================================================================
// PARALLELISM CONSTANTS
// ============================================================================

/// Default upper bound on fan-out workers
pub const DEFAULT_MAX_WORKERS: usize = 4;

/// Thread name prefix for fan-out workers
pub const WORKER_THREAD_PREFIX: &str = "svcscan-worker";

// ============================================================================
// LOGGING CONSTANTS
// ============================================================================

/// Default log level
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Environment variable overriding the log filter
pub const LOG_ENV_FILTER: &str = "SVCSCAN_LOG";

/// Default log file stem for rolling file output
pub const LOG_FILE_STEM: &str = "svcscan";
