//! Domain layer constants
//!
//! Values shared by the discovery and registration stages. Infrastructure
//! defaults (cache capacities, config file names) live in
//! `svcscan_infrastructure::constants`.

// ============================================================================
// DISCOVERY CONSTANTS
// ============================================================================

/// Module and namespace prefixes treated as "system" (standard library / runtime)
pub const SYSTEM_NAMESPACE_PREFIXES: &[&str] = &["std", "core", "alloc", "proc_macro", "system"];

/// Separators that may follow a system prefix for the prefix to count as a segment
pub const PREFIX_SEGMENT_SEPARATORS: &[char] = &[':', '.'];

/// Namespace path separator used in full type names
pub const NAMESPACE_SEPARATOR: &str = "::";

/// Interface names that mark disposal behaviour and are never registered as services
pub const DISPOSAL_INTERFACE_NAMES: &[&str] = &["Disposable", "AsyncDisposable"];

/// Wildcard character recognised by name patterns
pub const PATTERN_WILDCARD: char = '*';

// ============================================================================
// FAN-OUT CONSTANTS
// ============================================================================

/// Candidate count above which module resolution fans out to the worker pool
pub const MODULE_PARALLEL_THRESHOLD: usize = 4;

/// Candidate count above which the "all loaded" strategy fans out
pub const LOADED_MODULES_PARALLEL_THRESHOLD: usize = 8;

/// Selected-module count above which type filtering fans out
pub const TYPE_PARALLEL_THRESHOLD: usize = 4;
