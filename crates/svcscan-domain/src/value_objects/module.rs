//! Static module metadata
//!
//! A module is the unit the engine scans. Each module exposes a type loader
//! returning its declared types; individual entries may fail to resolve, in
//! which case the loader reports a [`TypeLoadError`] for that slot and the
//! remaining types are still usable.

use std::fmt;
use std::hash::{Hash, Hasher};

use super::types::TypeRef;

/// Reference to a statically declared module
pub type ModuleRef = &'static ModuleInfo;

/// Outcome of resolving one declared type
pub type TypeLoad = std::result::Result<TypeRef, TypeLoadError>;

/// A declared type that could not be resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeLoadError {
    /// Name of the type that failed to resolve
    pub type_name: String,
    /// Why resolution failed
    pub reason: String,
}

impl TypeLoadError {
    /// Create a new type load error
    pub fn new(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for TypeLoadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.type_name, self.reason)
    }
}

/// Static metadata describing one module
pub struct ModuleInfo {
    /// Unique module name
    pub name: &'static str,
    /// Loader enumerating the module's declared types in declaration order
    pub types: fn() -> Vec<TypeLoad>,
}

impl ModuleInfo {
    /// Create a module descriptor
    pub const fn new(name: &'static str, types: fn() -> Vec<TypeLoad>) -> Self {
        Self { name, types }
    }
}

impl PartialEq for ModuleInfo {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for ModuleInfo {}

impl Hash for ModuleInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

impl fmt::Debug for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModuleInfo").field("name", &self.name).finish()
    }
}

impl fmt::Display for ModuleInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name)
    }
}
