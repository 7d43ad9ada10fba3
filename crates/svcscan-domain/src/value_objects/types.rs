//! Static type metadata
//!
//! A [`TypeInfo`] describes one type the engine may discover: its name and
//! namespace, the module declaring it, its shape (class, interface, ...), the
//! interfaces it implements, its base class, the attribute types attached to
//! it, and its optional self-describing registration.
//!
//! Identity is structural: two `TypeInfo`s are equal when namespace, name and
//! generic shape agree, so `TypeRef`s can be used as hash keys regardless of
//! where the static lives.

use std::fmt;
use std::hash::{Hash, Hasher};

use crate::constants::{DISPOSAL_INTERFACE_NAMES, NAMESPACE_SEPARATOR};

use super::registration::Lifetime;

/// Reference to a statically declared type
pub type TypeRef = &'static TypeInfo;

/// What kind of type a [`TypeInfo`] describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    /// A concrete or abstract class
    Class,
    /// An interface (trait-like contract)
    Interface,
    /// An attribute/marker type that can be attached to other types
    Attribute,
    /// A generic type parameter, used as an argument of open instantiations
    GenericParameter,
}

/// Generic shape of a type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GenericShape {
    /// Not generic
    NonGeneric,
    /// An open generic definition with the given number of type parameters
    Definition {
        /// Number of type parameters
        arity: usize,
    },
    /// A closed instantiation of a generic definition
    Closed {
        /// The open definition being instantiated
        definition: TypeRef,
        /// Type arguments, one per parameter of the definition
        arguments: &'static [TypeRef],
    },
}

/// Descriptor of a generic definition: base name plus arity
///
/// Open-generic assignability compares these keys instead of comparing
/// instantiations directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GenericKey {
    /// Namespace of the definition
    pub namespace: &'static str,
    /// Base name of the definition
    pub name: &'static str,
    /// Number of type parameters
    pub arity: usize,
}

/// Self-describing registration attached to a type
///
/// When present on a discovered type it replaces the session strategy for
/// that type only. The service types, the interface flag, the self flag and
/// the lifetime apply independently and combine.
#[derive(Debug, Clone, Copy)]
pub struct AutoRegisterDescriptor {
    /// Explicit service types to register the type under
    pub service_types: &'static [TypeRef],
    /// Also register under every registrable implemented interface
    pub as_implemented_interfaces: bool,
    /// Also register the type as itself
    pub as_self: bool,
    /// Lifetime override; `None` keeps the session lifetime
    pub lifetime: Option<Lifetime>,
}

impl AutoRegisterDescriptor {
    /// Descriptor requesting nothing; use with struct update syntax
    pub const EMPTY: Self = Self {
        service_types: &[],
        as_implemented_interfaces: false,
        as_self: false,
        lifetime: None,
    };

    /// Whether the descriptor requests no registration at all
    pub fn is_empty(&self) -> bool {
        self.service_types.is_empty() && !self.as_implemented_interfaces && !self.as_self
    }
}

/// Static metadata describing one type
pub struct TypeInfo {
    /// Simple type name (without namespace or generic arguments)
    pub name: &'static str,
    /// `::`-separated namespace path
    pub namespace: &'static str,
    /// Name of the module declaring the type
    pub module: &'static str,
    /// Kind of type
    pub kind: TypeKind,
    /// Publicly visible outside its module
    pub is_public: bool,
    /// Abstract (cannot be instantiated)
    pub is_abstract: bool,
    /// Declared inside another type
    pub is_nested: bool,
    /// Generic shape
    pub generic: GenericShape,
    /// Directly implemented (or, for interfaces, extended) interfaces
    pub interfaces: &'static [TypeRef],
    /// Base class, if any
    pub base: Option<TypeRef>,
    /// Attribute types attached to this type
    pub attributes: &'static [TypeRef],
    /// Self-describing registration, if any
    pub auto_register: Option<&'static AutoRegisterDescriptor>,
    /// Opted out of every discovery call
    pub exclude_from_registration: bool,
}

impl TypeInfo {
    const fn base(
        name: &'static str,
        namespace: &'static str,
        module: &'static str,
        kind: TypeKind,
    ) -> Self {
        Self {
            name,
            namespace,
            module,
            kind,
            is_public: true,
            is_abstract: false,
            is_nested: false,
            generic: GenericShape::NonGeneric,
            interfaces: &[],
            base: None,
            attributes: &[],
            auto_register: None,
            exclude_from_registration: false,
        }
    }

    /// Public, concrete, non-generic class
    pub const fn class(name: &'static str, namespace: &'static str, module: &'static str) -> Self {
        Self::base(name, namespace, module, TypeKind::Class)
    }

    /// Public interface
    pub const fn interface(
        name: &'static str,
        namespace: &'static str,
        module: &'static str,
    ) -> Self {
        Self {
            is_abstract: true,
            ..Self::base(name, namespace, module, TypeKind::Interface)
        }
    }

    /// Public attribute type
    pub const fn attribute(
        name: &'static str,
        namespace: &'static str,
        module: &'static str,
    ) -> Self {
        Self::base(name, namespace, module, TypeKind::Attribute)
    }

    /// Generic type parameter placeholder (e.g. `T`)
    pub const fn generic_parameter(name: &'static str) -> Self {
        Self::base(name, "", "", TypeKind::GenericParameter)
    }

    /// Mark as not publicly visible
    pub const fn internal(self) -> Self {
        Self {
            is_public: false,
            ..self
        }
    }

    /// Mark as abstract
    pub const fn abstract_class(self) -> Self {
        Self {
            is_abstract: true,
            ..self
        }
    }

    /// Mark as nested inside another type
    pub const fn nested(self) -> Self {
        Self {
            is_nested: true,
            ..self
        }
    }

    /// Turn into an open generic definition with `arity` parameters
    pub const fn generic_definition(self, arity: usize) -> Self {
        Self {
            generic: GenericShape::Definition { arity },
            ..self
        }
    }

    /// Opt out of discovery
    pub const fn excluded(self) -> Self {
        Self {
            exclude_from_registration: true,
            ..self
        }
    }

    /// Attach a self-describing registration
    pub const fn auto_registered(self, descriptor: &'static AutoRegisterDescriptor) -> Self {
        Self {
            auto_register: Some(descriptor),
            ..self
        }
    }

    /// Full `namespace::Name<Args>` name
    pub fn full_name(&self) -> String {
        let mut out = String::new();
        if !self.namespace.is_empty() {
            out.push_str(self.namespace);
            out.push_str(NAMESPACE_SEPARATOR);
        }
        out.push_str(self.name);
        match self.generic {
            GenericShape::NonGeneric => {}
            GenericShape::Definition { arity } => {
                out.push('<');
                out.push_str(&",".repeat(arity.saturating_sub(1)));
                out.push('>');
            }
            GenericShape::Closed { arguments, .. } => {
                let args: Vec<String> = arguments.iter().map(|a| a.full_name()).collect();
                out.push('<');
                out.push_str(&args.join(", "));
                out.push('>');
            }
        }
        out
    }

    /// Whether this is a class
    pub fn is_class(&self) -> bool {
        self.kind == TypeKind::Class
    }

    /// Whether this is an interface
    pub fn is_interface(&self) -> bool {
        self.kind == TypeKind::Interface
    }

    /// Whether this is an open generic definition
    pub fn is_generic_definition(&self) -> bool {
        matches!(self.generic, GenericShape::Definition { .. })
    }

    /// Whether this is a closed generic whose arguments are all generic parameters
    pub fn is_closed_over_parameters(&self) -> bool {
        match self.generic {
            GenericShape::Closed { arguments, .. } => arguments
                .iter()
                .all(|a| a.kind == TypeKind::GenericParameter),
            _ => false,
        }
    }

    /// The open definition this type instantiates (itself for a definition)
    pub fn generic_definition_type(&'static self) -> Option<TypeRef> {
        match self.generic {
            GenericShape::NonGeneric => None,
            GenericShape::Definition { .. } => Some(self),
            GenericShape::Closed { definition, .. } => Some(definition),
        }
    }

    /// Key of the generic definition this type belongs to
    pub fn generic_key(&self) -> Option<GenericKey> {
        match self.generic {
            GenericShape::NonGeneric => None,
            GenericShape::Definition { arity } => Some(GenericKey {
                namespace: self.namespace,
                name: self.name,
                arity,
            }),
            GenericShape::Closed {
                definition,
                arguments,
            } => Some(GenericKey {
                namespace: definition.namespace,
                name: definition.name,
                arity: arguments.len(),
            }),
        }
    }

    /// Whether this interface marks disposal behaviour
    pub fn is_disposal_marker(&self) -> bool {
        self.is_interface() && DISPOSAL_INTERFACE_NAMES.contains(&self.name)
    }

    /// Whether `attribute` is attached to this type
    pub fn has_attribute(&self, attribute: &TypeInfo) -> bool {
        self.attributes.iter().any(|a| *a == attribute)
    }

    /// Base class chain, nearest ancestor first
    pub fn ancestors(&'static self) -> Ancestors {
        Ancestors { next: self.base }
    }

    /// Every implemented interface: own, inherited from base classes, and
    /// extended by other interfaces, without duplicates, declaration order first
    pub fn all_interfaces(&'static self) -> Vec<TypeRef> {
        let mut out: Vec<TypeRef> = Vec::new();
        let mut pending: Vec<TypeRef> = Vec::new();
        let mut current: Option<TypeRef> = Some(self);
        while let Some(ty) = current {
            pending.extend(ty.interfaces.iter().rev());
            while let Some(iface) = pending.pop() {
                if out.contains(&iface) {
                    continue;
                }
                out.push(iface);
                pending.extend(iface.interfaces.iter().rev());
            }
            current = ty.base;
        }
        out
    }
}

/// Iterator over a type's base classes
pub struct Ancestors {
    next: Option<TypeRef>,
}

impl Iterator for Ancestors {
    type Item = TypeRef;

    fn next(&mut self) -> Option<TypeRef> {
        let current = self.next?;
        self.next = current.base;
        Some(current)
    }
}

impl PartialEq for TypeInfo {
    fn eq(&self, other: &Self) -> bool {
        self.namespace == other.namespace && self.name == other.name && self.generic == other.generic
    }
}

impl Eq for TypeInfo {}

impl Hash for TypeInfo {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.namespace.hash(state);
        self.name.hash(state);
        self.generic.hash(state);
    }
}

impl fmt::Debug for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("TypeInfo").field(&self.full_name()).finish()
    }
}

impl fmt::Display for TypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full_name())
    }
}

/// Well-known disposal marker interfaces
pub mod well_known {
    use super::TypeInfo;

    /// Synchronous disposal marker
    pub static DISPOSABLE: TypeInfo =
        TypeInfo::interface("Disposable", "svcscan::lifecycle", "svcscan");

    /// Asynchronous disposal marker
    pub static ASYNC_DISPOSABLE: TypeInfo =
        TypeInfo::interface("AsyncDisposable", "svcscan::lifecycle", "svcscan");
}
