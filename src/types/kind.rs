//! Type kind enumeration for schema members.

use core::fmt;

/// The kind of a named schema type.
///
/// Mirrors the `__TypeKind` introspection enum, minus the wrapping kinds
/// which are represented structurally by [`TypeRef`](super::TypeRef).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TypeKind {
    /// Leaf value type (`Int`, `String`, custom scalars).
    Scalar,
    /// Leaf value drawn from a fixed set of names.
    Enum,
    /// Concrete object type with fields.
    Object,
    /// Abstract type implemented by objects.
    Interface,
    /// Abstract type over a set of objects.
    Union,
    /// Argument-only object type.
    InputObject,
}

impl TypeKind {
    /// Returns true for kinds that resolve to a value with no sub-selection.
    ///
    /// Fields returning a leaf are cheap and numerous, so they are only
    /// traced on request.
    #[must_use]
    pub const fn is_leaf(self) -> bool {
        matches!(self, Self::Scalar | Self::Enum)
    }

    /// Returns true for kinds resolved through `resolve_type`.
    #[must_use]
    pub const fn is_abstract(self) -> bool {
        matches!(self, Self::Interface | Self::Union)
    }

    /// Returns the introspection name of this kind.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Scalar => "SCALAR",
            Self::Enum => "ENUM",
            Self::Object => "OBJECT",
            Self::Interface => "INTERFACE",
            Self::Union => "UNION",
            Self::InputObject => "INPUT_OBJECT",
        }
    }
}

impl fmt::Display for TypeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
