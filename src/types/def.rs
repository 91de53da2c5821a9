//! Named type and field definitions.

use super::TypeKind;
use core::fmt;
use std::sync::Arc;

/// A named schema type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDef {
    name: Arc<str>,
    kind: TypeKind,
}

impl TypeDef {
    /// Creates a type definition.
    #[must_use]
    pub fn new(name: impl Into<Arc<str>>, kind: TypeKind) -> Self {
        Self {
            name: name.into(),
            kind,
        }
    }

    /// Creates an object type.
    #[must_use]
    pub fn object(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Object)
    }

    /// Creates a scalar type.
    #[must_use]
    pub fn scalar(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Scalar)
    }

    /// Creates an enum type.
    #[must_use]
    pub fn enumeration(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Enum)
    }

    /// Creates an interface type.
    #[must_use]
    pub fn interface(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Interface)
    }

    /// Creates a union type.
    #[must_use]
    pub fn union(name: impl Into<Arc<str>>) -> Self {
        Self::new(name, TypeKind::Union)
    }

    /// Returns the GraphQL name of the type.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type kind.
    #[must_use]
    pub const fn kind(&self) -> TypeKind {
        self.kind
    }
}

impl fmt::Display for TypeDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// A possibly-wrapped reference to a named type, as used for field return
/// types (`Post`, `[Post]`, `[Post!]!`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// A bare named type.
    Named(Arc<TypeDef>),
    /// A list of the inner type.
    List(Box<TypeRef>),
    /// A non-null wrapper around the inner type.
    NonNull(Box<TypeRef>),
}

impl TypeRef {
    /// References a named type.
    #[must_use]
    pub fn named(ty: Arc<TypeDef>) -> Self {
        Self::Named(ty)
    }

    /// Wraps this reference in a list.
    #[must_use]
    pub fn list(self) -> Self {
        Self::List(Box::new(self))
    }

    /// Wraps this reference in a non-null marker.
    #[must_use]
    pub fn non_null(self) -> Self {
        Self::NonNull(Box::new(self))
    }

    /// Strips every list and non-null wrapper and returns the named type.
    #[must_use]
    pub fn named_type(&self) -> &Arc<TypeDef> {
        let mut current = self;
        loop {
            match current {
                Self::Named(ty) => return ty,
                Self::List(inner) | Self::NonNull(inner) => current = inner,
            }
        }
    }
}

impl From<Arc<TypeDef>> for TypeRef {
    fn from(ty: Arc<TypeDef>) -> Self {
        Self::Named(ty)
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(ty) => write!(f, "{ty}"),
            Self::List(inner) => write!(f, "[{inner}]"),
            Self::NonNull(inner) => write!(f, "{inner}!"),
        }
    }
}

/// A field on an object or interface type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FieldDef {
    name: Arc<str>,
    owner: Arc<TypeDef>,
    ty: TypeRef,
    trace: Option<bool>,
}

impl FieldDef {
    /// Creates a field owned by `owner` returning `ty`.
    ///
    /// The per-field trace flag starts unset, deferring to the adapter's
    /// `trace_scalars` setting for leaf fields.
    #[must_use]
    pub fn new(owner: Arc<TypeDef>, name: impl Into<Arc<str>>, ty: impl Into<TypeRef>) -> Self {
        Self {
            name: name.into(),
            owner,
            ty: ty.into(),
            trace: None,
        }
    }

    /// Sets the explicit trace flag for this field.
    #[must_use]
    pub fn with_trace(mut self, trace: bool) -> Self {
        self.trace = Some(trace);
        self
    }

    /// Returns the GraphQL name of the field.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the type that declares this field.
    #[must_use]
    pub fn owner(&self) -> &Arc<TypeDef> {
        &self.owner
    }

    /// Returns the declared return type.
    #[must_use]
    pub fn ty(&self) -> &TypeRef {
        &self.ty
    }

    /// Returns the explicit trace flag, if one was set.
    #[must_use]
    pub const fn trace(&self) -> Option<bool> {
        self.trace
    }
}
