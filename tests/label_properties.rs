#![allow(missing_docs)]

use proptest::prelude::*;
use querytrace::trace::{authorized_label, field_label, resolve_type_label, traces_field};
use querytrace::{FieldDef, TypeDef, TypeKind, TypeRef};
use std::sync::Arc;

fn type_kind() -> impl Strategy<Value = TypeKind> {
    prop_oneof![
        Just(TypeKind::Scalar),
        Just(TypeKind::Enum),
        Just(TypeKind::Object),
        Just(TypeKind::Interface),
        Just(TypeKind::Union),
        Just(TypeKind::InputObject),
    ]
}

/// Wraps `ty` in a random stack of list/non-null modifiers.
fn wrapped(ty: Arc<TypeDef>, wrappers: &[bool]) -> TypeRef {
    wrappers.iter().fold(TypeRef::named(ty), |acc, &list| {
        if list { acc.list() } else { acc.non_null() }
    })
}

proptest! {
    #[test]
    fn labels_are_namespaced_paths(
        owner in "[A-Z][A-Za-z0-9_]{0,24}",
        field in "[a-z_][A-Za-z0-9_]{0,24}",
    ) {
        let owner_ty = Arc::new(TypeDef::object(owner.as_str()));
        let id = Arc::new(TypeDef::scalar("ID"));
        let def = FieldDef::new(Arc::clone(&owner_ty), field.as_str(), id);

        prop_assert_eq!(field_label(&owner_ty, &def), format!("GraphQL/{owner}/{field}"));
        prop_assert_eq!(authorized_label(&owner_ty), format!("GraphQL/Authorize/{owner}"));
        prop_assert_eq!(resolve_type_label(&owner_ty), format!("GraphQL/ResolveType/{owner}"));
    }

    #[test]
    fn field_tracing_depends_on_unwrapped_kind(
        kind in type_kind(),
        wrappers in prop::collection::vec(any::<bool>(), 0..4),
        flag in prop::option::of(any::<bool>()),
        trace_scalars in any::<bool>(),
    ) {
        let owner = Arc::new(TypeDef::object("Post"));
        let target = Arc::new(TypeDef::new("Target", kind));
        let mut field = FieldDef::new(owner, "target", wrapped(target, &wrappers));
        if let Some(flag) = flag {
            field = field.with_trace(flag);
        }

        let expected = if kind.is_leaf() {
            flag.unwrap_or(trace_scalars)
        } else {
            true
        };
        prop_assert_eq!(traces_field(&field, trace_scalars), expected);
    }
}
