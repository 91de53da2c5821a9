//! Segment label formatting and the per-request label cache.
//!
//! Field, authorization, and type-resolution labels are built by string
//! concatenation and requested once per visit, which for list fields means
//! once per element. The [`LabelCache`] memoizes them for the lifetime of a
//! request so every visit after the first is a map lookup returning the
//! same shared allocation.

use crate::query::{FALLBACK_TRANSACTION_NAME, Query};
use crate::types::{FieldDef, TypeDef};
use parking_lot::Mutex;
use std::any::Any;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

/// Prefix shared by every label and transaction name.
pub const NAMESPACE: &str = "GraphQL";

/// Returns `GraphQL/<owner>/<field>`.
#[must_use]
pub fn field_label(owner: &TypeDef, field: &FieldDef) -> String {
    format!("{NAMESPACE}/{}/{}", owner.name(), field.name())
}

/// Returns `GraphQL/Authorize/<type>`.
#[must_use]
pub fn authorized_label(ty: &TypeDef) -> String {
    format!("{NAMESPACE}/Authorize/{}", ty.name())
}

/// Returns `GraphQL/ResolveType/<type>`.
#[must_use]
pub fn resolve_type_label(ty: &TypeDef) -> String {
    format!("{NAMESPACE}/ResolveType/{}", ty.name())
}

/// Returns the transaction name for `query`.
///
/// `GraphQL/<operation type>.<operation name>`; an unnamed operation falls
/// back to the context's `tracing_fallback_transaction_name`, then to
/// `anonymous`. Without a selected operation the name is
/// `GraphQL/query.anonymous`.
#[must_use]
pub fn transaction_name(query: &Query) -> String {
    query.selected_operation().map_or_else(
        || format!("{NAMESPACE}/query.anonymous"),
        |op| {
            let name = op
                .name()
                .or_else(|| query.context().get_str(FALLBACK_TRANSACTION_NAME))
                .unwrap_or("anonymous");
            format!("{NAMESPACE}/{}.{name}", op.operation_type())
        },
    )
}

/// Which hook a cached label belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HookKind {
    /// `execute_field` and `execute_field_lazy`.
    Field,
    /// `authorized` and `authorized_lazy`.
    Authorized,
    /// `resolve_type` and `resolve_type_lazy`.
    ResolveType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct CacheKey {
    entity: usize,
    kind: HookKind,
}

struct CacheEntry {
    // Holds the entity alive so its address cannot be reused by another
    // allocation while the key is in the map.
    _entity: Arc<dyn Any + Send + Sync>,
    label: Arc<str>,
}

/// Memoized labels keyed by (entity identity, hook kind).
///
/// Entity identity is the address of the descriptor's `Arc` allocation.
/// Entries are never evicted or replaced.
#[derive(Default)]
pub struct LabelCache {
    entries: Mutex<HashMap<CacheKey, CacheEntry>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl LabelCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the label for (`entity`, `kind`), computing it with
    /// `make_label` on first request.
    ///
    /// `make_label` runs without the cache lock held, so it may consult the
    /// cache itself. If two callers race on the same key, the first label
    /// stored wins and both get that allocation.
    pub fn get_or_insert_with<E>(
        &self,
        entity: &Arc<E>,
        kind: HookKind,
        make_label: impl FnOnce(&E) -> String,
    ) -> Arc<str>
    where
        E: Any + Send + Sync,
    {
        let key = CacheKey {
            entity: Arc::as_ptr(entity).cast::<()>().addr(),
            kind,
        };

        if let Some(entry) = self.entries.lock().get(&key) {
            self.hits.fetch_add(1, Ordering::Relaxed);
            return Arc::clone(&entry.label);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let label: Arc<str> = make_label(&**entity).into();
        let pinned: Arc<E> = Arc::clone(entity);
        let pinned: Arc<dyn Any + Send + Sync> = pinned;
        let mut entries = self.entries.lock();
        let entry = entries.entry(key).or_insert(CacheEntry {
            _entity: pinned,
            label,
        });
        Arc::clone(&entry.label)
    }

    /// Returns the number of cached labels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// Returns true if nothing has been cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Returns how many lookups were served from the cache.
    #[must_use]
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Returns how many lookups computed a new label.
    #[must_use]
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for LabelCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LabelCache")
            .field("len", &self.len())
            .field("hits", &self.hits())
            .field("misses", &self.misses())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{OperationDef, OperationType, QueryContext};

    fn post() -> Arc<TypeDef> {
        Arc::new(TypeDef::object("Post"))
    }

    #[test]
    fn label_formats() {
        let post = post();
        let title = FieldDef::new(Arc::clone(&post), "title", Arc::new(TypeDef::scalar("String")));

        assert_eq!(field_label(&post, &title), "GraphQL/Post/title");
        assert_eq!(authorized_label(&post), "GraphQL/Authorize/Post");
        assert_eq!(resolve_type_label(&post), "GraphQL/ResolveType/Post");
    }

    #[test]
    fn transaction_name_from_named_operation() {
        let query =
            Query::new().with_operation(OperationDef::named(OperationType::Mutation, "AddPost"));
        assert_eq!(transaction_name(&query), "GraphQL/mutation.AddPost");
    }

    #[test]
    fn transaction_name_fallbacks() {
        let anonymous = Query::new().with_operation(OperationDef::anonymous(OperationType::Query));
        assert_eq!(transaction_name(&anonymous), "GraphQL/query.anonymous");

        let with_fallback = Query::new()
            .with_operation(OperationDef::anonymous(OperationType::Subscription))
            .with_context(QueryContext::new().with_value(FALLBACK_TRANSACTION_NAME, "Feed"));
        assert_eq!(transaction_name(&with_fallback), "GraphQL/subscription.Feed");

        let no_operation = Query::new()
            .with_context(QueryContext::new().with_value(FALLBACK_TRANSACTION_NAME, "Feed"));
        assert_eq!(transaction_name(&no_operation), "GraphQL/query.anonymous");
    }

    #[test]
    fn cache_returns_same_allocation() {
        let cache = LabelCache::new();
        let post = post();

        let first = cache.get_or_insert_with(&post, HookKind::Authorized, authorized_label);
        let second = cache.get_or_insert_with(&post, HookKind::Authorized, |_| {
            unreachable!("label already cached")
        });

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.misses(), 1);
        assert_eq!(cache.hits(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn cache_separates_kinds_and_entities() {
        let cache = LabelCache::new();
        let post = post();
        let other_post = Arc::new(TypeDef::object("Post"));

        let authorized = cache.get_or_insert_with(&post, HookKind::Authorized, authorized_label);
        let resolved = cache.get_or_insert_with(&post, HookKind::ResolveType, resolve_type_label);
        let other = cache.get_or_insert_with(&other_post, HookKind::Authorized, authorized_label);

        assert_eq!(&*authorized, "GraphQL/Authorize/Post");
        assert_eq!(&*resolved, "GraphQL/ResolveType/Post");
        assert!(!Arc::ptr_eq(&authorized, &other));
        assert_eq!(cache.len(), 3);
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn make_label_may_read_the_cache() {
        let cache = LabelCache::new();
        let post = post();
        let owner = Arc::new(TypeDef::object("Query"));

        let label = cache.get_or_insert_with(&post, HookKind::ResolveType, |ty| {
            let outer = cache.get_or_insert_with(&owner, HookKind::Authorized, authorized_label);
            format!("{outer}>{}", ty.name())
        });

        assert_eq!(&*label, "GraphQL/Authorize/Query>Post");
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.misses(), 2);
    }

    #[test]
    fn cache_keeps_entity_alive() {
        let cache = LabelCache::new();
        let post = post();
        let _ = cache.get_or_insert_with(&post, HookKind::Authorized, authorized_label);
        assert_eq!(Arc::strong_count(&post), 2);
        drop(cache);
        assert_eq!(Arc::strong_count(&post), 1);
    }
}
