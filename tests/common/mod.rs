//! Shared helpers for integration tests.

#![allow(dead_code)]

use querytrace::trace::{Phase, Trace};
use querytrace::{FieldDef, Query, TypeDef, TypeRef};
use std::sync::{Arc, Once};

static INIT_LOGGING: Once = Once::new();

/// Installs a test-writer subscriber once per binary.
///
/// Honors `RUST_LOG`; defaults to `querytrace=trace`.
pub fn init_test_logging() {
    INIT_LOGGING.call_once(|| {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("querytrace=trace"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

macro_rules! test_phase {
    ($name:expr) => {
        tracing::info!(test = %$name, "==== test phase ====")
    };
}

macro_rules! assert_with_log {
    ($cond:expr, $what:expr, $expected:expr, $actual:expr) => {{
        let ok = $cond;
        tracing::debug!(
            check = $what,
            expected = ?$expected,
            actual = ?$actual,
            ok,
            "assertion"
        );
        assert!(ok, "{}: expected {:?}, got {:?}", $what, $expected, $actual);
    }};
}

macro_rules! test_complete {
    ($name:expr $(, $key:ident = $value:expr)* $(,)?) => {
        tracing::info!(test = %$name $(, $key = ?$value)*, "==== test complete ====")
    };
}

/// A small blog schema.
///
/// ```text
/// type Query   { posts: [Post!]! }
/// type Post    { title: String!  status: Status  comments: [Comment!]! }
/// type Comment { body: String }
/// interface Node
/// enum Status
/// ```
pub struct BlogSchema {
    pub query_root: Arc<TypeDef>,
    pub post: Arc<TypeDef>,
    pub comment: Arc<TypeDef>,
    pub node: Arc<TypeDef>,
    pub posts: Arc<FieldDef>,
    pub title: Arc<FieldDef>,
    pub status: Arc<FieldDef>,
    pub comments: Arc<FieldDef>,
    pub body: Arc<FieldDef>,
}

impl BlogSchema {
    pub fn new() -> Self {
        let query_root = Arc::new(TypeDef::object("Query"));
        let post = Arc::new(TypeDef::object("Post"));
        let comment = Arc::new(TypeDef::object("Comment"));
        let node = Arc::new(TypeDef::interface("Node"));
        let string = Arc::new(TypeDef::scalar("String"));
        let status = Arc::new(TypeDef::enumeration("Status"));

        let posts = FieldDef::new(
            Arc::clone(&query_root),
            "posts",
            TypeRef::named(Arc::clone(&post)).non_null().list().non_null(),
        );
        let title = FieldDef::new(
            Arc::clone(&post),
            "title",
            TypeRef::named(Arc::clone(&string)).non_null(),
        );
        let status = FieldDef::new(Arc::clone(&post), "status", status);
        let comments = FieldDef::new(
            Arc::clone(&post),
            "comments",
            TypeRef::named(Arc::clone(&comment)).non_null().list().non_null(),
        );
        let body = FieldDef::new(Arc::clone(&comment), "body", string);

        Self {
            query_root,
            post,
            comment,
            node,
            posts: Arc::new(posts),
            title: Arc::new(title),
            status: Arc::new(status),
            comments: Arc::new(comments),
            body: Arc::new(body),
        }
    }
}

/// Drives every hook the way an execution engine would for
/// `{ posts { title status comments { body } } }`, returning the titles.
pub fn run_pipeline<T: Trace>(
    trace: &T,
    schema: &BlogSchema,
    query: &Query,
    posts: usize,
) -> Vec<String> {
    let source = "{ posts { title status comments { body } } }";
    let tokens = trace.phase(Phase::Lex, || source.split_whitespace().count());
    let _document = trace.phase(Phase::Parse, || tokens);
    trace.phase(Phase::Validate, || ());
    trace.phase(Phase::AnalyzeMultiplex, || {
        trace.phase(Phase::AnalyzeQuery, || ());
    });

    trace.phase(Phase::ExecuteMultiplex, || {
        let titles = trace.execute_query(query, || {
            trace.execute_field(query, &schema.posts, || {
                (0..posts)
                    .map(|i| {
                        trace.authorized(query, &schema.post, || true);
                        let title =
                            trace.execute_field(query, &schema.title, || format!("Post {i}"));
                        trace.execute_field(query, &schema.status, || "PUBLISHED");
                        trace.execute_field(query, &schema.comments, || {
                            let resolved = trace
                                .resolve_type(query, &schema.node, || Arc::clone(&schema.comment));
                            trace.execute_field(query, &schema.body, || resolved.name().to_owned())
                        });
                        title
                    })
                    .collect::<Vec<_>>()
            })
        });

        trace.phase(Phase::ExecuteQueryLazy, || {
            trace.execute_field_lazy(query, &schema.comments, || ());
            trace.authorized_lazy(query, &schema.post, || true);
            trace.resolve_type_lazy(query, &schema.node, || ());
        });

        titles
    })
}
