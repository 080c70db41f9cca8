//! End-to-end parse sessions: declarations are fed in document order the way
//! a schema parser would, then linked and committed or rolled back.

use std::sync::Once;

use pretty_assertions::assert_eq;
use schema_names::{
    Field, FullName, Idx, RegistryConfig, RegistryError, Session, Slot, Tag, TypeData,
    TypeRegistry,
};

static TRACING_INIT: Once = Once::new();

/// Enable with `RUST_LOG=schema_names=debug`.
fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        if std::env::var("RUST_LOG").is_ok() {
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_test_writer())
                .with(EnvFilter::from_default_env())
                .try_init();
        }
    });
}

/// Declare a record the way a parser does: register the shell first so the
/// fields can refer to the record itself, then resolve and fill the fields.
fn declare_record(session: &Session<'_>, name: &str, fields: &[(&str, &str)]) -> Idx {
    let full_name = session.resolve_full_name(name, None);
    let record = session.pool().record(full_name, vec![]);
    session.put(record).unwrap();

    let fields = fields
        .iter()
        .map(|(field, ty)| Field::new(*field, session.resolve(ty)))
        .collect();
    assert!(session.set_fields(record, fields));
    record
}

fn field_type(registry: &TypeRegistry, record: Idx, field: usize) -> Idx {
    match registry.pool().get(record) {
        TypeData::Record { fields, .. } => fields[field].ty,
        other => panic!("expected a record, found {other:?}"),
    }
}

#[test]
fn qualified_and_short_references_agree() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("com.example"));
    let session = registry.session();

    let foo = declare_record(&session, "Foo", &[("id", "long")]);
    assert_eq!(session.resolve("Foo"), foo);
    assert_eq!(session.resolve("com.example.Foo"), foo);

    let bar = session.resolve("Bar");
    assert_eq!(
        session.pool().get(bar),
        TypeData::Unresolved(FullName::new("com.example.Bar"))
    );

    session.commit();
    assert!(registry.contains("com.example.Foo"));
}

#[test]
fn forward_reference_is_linked_by_identity() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("com.example"));
    let session = registry.session();

    let a = declare_record(&session, "A", &[("b", "B")]);
    let placeholder = field_type(&registry, a, 0);
    assert_eq!(session.pool().tag(placeholder), Tag::Unresolved);
    assert_eq!(
        session.pool().full_name(placeholder),
        None,
        "placeholders are not named types"
    );

    let b = declare_record(&session, "B", &[("n", "int")]);
    assert_eq!(session.resolve_types(&[a, b]).unwrap(), 1);
    session.commit();

    assert_eq!(field_type(&registry, a, 0), b);
    assert_eq!(
        registry.describe(a),
        "record A { b: record B { n: int } }"
    );
}

#[test]
fn self_reference_is_a_cycle() {
    init_tracing();
    let registry = TypeRegistry::default();
    let session = registry.session();

    let node = declare_record(&session, "Node", &[("value", "string"), ("next", "Node")]);
    assert_eq!(session.resolve_types(&[node]).unwrap(), 0);
    session.commit();

    assert_eq!(field_type(&registry, node, 1), node);
    assert_eq!(registry.describe(node), "record Node { value: string, next: Node }");
}

#[test]
fn failed_document_leaves_no_trace() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("app"));

    {
        let session = registry.session();
        declare_record(&session, "Kept", &[]);
        session.commit();
    }

    let session = registry.session();
    let holder = declare_record(&session, "Holder", &[("x", "Missing")]);
    let errors = session.resolve_types(&[holder]).unwrap_err();
    drop(session);

    assert_eq!(
        errors,
        vec![RegistryError::UnresolvedReference {
            full_name: FullName::new("app.Missing")
        }]
    );
    assert_eq!(errors[0].to_string(), "undefined name: app.Missing");

    assert!(registry.contains("app.Kept"));
    assert!(!registry.contains("app.Holder"));
    assert!(!registry.has_pending());
}

#[test]
fn redefinition_fails_the_session() {
    init_tracing();
    let registry = TypeRegistry::default();

    let session = registry.session();
    declare_record(&session, "Point", &[("x", "int"), ("y", "int")]);
    session.commit();

    let session = registry.session();
    let conflicting = session
        .pool()
        .record("Point", vec![Field::new("x", Idx::DOUBLE)]);
    let err = session.put(conflicting).unwrap_err();
    assert_eq!(err.to_string(), "can't redefine: Point");
    assert_eq!(err.to_diagnostic().code.as_str(), "E1002");
    session.rollback();

    let original = registry.resolve("Point");
    assert_eq!(field_type(&registry, original, 0), Idx::INT);
}

#[test]
fn reparsing_a_document_is_idempotent() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("geo"));

    // A parser that builds each record complete, referencing later types
    // through placeholders.
    let parse = |registry: &TypeRegistry| {
        let session = registry.session();
        let pool = session.pool();
        let line = pool.record(
            "geo.Line",
            vec![
                Field::new("from", session.resolve("Point")),
                Field::new("to", session.resolve("Point")),
            ],
        );
        let point = pool.record(
            "geo.Point",
            vec![Field::new("x", Idx::DOUBLE), Field::new("y", Idx::DOUBLE)],
        );
        session.resolve_types(&[line, point]).unwrap();
        session.commit();
        line
    };

    let first = parse(&registry);
    let before = registry.types_by_name();

    // On the second pass "Point" already resolves to the committed record,
    // so the rebuilt types are structurally equal to the committed ones.
    let second = parse(&registry);
    assert_ne!(first, second);
    assert_eq!(registry.types_by_name(), before);
    assert_eq!(registry.resolve("Line"), first);
}

#[test]
fn nested_namespace_views_share_one_session() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("org.outer"));
    let session = registry.session();

    let inner_view = session.with_namespace(Some("org.inner"));
    let inner = inner_view.pool().enumeration("org.inner.Color", vec!["RED".into()], None);
    inner_view.put(inner).unwrap();

    let outer = declare_record(&session, "Paint", &[("color", "org.inner.Color")]);
    assert_eq!(field_type(&registry, outer, 0), inner);
    assert_eq!(
        registry.describe(outer),
        "record Paint { color: enum org.inner.Color { RED } }"
    );

    drop(session);
    assert!(registry.is_empty());
    assert!(!inner_view.has_pending());
}

#[test]
fn document_with_a_union_root() {
    init_tracing();
    let registry = TypeRegistry::new(&RegistryConfig::new().with_namespace("evt"));
    let session = registry.session();

    // [null, "Click", "Scroll"], with both records declared after the union.
    let click_ref = session.resolve("Click");
    let scroll_ref = session.resolve("Scroll");
    let root = session.pool().union([Idx::NULL, click_ref, scroll_ref]);
    let click = declare_record(&session, "Click", &[("x", "int"), ("y", "int")]);
    let scroll = declare_record(&session, "Scroll", &[("delta", "double")]);

    let mut roots = [root];
    assert_eq!(session.resolve_document(&[click, scroll], &mut roots).unwrap(), 2);
    session.commit();

    let pool = registry.pool().read();
    assert_eq!(pool.child(root, Slot::Branch(1)), Some(click));
    assert_eq!(pool.child(root, Slot::Branch(2)), Some(scroll));
    assert!(!pool.is_unresolved(pool.child(root, Slot::Branch(2)).unwrap()));
}

#[test]
fn committed_records_cannot_be_refilled() {
    init_tracing();
    let registry = TypeRegistry::default();

    let session = registry.session();
    let marker = declare_record(&session, "Marker", &[]);
    session.commit();

    let session = registry.session();
    assert!(!session.set_fields(marker, vec![Field::new("sneaky", Idx::INT)]));
    session.rollback();
    assert_eq!(registry.describe(marker), "record Marker {}");
}
