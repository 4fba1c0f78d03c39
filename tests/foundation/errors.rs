//! Integration tests for Error types
//!
//! Tests error construction, display, context, and error kinds.

use stratum_foundation::{EntityKey, Error, ErrorContext, ErrorKind};

// =============================================================================
// Error Construction
// =============================================================================

#[test]
fn error_entity_not_found() {
    let err = Error::entity_not_found(EntityKey::new(42));
    assert!(matches!(err.kind, ErrorKind::EntityNotFound(_)));
    assert!(format!("{err}").contains("42"));
}

#[test]
fn error_entity_erased() {
    let err = Error::entity_erased(EntityKey::new(7));
    assert_eq!(err.kind, ErrorKind::EntityErased(EntityKey::new(7)));
    assert!(format!("{err}").contains("erased"));
}

#[test]
fn error_component_not_found() {
    let err = Error::component_not_found(EntityKey::new(2), "Position");
    match &err.kind {
        ErrorKind::ComponentNotFound { entity, component } => {
            assert_eq!(*entity, EntityKey::new(2));
            assert_eq!(component, "Position");
        }
        other => panic!("unexpected kind: {other:?}"),
    }
}

#[test]
fn error_unknown_type() {
    let err = Error::unknown_type("Velocity");
    assert!(matches!(err.kind, ErrorKind::UnknownType(ref name) if name == "Velocity"));
}

#[test]
fn error_unbound_cursor() {
    let err = Error::unbound_cursor();
    assert_eq!(err.kind, ErrorKind::UnboundCursor);
    assert!(format!("{err}").contains("not bound"));
}

#[test]
fn error_invalid_config() {
    let err = Error::invalid_config("zero capacity");
    assert!(format!("{err}").contains("zero capacity"));
}

// =============================================================================
// Error Context
// =============================================================================

#[test]
fn error_without_context() {
    let err = Error::unbound_cursor();
    assert!(err.context.is_none());
}

#[test]
fn error_with_context() {
    let err = Error::entity_erased(EntityKey::new(1)).with_context(
        ErrorContext::new()
            .with_operation("Repository::try_at")
            .with_note("key was erased by a resize"),
    );

    let ctx = err.context.as_ref().unwrap();
    assert_eq!(ctx.operation.as_deref(), Some("Repository::try_at"));
    assert_eq!(ctx.notes, vec!["key was erased by a resize".to_string()]);

    let rendered = format!("{ctx}");
    assert!(rendered.starts_with("in Repository::try_at"));
    assert!(rendered.contains("note: key was erased"));
}

#[test]
fn error_is_std_error() {
    fn takes_std_error(_: &dyn std::error::Error) {}
    takes_std_error(&Error::unbound_cursor());
}
