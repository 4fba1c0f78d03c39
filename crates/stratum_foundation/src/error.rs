//! Error types for Stratum.
//!
//! Absent data is reported through `Option`/`bool` on the plain accessors.
//! These errors back the checked accessors, which explain *why* a lookup
//! came back empty.

use std::fmt;

use thiserror::Error;

use crate::entity::EntityKey;

/// The main error type for Stratum operations.
#[derive(Debug, Error)]
#[error("{kind}")]
pub struct Error {
    /// The kind of error that occurred.
    pub kind: ErrorKind,
    /// Optional context about where the error occurred.
    pub context: Option<ErrorContext>,
}

impl Error {
    /// Creates a new error with the given kind.
    #[must_use]
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            context: None,
        }
    }

    /// Adds context to this error.
    #[must_use]
    pub fn with_context(mut self, context: ErrorContext) -> Self {
        self.context = Some(context);
        self
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(key: EntityKey) -> Self {
        Self::new(ErrorKind::EntityNotFound(key))
    }

    /// Creates an erased (tombstoned) entity error.
    #[must_use]
    pub fn entity_erased(key: EntityKey) -> Self {
        Self::new(ErrorKind::EntityErased(key))
    }

    /// Creates a component not found error.
    #[must_use]
    pub fn component_not_found(entity: EntityKey, component: impl Into<String>) -> Self {
        Self::new(ErrorKind::ComponentNotFound {
            entity,
            component: component.into(),
        })
    }

    /// Creates an unknown component type error.
    #[must_use]
    pub fn unknown_type(component: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownType(component.into()))
    }

    /// Creates an unbound cursor error.
    #[must_use]
    pub fn unbound_cursor() -> Self {
        Self::new(ErrorKind::UnboundCursor)
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::InvalidConfig(message.into()))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    /// Key was never issued by the repository.
    #[error("entity not found: {0}")]
    EntityNotFound(EntityKey),

    /// Key was issued but has since been erased.
    #[error("entity erased: {0}")]
    EntityErased(EntityKey),

    /// Entity exists but holds no value of the component type.
    #[error("component not found: {component} on {entity}")]
    ComponentNotFound {
        /// The entity that was queried.
        entity: EntityKey,
        /// The component type name.
        component: String,
    },

    /// The component type has never been stored in this repository.
    #[error("unknown component type: {0}")]
    UnknownType(String),

    /// Cursor is not bound to any repository.
    #[error("cursor is not bound to a repository")]
    UnboundCursor,

    /// Configuration values are out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Name of the operation that failed.
    pub operation: Option<String>,
    /// Additional notes, outermost last.
    pub notes: Vec<String>,
}

impl ErrorContext {
    /// Creates a new empty context.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the operation name.
    #[must_use]
    pub fn with_operation(mut self, operation: impl Into<String>) -> Self {
        self.operation = Some(operation.into());
        self
    }

    /// Adds a note.
    #[must_use]
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.notes.push(note.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        for note in &self.notes {
            write!(f, "\n  note: {note}")?;
        }
        Ok(())
    }
}
