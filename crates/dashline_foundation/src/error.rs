//! Error types for dashline.
//!
//! Uses `thiserror` for ergonomic error definition with rich context.
//!
//! Most kinds are precondition violations: they mean the caller broke an ECS
//! contract (double insert, unknown kind, stale entity). Those are reported
//! through [`Error::is_invariant_violation`] so a frame loop can treat them as
//! fatal instead of retrying.

use std::fmt;

use thiserror::Error;

use crate::entity::Entity;

/// The main error type for dashline operations.
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

    /// Records that the error passed through `layer` while running `frame`.
    ///
    /// Keeps any context already attached and only fills in missing fields.
    #[must_use]
    pub fn in_layer(mut self, layer: impl Into<String>, frame: u64) -> Self {
        let context = self.context.get_or_insert_with(ErrorContext::new);
        context.frame.get_or_insert(frame);
        context.stack.push(layer.into());
        self
    }

    /// Creates an entity limit error.
    #[must_use]
    pub fn entity_limit(limit: usize) -> Self {
        Self::new(ErrorKind::EntityLimitReached { limit })
    }

    /// Creates an entity out of range error.
    #[must_use]
    pub fn entity_out_of_range(entity: Entity, capacity: usize) -> Self {
        Self::new(ErrorKind::EntityOutOfRange { entity, capacity })
    }

    /// Creates an entity not found error.
    #[must_use]
    pub fn entity_not_found(entity: Entity) -> Self {
        Self::new(ErrorKind::EntityNotFound(entity))
    }

    /// Creates a stale entity reference error.
    #[must_use]
    pub fn stale_entity(entity: Entity) -> Self {
        Self::new(ErrorKind::StaleEntity(entity))
    }

    /// Creates a component-already-present error.
    #[must_use]
    pub fn component_present(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentAlreadyPresent { entity, component })
    }

    /// Creates a component-missing error.
    #[must_use]
    pub fn component_missing(entity: Entity, component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentMissing { entity, component })
    }

    /// Creates a component-not-registered error.
    #[must_use]
    pub fn component_not_registered(component: &'static str) -> Self {
        Self::new(ErrorKind::ComponentNotRegistered(component))
    }

    /// Creates a system-not-registered error.
    #[must_use]
    pub fn system_not_registered(system: &'static str) -> Self {
        Self::new(ErrorKind::SystemNotRegistered(system))
    }

    /// Returns true if this error reports a broken ECS precondition.
    ///
    /// These are programmer errors with no local recovery.
    #[must_use]
    pub fn is_invariant_violation(&self) -> bool {
        !matches!(self.kind, ErrorKind::Config(_) | ErrorKind::Io(_))
    }
}

/// Categorized error kinds for pattern matching.
#[derive(Debug, Error)]
pub enum ErrorKind {
    /// Too many live entities.
    #[error("entity limit reached ({limit} live entities)")]
    EntityLimitReached {
        /// The configured maximum.
        limit: usize,
    },

    /// Entity index beyond the registry capacity.
    #[error("entity out of range: {entity:?} (capacity {capacity})")]
    EntityOutOfRange {
        /// The offending entity.
        entity: Entity,
        /// The registry capacity.
        capacity: usize,
    },

    /// Entity is not alive.
    #[error("entity not found: {0:?}")]
    EntityNotFound(Entity),

    /// Entity reference is stale (generation mismatch).
    #[error("stale entity reference: {0:?}")]
    StaleEntity(Entity),

    /// Component added to the same entity more than once.
    #[error("component {component} added to {entity:?} more than once")]
    ComponentAlreadyPresent {
        /// The entity.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },

    /// Component not present on the entity.
    #[error("component {component} not found on {entity:?}")]
    ComponentMissing {
        /// The entity.
        entity: Entity,
        /// The component type name.
        component: &'static str,
    },

    /// Component kind used before registration.
    #[error("component not registered before use: {0}")]
    ComponentNotRegistered(&'static str),

    /// Component kind registered twice.
    #[error("component registered more than once: {0}")]
    ComponentAlreadyRegistered(&'static str),

    /// No more component kinds fit in a signature.
    #[error("component limit reached ({limit} kinds), cannot register {component}")]
    ComponentLimitReached {
        /// The signature width.
        limit: usize,
        /// The component that did not fit.
        component: &'static str,
    },

    /// System registered twice.
    #[error("system registered more than once: {0}")]
    SystemAlreadyRegistered(&'static str),

    /// System used before registration.
    #[error("system not registered: {0}")]
    SystemNotRegistered(&'static str),

    /// System is in the middle of its own update or event pass.
    #[error("system is running and cannot be borrowed: {0}")]
    SystemBusy(&'static str),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Terminal or I/O failure outside the ECS.
    #[error("i/o error: {0}")]
    Io(String),

    /// Internal error (should not happen).
    #[error("internal error: {0}")]
    Internal(String),
}

/// Context about where an error occurred.
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Operation that failed, e.g. `add_component`.
    pub operation: Option<String>,
    /// Frame number when the error occurred.
    pub frame: Option<u64>,
    /// Stack of layers/systems the error passed through.
    pub stack: Vec<String>,
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

    /// Sets the frame number.
    #[must_use]
    pub fn with_frame(mut self, frame: u64) -> Self {
        self.frame = Some(frame);
        self
    }

    /// Adds a stack entry.
    #[must_use]
    pub fn with_layer(mut self, layer: impl Into<String>) -> Self {
        self.stack.push(layer.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(operation) = &self.operation {
            write!(f, "in {operation}")?;
        }
        if let Some(frame) = self.frame {
            write!(f, " at frame {frame}")?;
        }
        for layer in &self.stack {
            write!(f, "\n  via {layer}")?;
        }
        Ok(())
    }
}

/// Result type alias using dashline's Error.
pub type Result<T> = std::result::Result<T, Error>;
