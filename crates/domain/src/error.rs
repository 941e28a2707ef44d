//! Unified error types for the domain layer
//!
//! Assembly failures are fatal: a graph with a duplicated identifier or a
//! missing required record is never usable, so every error here aborts the
//! build immediately.

use thiserror::Error;

use crate::ids::RecordKind;

/// Unified error type for graph assembly operations
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    /// An editor id was registered twice
    #[error("Duplicate identifier: '{editor_id}' is already registered")]
    DuplicateIdentifier { editor_id: String },

    /// A stage index was inserted twice
    #[error("Duplicate stage: index {index} already exists")]
    DuplicateStage { index: u16 },

    /// A record the build depends on could not be located
    #[error("Missing required entity: {kind} '{name}' not found")]
    MissingRequiredEntity { kind: RecordKind, name: String },
}

impl DomainError {
    pub fn duplicate_identifier(editor_id: impl Into<String>) -> Self {
        Self::DuplicateIdentifier {
            editor_id: editor_id.into(),
        }
    }

    pub fn duplicate_stage(index: u16) -> Self {
        Self::DuplicateStage { index }
    }

    /// Create a missing entity error
    ///
    /// Used by the asset resolver when a symbolic name cannot be bound, and
    /// by builders when content references an entity that was never created.
    pub fn missing_entity(kind: RecordKind, name: impl Into<String>) -> Self {
        Self::MissingRequiredEntity {
            kind,
            name: name.into(),
        }
    }
}
