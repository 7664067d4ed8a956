//! Error types for access resolution.
//!
//! Every failure names the collection and identifier that caused it, so the
//! condition can be reported to the user without exposing a raw internal
//! fault.

use std::io;

/// Failures surfaced while resolving access over a dump.
#[derive(Debug, thiserror::Error)]
pub enum AccessError {
    /// The requested entity-set resource does not exist in the dump.
    ///
    /// This aborts the evaluation before any privilege lookup, but it is a
    /// reportable condition rather than a fault: a hosting process keeps
    /// running.
    #[error("entity set '{entity_set}' does not exist in the dump")]
    EntityNotFound { entity_set: String },

    /// A membership or link record references an identifier with no matching
    /// record in its target collection.
    #[error(
        "inconsistent data: '{referenced_from}' references {key} '{id}' \
         but '{collection}' has no such record"
    )]
    InconsistentData {
        /// Collection the reference should have resolved in.
        collection: String,
        /// Field name of the dangling identifier.
        key: String,
        /// The identifier value itself.
        id: String,
        /// Collection holding the record that carries the reference.
        referenced_from: String,
    },

    /// A required collection file could not be read. Fatal to the current
    /// evaluation; never retried, since storage is static within a run.
    #[error("collection '{collection}' could not be read: {source}")]
    StorageUnavailable {
        collection: String,
        #[source]
        source: io::Error,
    },

    /// A collection file exists but does not parse as a record envelope.
    #[error("collection '{collection}' is not a valid record envelope: {source}")]
    MalformedCollection {
        collection: String,
        #[source]
        source: serde_json::Error,
    },
}

impl AccessError {
    /// Create an `EntityNotFound` for the named entity set.
    pub fn entity_not_found(entity_set: impl Into<String>) -> Self {
        Self::EntityNotFound {
            entity_set: entity_set.into(),
        }
    }

    /// Create an `InconsistentData` for a dangling reference.
    pub fn dangling(
        collection: impl Into<String>,
        key: impl Into<String>,
        id: impl Into<String>,
        referenced_from: impl Into<String>,
    ) -> Self {
        Self::InconsistentData {
            collection: collection.into(),
            key: key.into(),
            id: id.into(),
            referenced_from: referenced_from.into(),
        }
    }

    /// Whether the condition can be handled by reporting it and moving on.
    ///
    /// Only a missing entity set qualifies; everything else means the dump
    /// itself is unusable for this evaluation.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, AccessError::EntityNotFound { .. })
    }
}

/// Result type for access resolution operations.
pub type AccessResult<T> = Result<T, AccessError>;
