//! Arena-specific error types.

use hemesh_core::EntityKind;
use thiserror::Error;

use crate::column::ColumnType;

/// Errors reported by checked column lookups and config validation.
///
/// Out-of-range element access is not an error: it is a contract
/// violation and panics.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// The arena configuration cannot be used.
    #[error("invalid arena config: {reason}")]
    InvalidConfig {
        /// Why the configuration was rejected.
        reason: String,
    },
    /// A column with this name is already registered for the kind.
    #[error("column '{name}' is already registered on {kind}")]
    DuplicateColumn {
        /// Entity kind owning the columns.
        kind: EntityKind,
        /// The duplicated column name.
        name: String,
    },
    /// No column with this name is registered for the kind.
    #[error("unknown column '{name}' on {kind}")]
    UnknownColumn {
        /// Entity kind owning the columns.
        kind: EntityKind,
        /// The requested column name.
        name: String,
    },
    /// The column exists but stores a different element type.
    #[error("column '{name}' on {kind} stores {found}, requested {expected}")]
    ColumnTypeMismatch {
        /// Entity kind owning the columns.
        kind: EntityKind,
        /// The requested column name.
        name: String,
        /// Element type the caller asked for.
        expected: ColumnType,
        /// Element type actually stored.
        found: ColumnType,
    },
}
