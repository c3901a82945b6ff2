//! Error types for the unitdrill core.
//!
//! Session and catalog failures are typed so front-ends can tell a
//! misuse of the session lifecycle apart from a bad unit catalog.

use thiserror::Error;

use crate::session::SessionPhase;

/// Errors raised by the practice session controller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation that needs a running session was called in another phase.
    #[error("session is not running (phase: {0})")]
    NotRunning(SessionPhase),

    /// `end()` was called before the session was ever started.
    #[error("session has not been started")]
    NotStarted,
}

/// Errors raised while building or querying a unit catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// The catalog contains no groups to draw problems from.
    #[error("unit catalog is empty")]
    Empty,

    /// A group failed validation.
    #[error("invalid unit group '{group}': {message}")]
    InvalidGroup { group: String, message: String },

    /// A conversion referenced a unit that is not part of the group.
    #[error("unknown unit '{unit}' in group '{group}'")]
    UnknownUnit { group: String, unit: String },

    /// A conversion used the same unit on both sides.
    #[error("cannot convert '{0}' to itself")]
    SameUnit(String),
}
