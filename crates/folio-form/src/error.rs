//! Error types for folio-form.

use std::time::Duration;

use thiserror::Error;

use crate::field::FieldKind;

/// Result type for gatekeeper operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reasons a submit attempt was turned away.
///
/// Every variant has already been rendered into the effect outbox by the
/// time it is returned; callers only need to log it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Another submission was accepted less than one cooldown ago.
    #[error("submission cooldown active, retry in {remaining:?}")]
    Cooldown { remaining: Duration },

    /// One or more fields failed their validation rule.
    #[error("invalid fields: {fields:?}")]
    Invalid { fields: Vec<FieldKind> },

    /// The previous submission has not completed yet.
    #[error("a submission is already in flight")]
    InFlight,
}
