use crate::coerce::CoerceError;
use thiserror::Error as ThisError;

///
/// ArgumentError
///
/// Construction-time contract violations. Always surfaced at the call that
/// introduced the bad argument, never swallowed; every variant is
/// deterministic for the same inputs.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum ArgumentError {
    #[error("{name} is required")]
    Required { name: &'static str },

    #[error("{message}")]
    Invalid { message: String },
}

impl ArgumentError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

///
/// Error
///
/// Crate-level aggregate for callers that funnel both failure surfaces into
/// one type. The core itself never logs, retries, or suppresses either.
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum Error {
    #[error(transparent)]
    Argument(#[from] ArgumentError),

    #[error(transparent)]
    Coerce(#[from] CoerceError),
}
