//! Errors surfaced by generation and derived randomness.

use thiserror::Error;

/// Errors returned by [`HardwareRng`](crate::HardwareRng).
///
/// None of these are fatal and none are retried by the crate, apart from
/// the single lazy threading initialization on the thread-safe path.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RngError {
    /// A caller-supplied argument broke a precondition. Detected before the
    /// generator is called.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// The generator reported failure for a well-formed request.
    #[error("generation failed: {0}")]
    GenerationFailure(String),

    /// Thread-safe generation was requested but threading could not be
    /// initialized.
    #[error("threading is not available; call init_threading() before thread-safe generation")]
    ThreadingUnavailable,

    /// Nothing to select from.
    #[error("cannot select from an empty collection")]
    EmptyInput,
}
