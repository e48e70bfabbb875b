use thiserror::Error;

/// Errors raised by the alignment core and the encoder collaborator.
///
/// Any error aborts the whole request; the core never returns a partial
/// alignment or a degraded top-k.
#[derive(Debug, Error)]
pub enum AlignError {
    /// Malformed input: empty sentence list, mismatched embedding/index
    /// lengths, ragged or zero-dimension vectors.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An embedding contains a non-finite component. Zero-norm vectors are
    /// tolerated (they simply end up unmatched); NaN/Inf values are not.
    #[error("degenerate embedding vector at row {row}")]
    DegenerateVector { row: usize },

    /// The memory budget cannot hold even a single reference vector.
    #[error("resource exhausted: {0}")]
    ResourceExhausted(String),

    /// The external sentence encoder failed. Surfaced as-is, never retried.
    #[error("encoder failure: {0}")]
    EncoderFailure(String),
}
