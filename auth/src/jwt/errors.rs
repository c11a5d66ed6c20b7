use jsonwebtoken::Algorithm;
use thiserror::Error;

/// Error type for JWT operations.
///
/// The decode variants differ only for logging. Callers facing a client must
/// collapse them into a single "unauthorized" outcome.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum JwtError {
    #[error("Failed to encode token: {0}")]
    EncodingFailed(String),

    #[error("Unsupported signing algorithm: {0:?}")]
    UnsupportedAlgorithm(Algorithm),

    #[error("Token is expired")]
    Expired,

    #[error("Token signature is invalid")]
    InvalidSignature,

    #[error("Token is malformed: {0}")]
    Malformed(String),

    #[error("Token verification failed")]
    VerificationFailed,
}

impl JwtError {
    /// Short stable label used as a structured log field.
    pub fn reason(&self) -> &'static str {
        match self {
            JwtError::EncodingFailed(_) => "encoding_failed",
            JwtError::UnsupportedAlgorithm(_) => "unsupported_algorithm",
            JwtError::Expired => "expired",
            JwtError::InvalidSignature => "invalid_signature",
            JwtError::Malformed(_) => "malformed",
            JwtError::VerificationFailed => "verification_failed",
        }
    }
}
