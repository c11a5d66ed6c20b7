use std::fmt;

use chrono::Utc;
use jsonwebtoken::decode;
use jsonwebtoken::encode;
use jsonwebtoken::errors::Error as JsonWebTokenError;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::Algorithm;
use jsonwebtoken::DecodingKey;
use jsonwebtoken::EncodingKey;
use jsonwebtoken::Header;
use jsonwebtoken::Validation;

use super::claims::Claims;
use super::errors::JwtError;

/// JWT token handler for encoding and decoding tokens.
///
/// Owns the symmetric signing secret and the HMAC algorithm. Built once at
/// startup from configuration and shared read-only.
pub struct JwtHandler {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    validation: Validation,
}

impl fmt::Debug for JwtHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtHandler")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

impl JwtHandler {
    /// Create a handler signing with HS256.
    ///
    /// # Security Notes
    /// - The secret should be at least 256 bits (32 bytes) for HS256
    /// - Store secrets in environment variables or secure vaults, never in code
    pub fn new(secret: &[u8]) -> Self {
        Self::build(secret, Algorithm::HS256)
    }

    /// Create a handler for an explicit HMAC algorithm.
    ///
    /// # Errors
    /// * `UnsupportedAlgorithm` - `algorithm` is not HS256, HS384 or HS512
    pub fn with_algorithm(secret: &[u8], algorithm: Algorithm) -> Result<Self, JwtError> {
        match algorithm {
            Algorithm::HS256 | Algorithm::HS384 | Algorithm::HS512 => {
                Ok(Self::build(secret, algorithm))
            }
            other => Err(JwtError::UnsupportedAlgorithm(other)),
        }
    }

    fn build(secret: &[u8], algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.leeway = 0;
        validation.validate_aud = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            algorithm,
            validation,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Encode claims into a signed JWT.
    ///
    /// # Errors
    /// * `EncodingFailed` - Claims expire at or before their issue time, or signing failed
    pub fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        if claims.exp <= claims.iat {
            return Err(JwtError::EncodingFailed(
                "expiration must be after issued-at".to_string(),
            ));
        }

        encode(&Header::new(self.algorithm), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify a JWT and return its claims.
    ///
    /// The signature is checked first, then the claim structure, then expiry
    /// against the current time (no leeway).
    ///
    /// # Errors
    /// * `InvalidSignature` - Signed with another secret or algorithm
    /// * `Expired` - Current time is at or past `exp`
    /// * `Malformed` - Not a JWT, or claims do not match the expected structure
    /// * `VerificationFailed` - Any other decoding failure
    pub fn decode(&self, token: &str) -> Result<Claims, JwtError> {
        let claims = decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(classify)?;

        if claims.is_expired(Utc::now().timestamp()) {
            return Err(JwtError::Expired);
        }

        Ok(claims)
    }
}

fn classify(error: JsonWebTokenError) -> JwtError {
    match error.kind() {
        ErrorKind::ExpiredSignature => JwtError::Expired,
        ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => JwtError::InvalidSignature,
        ErrorKind::InvalidToken
        | ErrorKind::Base64(_)
        | ErrorKind::Json(_)
        | ErrorKind::Utf8(_)
        | ErrorKind::MissingRequiredClaim(_) => JwtError::Malformed(error.to_string()),
        _ => {
            tracing::debug!(error = %error, "Unexpected JWT decoding failure");
            JwtError::VerificationFailed
        }
    }
}
