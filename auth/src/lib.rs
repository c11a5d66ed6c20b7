//! Authentication core for the pokedex backend
//!
//! Provides:
//! - Password hashing (Argon2id)
//! - JWT access/refresh token issuance and verification
//! - Login verification against a user lookup collaborator
//! - Bearer-token request authorization with scope checks
//!
//! The owning service supplies user storage by implementing [`UserLookup`]
//! and exposes its user type through [`Credentials`].
//!
//! # Examples
//!
//! ## Password Hashing
//! ```
//! use auth::PasswordHasher;
//!
//! let hasher = PasswordHasher::new();
//! let hash = hasher.hash("my_password").unwrap();
//! assert!(hasher.verify("my_password", &hash).unwrap());
//! ```
//!
//! ## Issuing and verifying tokens
//! ```
//! use std::sync::Arc;
//!
//! use auth::{JwtHandler, SessionIssuer, TokenType};
//!
//! let handler = Arc::new(JwtHandler::new(b"secret_key_at_least_32_bytes_long!"));
//! let issuer = SessionIssuer::new(handler);
//!
//! let pair = issuer.issue_pair("ash@pallet.town", ["me"]).unwrap();
//! let claims = issuer.verify(&pair.access_token).unwrap();
//! assert_eq!(claims.token_type, TokenType::Access);
//! assert!(claims.has_scope("me"));
//! ```

pub mod authenticator;
pub mod authorizer;
pub mod jwt;
pub mod lookup;
pub mod password;
pub mod session;

#[cfg(test)]
mod testing;

pub use authenticator::AuthenticationError;
pub use authenticator::Authenticator;
pub use authorizer::bearer_challenge;
pub use authorizer::AuthorizationError;
pub use authorizer::Principal;
pub use authorizer::RequestAuthorizer;
pub use jwt::Claims;
pub use jwt::JwtError;
pub use jwt::JwtHandler;
pub use jwt::TokenType;
pub use lookup::Credentials;
pub use lookup::LookupError;
pub use lookup::UserLookup;
pub use password::PasswordError;
pub use password::PasswordHasher;
pub use session::SessionIssuer;
pub use session::TokenPair;
