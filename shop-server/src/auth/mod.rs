//! Authentication and authorization
//!
//! - [`JwtService`] - session token service
//! - [`CurrentUser`] - authenticated caller context
//! - [`require_auth`] / [`require_admin`] - route middleware
//! - [`CredentialHasher`] - password hashing seam

pub mod extractor;
pub mod jwt;
pub mod middleware;
pub mod password;

pub use jwt::{Claims, CurrentUser, JwtConfig, JwtError, JwtService};
pub use middleware::{require_admin, require_auth};
pub use password::{Argon2Hasher, CredentialHasher};
