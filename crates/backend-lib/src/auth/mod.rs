// ============================
// crates/backend-lib/src/auth/mod.rs
// ============================
//! Authentication module.

pub mod guard;
pub mod password;
pub mod token;

pub use guard::{bearer_token, AccessGuard, AuthenticatedUser};
pub use password::{CredentialError, CredentialStore};
pub use token::{Claims, TokenError, TokenIssuer};
