// ============================
// crates/backend-lib/src/auth/password.rs
// ============================
//! Password hashing and verification.
use crate::config::HashingSettings;
use argon2::{
    password_hash::{self, PasswordHash, PasswordHasher, PasswordVerifier, Salt, SaltString},
    Algorithm, Argon2, Params, Version,
};
use rand::{rngs::OsRng, TryRngCore};
use thiserror::Error;

/// Burned through when a stored hash cannot be used, so that a malformed
/// hash costs as much as a wrong password.
const DUMMY_PASSWORD: &str = "tenantry-dummy-password";

#[derive(Error, Debug)]
pub enum CredentialError {
    #[error("invalid Argon2 parameters: {0}")]
    InvalidParams(String),

    #[error("password hashing error: {0}")]
    Hashing(String),
}

impl From<password_hash::Error> for CredentialError {
    fn from(err: password_hash::Error) -> Self {
        CredentialError::Hashing(err.to_string())
    }
}

/// Argon2id password hashing with a fresh random salt per hash.
///
/// Verification is a pure function of (plaintext, PHC string); nothing is
/// stored on the user record besides the hash itself.
#[derive(Debug)]
pub struct CredentialStore {
    argon2: Argon2<'static>,
    dummy_hash: String,
    /// Argon2 verifications run so far
    #[cfg(test)]
    evaluations: std::sync::atomic::AtomicUsize,
}

impl CredentialStore {
    pub fn new(settings: &HashingSettings) -> Result<Self, CredentialError> {
        let params = Params::new(
            settings.memory_kib,
            settings.iterations,
            settings.parallelism,
            None,
        )
        .map_err(|err| CredentialError::InvalidParams(err.to_string()))?;

        let mut store = Self {
            argon2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            dummy_hash: String::new(),
            #[cfg(test)]
            evaluations: std::sync::atomic::AtomicUsize::new(0),
        };
        store.dummy_hash = store.hash(DUMMY_PASSWORD)?;
        Ok(store)
    }

    /// Hash `password` into a PHC string.
    pub fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt_bytes = [0u8; Salt::RECOMMENDED_LENGTH];
        OsRng
            .try_fill_bytes(&mut salt_bytes)
            .map_err(|err| CredentialError::Hashing(err.to_string()))?;
        let salt = SaltString::encode_b64(&salt_bytes)?;

        Ok(self
            .argon2
            .hash_password(password.as_bytes(), &salt)?
            .to_string())
    }

    /// `true` iff `password` matches `password_hash`. Never fails: an
    /// unparseable or unusable hash yields `false`.
    pub fn verify(&self, password: &str, password_hash: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(password_hash) else {
            self.burn(password);
            return false;
        };

        match self.evaluate(password, &parsed) {
            Ok(()) => true,
            Err(password_hash::Error::Password) => false,
            Err(_) => {
                self.burn(password);
                false
            },
        }
    }

    /// Spend one verification on a login whose account does not exist, so
    /// it costs the same as a wrong password.
    pub fn verify_absent(&self, password: &str) {
        self.burn(password);
    }

    fn burn(&self, password: &str) {
        if let Ok(dummy) = PasswordHash::new(&self.dummy_hash) {
            let _ = self.evaluate(password, &dummy);
        }
    }

    fn evaluate(&self, password: &str, hash: &PasswordHash<'_>) -> password_hash::Result<()> {
        #[cfg(test)]
        self.evaluations
            .fetch_add(1, std::sync::atomic::Ordering::SeqCst);
        self.argon2.verify_password(password.as_bytes(), hash)
    }

    #[cfg(test)]
    pub(crate) fn evaluations(&self) -> usize {
        self.evaluations.load(std::sync::atomic::Ordering::SeqCst)
    }
}
