use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::Error as Argon2Error;
use argon2::password_hash::PasswordHash;
use argon2::password_hash::PasswordHasher;
use argon2::password_hash::PasswordVerifier;
use argon2::password_hash::SaltString;
use argon2::Argon2;
use thiserror::Error;

pub struct HashImpl;

// argon2::password_hash::Error doesn't implement std::error::Error
#[derive(Error, Debug)]
pub enum HashImplError {
    #[error("argon2 error: {}", .0.to_string())]
    Argon2Error(Argon2Error),
}

impl From<Argon2Error> for HashImplError {
    fn from(err: Argon2Error) -> Self {
        Self::Argon2Error(err)
    }
}

impl HashImpl {
    pub fn hash_password(password: &str) -> Result<String, HashImplError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = Argon2::default().hash_password(password.as_bytes(), &salt)?;
        Ok(hash.to_string())
    }

    /// Returns `Ok(false)` on a password mismatch and an error only when the
    /// stored hash can't be parsed.
    pub fn verify_password(password: &str, stored_hash: &str) -> Result<bool, HashImplError> {
        let parsed_hash = PasswordHash::new(stored_hash)?;
        match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(Argon2Error::Password) => Ok(false),
            Err(err) => Err(HashImplError::from(err)),
        }
    }
}
