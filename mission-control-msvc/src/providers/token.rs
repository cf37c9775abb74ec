use jwt_simple::prelude::Claims;
use jwt_simple::prelude::Duration;
use jwt_simple::prelude::HS256Key;
use jwt_simple::prelude::MACLike;
use jwt_simple::prelude::NoCustomClaims;
use jwt_simple::prelude::VerificationOptions;
use thiserror::Error;

#[derive(Clone)]
pub struct JwtTokenImpl {
    key: HS256Key,
    expires_in: u64,
}

#[derive(Debug, Error)]
pub enum TokenImplError {
    #[error(transparent)]
    JwtImplError(#[from] jwt_simple::Error),
    #[error("token without subject")]
    TokenWithoutSubject,
}

impl JwtTokenImpl {
    pub fn new(secret_key: &str, expires_in: u64) -> Self {
        Self {
            key: HS256Key::from_bytes(secret_key.as_bytes()),
            expires_in,
        }
    }
}

impl JwtTokenImpl {
    pub fn produce_token(&self, subject: &str) -> Result<String, TokenImplError> {
        let claims =
            Claims::create(Duration::from_secs(self.expires_in)).with_subject(subject.to_string());
        let token = self.key.authenticate(claims)?;
        Ok(token)
    }
}

impl JwtTokenImpl {
    /// Returns the subject of a token signed by this key that has not expired.
    pub fn validate_token(&self, raw_token: &str) -> Result<String, TokenImplError> {
        let claims = self.key.verify_token::<NoCustomClaims>(
            raw_token,
            Some(VerificationOptions {
                time_tolerance: None,
                ..VerificationOptions::default()
            }),
        )?;

        claims.subject.ok_or(TokenImplError::TokenWithoutSubject)
    }
}
