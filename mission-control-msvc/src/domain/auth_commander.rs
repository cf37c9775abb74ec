use crate::domain::token_model::AccessTokenOutput;
use crate::domain::token_model::CredentialsInput;
use crate::domain::token_model::TOKEN_TYPE;
use crate::domain::user_model::NewUserDocument;
use crate::domain::user_model::RegisterUserInput;
use crate::domain::user_model::User;
use crate::domain::user_model::UserDocument;
use crate::providers::hash::HashImpl;
use crate::providers::hash::HashImplError;
use crate::providers::state::MemStateImpl;
use crate::providers::state::StateImplError;
use crate::providers::token::JwtTokenImpl;
use crate::providers::token::TokenImplError;
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AuthCommanderError {
    #[error(transparent)]
    HashImplError(#[from] HashImplError),
    #[error(transparent)]
    StateImplError(StateImplError),
    #[error(transparent)]
    TokenImplError(#[from] TokenImplError),
    #[error("email already registered")]
    EmailAlreadyRegistered,
    #[error("incorrect username or password")]
    BadCredentials,
    #[error("could not validate credentials")]
    InvalidToken,
}

impl From<StateImplError> for AuthCommanderError {
    fn from(err: StateImplError) -> Self {
        match err {
            StateImplError::DuplicateKey(_) => Self::EmailAlreadyRegistered,
            err => Self::StateImplError(err),
        }
    }
}

#[derive(Clone)]
pub struct AuthCommander {
    state: Arc<MemStateImpl>,
    token: Arc<JwtTokenImpl>,
}

impl AuthCommander {
    pub fn new(state: Arc<MemStateImpl>, token: Arc<JwtTokenImpl>) -> Self {
        Self { state, token }
    }
}

impl AuthCommander {
    pub async fn register_user(
        &self,
        input: RegisterUserInput,
    ) -> Result<User, AuthCommanderError> {
        info!("registering user {}", input.email);

        match self
            .state
            .find_one_by_field::<UserDocument, _>("users", "email", &input.email)
            .await?
        {
            Some(_) => Err(AuthCommanderError::EmailAlreadyRegistered),
            None => Ok(()),
        }?;

        let document = NewUserDocument {
            name: input.name,
            email: input.email,
            hashed_password: HashImpl::hash_password(&input.password)?,
        };

        let user = self
            .state
            .insert_one::<_, UserDocument>("users", &document, &["email"])
            .await?;

        info!("user registered with id {}", user.id);

        Ok(User::from(user))
    }
}

impl AuthCommander {
    pub async fn exchange_credentials_for_token(
        &self,
        input: CredentialsInput,
    ) -> Result<AccessTokenOutput, AuthCommanderError> {
        let user = match self
            .state
            .find_one_by_field::<UserDocument, _>("users", "email", &input.username)
            .await?
        {
            Some(user) => Ok(user),
            None => Err(AuthCommanderError::BadCredentials),
        }?;

        if !HashImpl::verify_password(&input.password, &user.hashed_password)? {
            return Err(AuthCommanderError::BadCredentials);
        }

        let access_token = self.token.produce_token(&user.email)?;

        Ok(AccessTokenOutput {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
        })
    }
}

impl AuthCommander {
    /// Resolves the user a bearer token was issued to.
    pub async fn authenticate(&self, raw_token: &str) -> Result<User, AuthCommanderError> {
        let email = self
            .token
            .validate_token(raw_token)
            .map_err(|_| AuthCommanderError::InvalidToken)?;

        match self
            .state
            .find_one_by_field::<UserDocument, _>("users", "email", &email)
            .await?
        {
            Some(user) => Ok(User::from(user)),
            None => Err(AuthCommanderError::InvalidToken),
        }
    }
}
