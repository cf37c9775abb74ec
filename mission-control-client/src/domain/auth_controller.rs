use crate::domain::session_guard::required;
use crate::domain::user_model::AccessTokenOutput;
use crate::domain::user_model::RegisterUserInput;
use crate::domain::user_model::User;
use crate::error::MissionControlError;
use crate::providers::api::Access;
use crate::providers::api::ApiClientImpl;
use crate::providers::session::SessionStoreImpl;
use log::info;
use std::sync::Arc;

const CREDENTIALS_REQUIRED: &str = "email and password are required";
const REGISTRATION_REQUIRED: &str = "name, email and password are required";

pub struct AuthController {
    api: Arc<ApiClientImpl>,
    session: Arc<SessionStoreImpl>,
}

impl AuthController {
    pub fn new(api: Arc<ApiClientImpl>, session: Arc<SessionStoreImpl>) -> Self {
        Self { api, session }
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }
}

fn require_password(password: &str, message: &str) -> Result<(), MissionControlError> {
    if password.is_empty() {
        Err(MissionControlError::Validation(message.to_string()))
    } else {
        Ok(())
    }
}

impl AuthController {
    /// Exchanges credentials for a bearer token and stores it. A rejected
    /// login leaves any existing session as it was.
    pub async fn login(&self, email: &str, password: &str) -> Result<(), MissionControlError> {
        let email = required(email, CREDENTIALS_REQUIRED)?;
        require_password(password, CREDENTIALS_REQUIRED)?;

        let fields = [("username", email), ("password", password)];
        let token = self
            .api
            .post_form::<AccessTokenOutput>("/token", &fields)
            .await?;

        self.session.set_token(&token.access_token)?;
        info!("logged in as {}", email);

        Ok(())
    }
}

impl AuthController {
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<User, MissionControlError> {
        let input = RegisterUserInput {
            name: required(name, REGISTRATION_REQUIRED)?.to_string(),
            email: required(email, REGISTRATION_REQUIRED)?.to_string(),
            password: password.to_string(),
        };
        require_password(password, REGISTRATION_REQUIRED)?;

        let user = self
            .api
            .post_json::<_, User>("/register/", Access::Public, &input)
            .await?;

        info!("registered user with id {}", user.id);

        Ok(user)
    }
}

impl AuthController {
    pub fn logout(&self) -> Result<(), MissionControlError> {
        self.session.clear()?;
        info!("logged out");
        Ok(())
    }
}
