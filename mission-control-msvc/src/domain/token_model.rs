use serde::Deserialize;
use serde::Serialize;

pub const TOKEN_TYPE: &str = "bearer";

// Input types, sent as an OAuth2 password form
#[derive(Deserialize, Serialize)]
pub struct CredentialsInput {
    pub username: String,
    pub password: String,
}

// Output types
#[derive(Deserialize, Serialize)]
pub struct AccessTokenOutput {
    pub access_token: String,
    pub token_type: String,
}
