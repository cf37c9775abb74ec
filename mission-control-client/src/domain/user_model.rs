use serde::Deserialize;
use serde::Serialize;

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
}

// Input types
#[derive(Deserialize, Serialize)]
pub struct RegisterUserInput {
    pub name: String,
    pub email: String,
    pub password: String,
}

// Output types
#[derive(Deserialize, Serialize)]
pub struct AccessTokenOutput {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
}
