use serde::Deserialize;
use serde::Serialize;

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize)]
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

// State types
#[derive(Clone, Deserialize, Serialize)]
pub struct UserDocument {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub hashed_password: String,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct NewUserDocument {
    pub name: String,
    pub email: String,
    pub hashed_password: String,
}

// Transformation between types
impl From<UserDocument> for User {
    fn from(input: UserDocument) -> Self {
        Self {
            id: input.id,
            name: input.name,
            email: input.email,
        }
    }
}
