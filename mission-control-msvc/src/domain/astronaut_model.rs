use crate::domain::mission_model::Mission;
use serde::Deserialize;
use serde::Serialize;

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Astronaut {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub missions: Vec<Mission>,
}

// Input types
#[derive(Deserialize, Serialize)]
pub struct AstronautInput {
    pub name: String,
    pub email: String,
}

// State types
#[derive(Clone, Deserialize, Serialize)]
pub struct AstronautDocument {
    pub id: i64,
    pub name: String,
    pub email: String,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct NewAstronautDocument {
    pub name: String,
    pub email: String,
}

// Transformation between types
impl From<&AstronautInput> for NewAstronautDocument {
    fn from(input: &AstronautInput) -> Self {
        Self {
            name: input.name.clone(),
            email: input.email.clone(),
        }
    }
}

impl Astronaut {
    pub fn from_document(document: AstronautDocument, missions: Vec<Mission>) -> Self {
        Self {
            id: document.id,
            name: document.name,
            email: document.email,
            missions,
        }
    }
}
