use crate::domain::mission_model::Mission;
use serde::Deserialize;
use serde::Serialize;

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Astronaut {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub missions: Vec<Mission>,
}

// Input types
#[derive(Deserialize, Serialize)]
pub struct AstronautInput {
    pub name: String,
    pub email: String,
}
