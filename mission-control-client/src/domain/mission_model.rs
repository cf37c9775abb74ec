use serde::Deserialize;
use serde::Serialize;
use std::fmt;

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq, Eq)]
pub enum MissionStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

impl fmt::Display for MissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissionStatus::Pending => write!(f, "Pending"),
            MissionStatus::InProgress => write!(f, "In Progress"),
            MissionStatus::Completed => write!(f, "Completed"),
        }
    }
}

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mission {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: MissionStatus,
    pub astronaut_id: i64,
}

// Input types
#[derive(Deserialize, Serialize)]
pub struct MissionInput {
    pub title: String,
    pub description: Option<String>,
    pub status: MissionStatus,
}
