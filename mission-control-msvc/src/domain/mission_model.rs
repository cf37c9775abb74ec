use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;

#[derive(Clone, Copy, Debug, Default, Deserialize, Serialize, PartialEq)]
pub enum MissionStatus {
    #[default]
    Pending,
    #[serde(rename = "In Progress")]
    InProgress,
    Completed,
}

// Domain types
#[derive(Clone, Debug, Deserialize, Serialize)]
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
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: MissionStatus,
}

/// Body of a mission update. Fields left out of the body keep their stored
/// value; an explicit `"description": null` clears the description.
#[derive(Default, Deserialize)]
pub struct MissionUpdateInput {
    pub title: String,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub status: Option<MissionStatus>,
}

// a field that is present, even as null, becomes Some
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}

// State types
#[derive(Clone, Deserialize, Serialize)]
pub struct MissionDocument {
    pub id: i64,
    pub title: String,
    pub description: Option<String>,
    pub status: MissionStatus,
    pub astronaut_id: i64,
}

#[derive(Clone, Deserialize, Serialize)]
pub struct NewMissionDocument {
    pub title: String,
    pub description: Option<String>,
    pub status: MissionStatus,
    pub astronaut_id: i64,
}

#[derive(Clone, Serialize)]
pub struct MissionUpdateDocument {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<MissionStatus>,
}

// Transformation between types
impl From<MissionDocument> for Mission {
    fn from(input: MissionDocument) -> Self {
        Self {
            id: input.id,
            title: input.title,
            description: input.description,
            status: input.status,
            astronaut_id: input.astronaut_id,
        }
    }
}

impl NewMissionDocument {
    pub fn for_astronaut(astronaut_id: i64, input: MissionInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            status: input.status,
            astronaut_id,
        }
    }
}

impl From<MissionUpdateInput> for MissionUpdateDocument {
    fn from(input: MissionUpdateInput) -> Self {
        Self {
            title: input.title,
            description: input.description,
            status: input.status,
        }
    }
}
