use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionInput;
use crate::domain::mission_model::MissionStatus;
use crate::domain::session_guard::invalidate_on_unauthorized;
use crate::domain::session_guard::require_session;
use crate::domain::session_guard::required;
use crate::error::MissionControlError;
use crate::providers::api::Access;
use crate::providers::api::ApiClientImpl;
use crate::providers::session::SessionStoreImpl;
use log::info;
use std::sync::Arc;

/// Missions of one astronaut, addressed through the astronaut's id.
pub struct MissionController {
    api: Arc<ApiClientImpl>,
    session: Arc<SessionStoreImpl>,
}

impl MissionController {
    pub fn new(api: Arc<ApiClientImpl>, session: Arc<SessionStoreImpl>) -> Self {
        Self { api, session }
    }
}

fn missions_path(astronaut_id: i64) -> String {
    format!("/astronauts/{}/missions/", astronaut_id)
}

impl MissionController {
    pub async fn list_missions(
        &self,
        astronaut_id: i64,
    ) -> Result<Vec<Mission>, MissionControlError> {
        require_session(&self.session)?;

        self.api
            .get::<Vec<Mission>>(&missions_path(astronaut_id))
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))
    }
}

impl MissionController {
    /// Assigns a new mission to the astronaut. Missions always start Pending.
    pub async fn create_mission(
        &self,
        astronaut_id: i64,
        title: &str,
        description: Option<&str>,
    ) -> Result<Mission, MissionControlError> {
        let input = MissionInput {
            title: required(title, "title is required")?.to_string(),
            description: description
                .map(str::trim)
                .filter(|d| !d.is_empty())
                .map(str::to_string),
            status: MissionStatus::Pending,
        };
        require_session(&self.session)?;

        let mission = self
            .api
            .post_json::<_, Mission>(&missions_path(astronaut_id), Access::Bearer, &input)
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))?;

        info!(
            "mission created with id {} for astronaut with id {}",
            mission.id, astronaut_id
        );

        Ok(mission)
    }
}
