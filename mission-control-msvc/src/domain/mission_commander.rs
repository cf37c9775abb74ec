use crate::domain::astronaut_model::AstronautDocument;
use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionDocument;
use crate::domain::mission_model::MissionInput;
use crate::domain::mission_model::MissionUpdateDocument;
use crate::domain::mission_model::MissionUpdateInput;
use crate::domain::mission_model::NewMissionDocument;
use crate::providers::state::MemStateImpl;
use crate::providers::state::StateImplError;
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionCommanderError {
    #[error(transparent)]
    StateImplError(#[from] StateImplError),
    #[error("astronaut not found")]
    AstronautNotFound,
    #[error("mission not found")]
    MissionNotFound,
}

#[derive(Clone)]
pub struct MissionCommander {
    state: Arc<MemStateImpl>,
}

impl MissionCommander {
    pub fn new(state: Arc<MemStateImpl>) -> Self {
        Self { state }
    }
}

impl MissionCommander {
    pub async fn create_mission_for_astronaut(
        &self,
        astronaut_id: i64,
        input: MissionInput,
    ) -> Result<Mission, MissionCommanderError> {
        info!("creating mission for astronaut with id {}", astronaut_id);

        match self
            .state
            .find_one_by_id::<AstronautDocument>("astronauts", astronaut_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(MissionCommanderError::AstronautNotFound),
        }?;

        let mission = self
            .state
            .insert_one::<_, MissionDocument>(
                "missions",
                &NewMissionDocument::for_astronaut(astronaut_id, input),
                &[],
            )
            .await?;

        info!("mission created with id {}", mission.id);

        Ok(Mission::from(mission))
    }
}

impl MissionCommander {
    pub async fn update_mission(
        &self,
        id: i64,
        input: MissionUpdateInput,
    ) -> Result<Mission, MissionCommanderError> {
        info!("updating mission with id {}", id);

        let update = MissionUpdateDocument::from(input);
        let mission = match self
            .state
            .update_one::<_, MissionDocument>("missions", id, &update, &[])
            .await?
        {
            Some(mission) => Ok(mission),
            None => Err(MissionCommanderError::MissionNotFound),
        }?;

        info!("mission updated with id {}", id);

        Ok(Mission::from(mission))
    }
}

impl MissionCommander {
    pub async fn delete_mission(&self, id: i64) -> Result<(), MissionCommanderError> {
        if !self.state.delete_one("missions", id).await {
            return Err(MissionCommanderError::MissionNotFound);
        }

        info!("mission deleted with id {}", id);

        Ok(())
    }
}
