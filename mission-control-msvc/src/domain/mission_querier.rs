use crate::domain::astronaut_model::AstronautDocument;
use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionDocument;
use crate::providers::state::MemStateImpl;
use crate::providers::state::StateImplError;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionQuerierError {
    #[error(transparent)]
    StateImplError(#[from] StateImplError),
    #[error("astronaut not found")]
    AstronautNotFound,
}

#[derive(Clone)]
pub struct MissionQuerier {
    state: Arc<MemStateImpl>,
}

impl MissionQuerier {
    pub fn new(state: Arc<MemStateImpl>) -> Self {
        Self { state }
    }
}

impl MissionQuerier {
    pub async fn list_missions_for_astronaut(
        &self,
        astronaut_id: i64,
    ) -> Result<Vec<Mission>, MissionQuerierError> {
        match self
            .state
            .find_one_by_id::<AstronautDocument>("astronauts", astronaut_id)
            .await?
        {
            Some(_) => Ok(()),
            None => Err(MissionQuerierError::AstronautNotFound),
        }?;

        let missions = self
            .state
            .find_many_by_field::<MissionDocument, _>("missions", "astronaut_id", astronaut_id)
            .await?;

        Ok(missions.into_iter().map(Mission::from).collect())
    }
}
