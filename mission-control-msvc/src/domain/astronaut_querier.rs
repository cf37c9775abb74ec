use crate::domain::astronaut_model::Astronaut;
use crate::domain::astronaut_model::AstronautDocument;
use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionDocument;
use crate::providers::state::MemStateImpl;
use crate::providers::state::StateImplError;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AstronautQuerierError {
    #[error(transparent)]
    StateImplError(#[from] StateImplError),
    #[error("astronaut not found")]
    AstronautNotFound,
}

#[derive(Clone)]
pub struct AstronautQuerier {
    state: Arc<MemStateImpl>,
}

impl AstronautQuerier {
    pub fn new(state: Arc<MemStateImpl>) -> Self {
        Self { state }
    }
}

impl AstronautQuerier {
    /// Every astronaut in id order, each with its missions.
    pub async fn list_astronauts(&self) -> Result<Vec<Astronaut>, AstronautQuerierError> {
        let documents = self
            .state
            .find_all::<AstronautDocument>("astronauts")
            .await?;

        let mut missions_by_astronaut: HashMap<i64, Vec<Mission>> = HashMap::new();
        for mission in self.state.find_all::<MissionDocument>("missions").await? {
            missions_by_astronaut
                .entry(mission.astronaut_id)
                .or_default()
                .push(Mission::from(mission));
        }

        Ok(documents
            .into_iter()
            .map(|document| {
                let missions = missions_by_astronaut
                    .remove(&document.id)
                    .unwrap_or_default();
                Astronaut::from_document(document, missions)
            })
            .collect())
    }
}

impl AstronautQuerier {
    pub async fn get_astronaut_by_id(&self, id: i64) -> Result<Astronaut, AstronautQuerierError> {
        let document = match self
            .state
            .find_one_by_id::<AstronautDocument>("astronauts", id)
            .await?
        {
            Some(document) => Ok(document),
            None => Err(AstronautQuerierError::AstronautNotFound),
        }?;

        let missions = self
            .state
            .find_many_by_field::<MissionDocument, _>("missions", "astronaut_id", id)
            .await?
            .into_iter()
            .map(Mission::from)
            .collect();

        Ok(Astronaut::from_document(document, missions))
    }
}
