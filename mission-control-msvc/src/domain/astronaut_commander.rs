use crate::domain::astronaut_model::Astronaut;
use crate::domain::astronaut_model::AstronautDocument;
use crate::domain::astronaut_model::AstronautInput;
use crate::domain::astronaut_model::NewAstronautDocument;
use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionDocument;
use crate::providers::state::MemStateImpl;
use crate::providers::state::StateImplError;
use log::info;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AstronautCommanderError {
    #[error(transparent)]
    StateImplError(StateImplError),
    #[error("astronaut not found")]
    AstronautNotFound,
    #[error("email already registered")]
    AstronautWithEmailExists,
}

impl From<StateImplError> for AstronautCommanderError {
    fn from(err: StateImplError) -> Self {
        match err {
            StateImplError::DuplicateKey(_) => Self::AstronautWithEmailExists,
            err => Self::StateImplError(err),
        }
    }
}

#[derive(Clone)]
pub struct AstronautCommander {
    state: Arc<MemStateImpl>,
}

impl AstronautCommander {
    pub fn new(state: Arc<MemStateImpl>) -> Self {
        Self { state }
    }
}

impl AstronautCommander {
    pub async fn create_astronaut(
        &self,
        input: AstronautInput,
    ) -> Result<Astronaut, AstronautCommanderError> {
        info!("creating astronaut {}", input.email);

        let document = self
            .state
            .insert_one::<_, AstronautDocument>(
                "astronauts",
                &NewAstronautDocument::from(&input),
                &["email"],
            )
            .await?;

        info!("astronaut created with id {}", document.id);

        Ok(Astronaut::from_document(document, Vec::new()))
    }
}

impl AstronautCommander {
    pub async fn update_astronaut(
        &self,
        id: i64,
        input: AstronautInput,
    ) -> Result<Astronaut, AstronautCommanderError> {
        info!("updating astronaut with id {}", id);

        let document = match self
            .state
            .update_one::<_, AstronautDocument>(
                "astronauts",
                id,
                &NewAstronautDocument::from(&input),
                &["email"],
            )
            .await?
        {
            Some(document) => Ok(document),
            None => Err(AstronautCommanderError::AstronautNotFound),
        }?;

        let missions = self
            .state
            .find_many_by_field::<MissionDocument, _>("missions", "astronaut_id", id)
            .await?
            .into_iter()
            .map(Mission::from)
            .collect();

        info!("astronaut updated with id {}", id);

        Ok(Astronaut::from_document(document, missions))
    }
}

impl AstronautCommander {
    /// Removes the astronaut together with every mission it owns.
    pub async fn delete_astronaut(&self, id: i64) -> Result<(), AstronautCommanderError> {
        info!("deleting astronaut with id {}", id);

        if !self.state.delete_one("astronauts", id).await {
            return Err(AstronautCommanderError::AstronautNotFound);
        }

        let removed = self
            .state
            .delete_many_by_field("missions", "astronaut_id", id)
            .await?;

        info!("astronaut deleted with id {} along with {} missions", id, removed);

        Ok(())
    }
}
