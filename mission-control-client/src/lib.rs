pub mod config;
pub mod domain;
pub mod error;
pub mod providers;

use crate::config::Config;
use crate::domain::astronaut_controller::AstronautController;
use crate::domain::auth_controller::AuthController;
use crate::domain::mission_controller::MissionController;
use crate::error::MissionControlError;
use crate::providers::api::ApiClientImpl;
use crate::providers::session::SessionStoreImpl;
use std::sync::Arc;

/// The controllers of one admin session, sharing a single api client and
/// session store.
pub struct MissionControl {
    pub auth: AuthController,
    pub astronauts: AstronautController,
    pub missions: MissionController,
    session: Arc<SessionStoreImpl>,
}

impl MissionControl {
    pub fn new(api_url: &str, session: SessionStoreImpl) -> Self {
        let session = Arc::new(session);
        let api = Arc::new(ApiClientImpl::new(api_url, session.clone()));

        Self {
            auth: AuthController::new(api.clone(), session.clone()),
            astronauts: AstronautController::new(api.clone(), session.clone()),
            missions: MissionController::new(api, session.clone()),
            session,
        }
    }

    pub fn from_config(config: &Config) -> Result<Self, MissionControlError> {
        let session = match &config.session_file {
            Some(path) => SessionStoreImpl::open(path)?,
            None => SessionStoreImpl::in_memory(),
        };

        Ok(Self::new(&config.api_url, session))
    }

    pub fn session(&self) -> &SessionStoreImpl {
        &self.session
    }
}
