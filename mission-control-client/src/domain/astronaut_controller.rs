use crate::domain::astronaut_model::Astronaut;
use crate::domain::astronaut_model::AstronautInput;
use crate::domain::session_guard::invalidate_on_unauthorized;
use crate::domain::session_guard::require_session;
use crate::domain::session_guard::required;
use crate::error::MissionControlError;
use crate::providers::api::Access;
use crate::providers::api::ApiClientError;
use crate::providers::api::ApiClientImpl;
use crate::providers::session::SessionStoreImpl;
use log::info;
use std::sync::Arc;
use std::sync::RwLock;
use tokio::sync::Mutex;

const ASTRONAUT_FIELDS_REQUIRED: &str = "name and email are required";

#[derive(Default)]
struct AstronautCache {
    astronauts: Vec<Astronaut>,
    stale: bool,
}

/// Owns the fetched astronaut collection and its create/update/delete calls.
///
/// The collection is a plain cache of server state. It is only ever replaced
/// as a whole by [`AstronautController::list`]; the mutating calls never patch
/// it and instead mark it stale, so callers refresh with `list()` after each
/// successful mutation.
pub struct AstronautController {
    api: Arc<ApiClientImpl>,
    session: Arc<SessionStoreImpl>,
    cache: RwLock<AstronautCache>,
    in_flight: Mutex<()>,
}

impl AstronautController {
    pub fn new(api: Arc<ApiClientImpl>, session: Arc<SessionStoreImpl>) -> Self {
        Self {
            api,
            session,
            cache: RwLock::new(AstronautCache::default()),
            in_flight: Mutex::new(()),
        }
    }
}

impl AstronautController {
    /// Astronauts held since the last successful `list()`.
    pub fn astronauts(&self) -> Vec<Astronaut> {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .astronauts
            .clone()
    }

    /// Whether a mutation succeeded after the last successful `list()`.
    pub fn is_stale(&self) -> bool {
        self.cache
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .stale
    }

    fn mark_stale(&self) {
        self.cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .stale = true;
    }

    fn replace(&self, astronauts: Vec<Astronaut>) {
        let mut cache = self
            .cache
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        cache.astronauts = astronauts;
        cache.stale = false;
    }
}

impl AstronautController {
    /// Fetches the whole collection in server order and replaces the cache.
    pub async fn list(&self) -> Result<Vec<Astronaut>, MissionControlError> {
        require_session(&self.session)?;

        let astronauts = match self.api.get::<Vec<Astronaut>>("/astronauts/").await {
            Ok(astronauts) => Ok(astronauts),
            Err(ApiClientError::Rejected { status, detail }) if status != 401 => {
                Err(MissionControlError::FetchFailed { status, detail })
            }
            Err(err) => Err(invalidate_on_unauthorized(&self.session, err)),
        }?;

        self.replace(astronauts.clone());

        Ok(astronauts)
    }
}

impl AstronautController {
    /// Fetches one astronaut with its missions. Leaves the cache untouched.
    pub async fn get(&self, id: i64) -> Result<Astronaut, MissionControlError> {
        require_session(&self.session)?;

        self.api
            .get::<Astronaut>(&format!("/astronauts/{}", id))
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))
    }
}

impl AstronautController {
    /// Creates an astronaut. The cache is not refreshed: call `list()`.
    pub async fn create(&self, name: &str, email: &str) -> Result<Astronaut, MissionControlError> {
        let input = AstronautInput {
            name: required(name, ASTRONAUT_FIELDS_REQUIRED)?.to_string(),
            email: required(email, ASTRONAUT_FIELDS_REQUIRED)?.to_string(),
        };
        require_session(&self.session)?;
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| MissionControlError::OperationInProgress)?;

        let astronaut = self
            .api
            .post_json::<_, Astronaut>("/astronauts/", Access::Bearer, &input)
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))?;

        self.mark_stale();
        info!("astronaut created with id {}", astronaut.id);

        Ok(astronaut)
    }
}

impl AstronautController {
    /// Replaces name and email of an astronaut. The cache is not refreshed:
    /// call `list()`.
    pub async fn update(
        &self,
        id: i64,
        name: &str,
        email: &str,
    ) -> Result<Astronaut, MissionControlError> {
        let input = AstronautInput {
            name: required(name, ASTRONAUT_FIELDS_REQUIRED)?.to_string(),
            email: required(email, ASTRONAUT_FIELDS_REQUIRED)?.to_string(),
        };
        require_session(&self.session)?;
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| MissionControlError::OperationInProgress)?;

        let astronaut = self
            .api
            .put_json::<_, Astronaut>(&format!("/astronauts/{}", id), &input)
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))?;

        self.mark_stale();
        info!("astronaut updated with id {}", id);

        Ok(astronaut)
    }
}

impl AstronautController {
    /// Deletes an astronaut and its missions. There is no undo, so callers
    /// confirm with the user first. The cache is not refreshed: call `list()`.
    pub async fn delete(&self, id: i64) -> Result<(), MissionControlError> {
        require_session(&self.session)?;
        let _guard = self
            .in_flight
            .try_lock()
            .map_err(|_| MissionControlError::OperationInProgress)?;

        self.api
            .delete(&format!("/astronauts/{}", id))
            .await
            .map_err(|err| invalidate_on_unauthorized(&self.session, err))?;

        self.mark_stale();
        info!("astronaut deleted with id {}", id);

        Ok(())
    }
}
