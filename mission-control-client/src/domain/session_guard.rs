use crate::error::MissionControlError;
use crate::providers::api::ApiClientError;
use crate::providers::session::SessionStoreImpl;
use log::error;
use log::warn;

/// Authenticated calls are not issued at all without a stored token.
pub(crate) fn require_session(session: &SessionStoreImpl) -> Result<(), MissionControlError> {
    if session.is_authenticated() {
        Ok(())
    } else {
        Err(MissionControlError::Unauthorized)
    }
}

/// Maps an api failure, dropping the session when the server answered 401.
pub(crate) fn invalidate_on_unauthorized(
    session: &SessionStoreImpl,
    err: ApiClientError,
) -> MissionControlError {
    if !err.is_unauthorized() {
        return MissionControlError::from(err);
    }

    warn!("session rejected by the server, clearing stored token");
    if let Err(err) = session.clear() {
        error!("could not clear the session file: {}", err);
    }

    MissionControlError::Unauthorized
}

/// Trimmed value of a required text field.
pub(crate) fn required<'a>(value: &'a str, message: &str) -> Result<&'a str, MissionControlError> {
    let value = value.trim();
    if value.is_empty() {
        Err(MissionControlError::Validation(message.to_string()))
    } else {
        Ok(value)
    }
}
