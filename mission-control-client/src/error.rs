use crate::providers::api::ApiClientError;
use crate::providers::session::SessionImplError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MissionControlError {
    #[error("{0}")]
    Validation(String),
    #[error("not authenticated, log in again")]
    Unauthorized,
    #[error("could not fetch astronauts: {detail}")]
    FetchFailed { status: u16, detail: String },
    #[error("{detail}")]
    Rejected { status: u16, detail: String },
    #[error(transparent)]
    Network(reqwest::Error),
    #[error(transparent)]
    Decode(serde_json::Error),
    #[error(transparent)]
    Session(#[from] SessionImplError),
    #[error("another operation is already in progress")]
    OperationInProgress,
    #[error("could not use the terminal: {0}")]
    Terminal(std::io::Error),
}

impl From<ApiClientError> for MissionControlError {
    fn from(err: ApiClientError) -> Self {
        match err {
            ApiClientError::TransportError(err) => Self::Network(err),
            ApiClientError::JsonSerializerImplError(err) => Self::Decode(err),
            ApiClientError::Rejected { status, detail } => Self::Rejected { status, detail },
        }
    }
}
