use crate::domain::astronaut_commander::AstronautCommanderError;
use crate::domain::astronaut_querier::AstronautQuerierError;
use crate::domain::auth_commander::AuthCommanderError;
use crate::domain::mission_commander::MissionCommanderError;
use crate::domain::mission_querier::MissionQuerierError;
use crate::domain::token_model::AccessTokenOutput;
use crate::domain::user_model::User;
use axum::http::header::WWW_AUTHENTICATE;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Json;
use log::error;
use serde_json::json;

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

pub(super) fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        [(WWW_AUTHENTICATE, "Bearer")],
        Json(json!({ "detail": message })),
    )
        .into_response()
}

fn internal(err: &dyn std::error::Error) -> Response {
    error!("internal error: {}", err);
    detail(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

impl IntoResponse for AuthCommanderError {
    fn into_response(self) -> Response {
        match self {
            AuthCommanderError::EmailAlreadyRegistered => {
                detail(StatusCode::BAD_REQUEST, "Email already registered")
            }
            AuthCommanderError::BadCredentials => unauthorized("Incorrect username or password"),
            AuthCommanderError::InvalidToken => unauthorized("Could not validate credentials"),
            err => internal(&err),
        }
    }
}

impl IntoResponse for AstronautCommanderError {
    fn into_response(self) -> Response {
        match self {
            AstronautCommanderError::AstronautNotFound => {
                detail(StatusCode::NOT_FOUND, "Astronaut not found")
            }
            AstronautCommanderError::AstronautWithEmailExists => {
                detail(StatusCode::BAD_REQUEST, "Email already registered")
            }
            err => internal(&err),
        }
    }
}

impl IntoResponse for AstronautQuerierError {
    fn into_response(self) -> Response {
        match self {
            AstronautQuerierError::AstronautNotFound => {
                detail(StatusCode::NOT_FOUND, "Astronaut not found")
            }
            err => internal(&err),
        }
    }
}

impl IntoResponse for MissionCommanderError {
    fn into_response(self) -> Response {
        match self {
            MissionCommanderError::AstronautNotFound => {
                detail(StatusCode::NOT_FOUND, "Astronaut not found")
            }
            MissionCommanderError::MissionNotFound => {
                detail(StatusCode::NOT_FOUND, "Mission not found")
            }
            err => internal(&err),
        }
    }
}

impl IntoResponse for MissionQuerierError {
    fn into_response(self) -> Response {
        match self {
            MissionQuerierError::AstronautNotFound => {
                detail(StatusCode::NOT_FOUND, "Astronaut not found")
            }
            err => internal(&err),
        }
    }
}

impl IntoResponse for User {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(json!(self))).into_response()
    }
}

impl IntoResponse for AccessTokenOutput {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(json!(self))).into_response()
    }
}
