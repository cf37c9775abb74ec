pub mod config;
mod domain;
mod http;
mod providers;

use crate::config::Settings;
use crate::domain::astronaut_commander::AstronautCommander;
use crate::domain::astronaut_querier::AstronautQuerier;
use crate::domain::auth_commander::AuthCommander;
use crate::domain::mission_commander::MissionCommander;
use crate::domain::mission_querier::MissionQuerier;
use crate::http::mission_control_route;
use crate::providers::state::MemStateImpl;
use crate::providers::token::JwtTokenImpl;
use axum::http::HeaderValue;
use axum::Router;
use axum::Server;
use log::info;
use log::warn;
use std::net::TcpListener;
use std::sync::Arc;
use thiserror::Error;
use tower_http::cors::AllowOrigin;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

#[derive(Debug, Error)]
pub enum ServeError {
    #[error(transparent)]
    IoError(#[from] std::io::Error),
    #[error(transparent)]
    HyperError(#[from] hyper::Error),
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("ignoring invalid cors origin {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Builds the full router over a fresh in-memory state.
pub fn app(settings: &Settings) -> Router {
    let state_impl = Arc::new(MemStateImpl::new());
    let token_impl = Arc::new(JwtTokenImpl::new(
        &settings.secret_key,
        settings.access_token_expire_minutes * 60,
    ));

    let auth_commander = Arc::new(AuthCommander::new(state_impl.clone(), token_impl.clone()));
    let astronaut_commander = Arc::new(AstronautCommander::new(state_impl.clone()));
    let astronaut_querier = Arc::new(AstronautQuerier::new(state_impl.clone()));
    let mission_commander = Arc::new(MissionCommander::new(state_impl.clone()));
    let mission_querier = Arc::new(MissionQuerier::new(state_impl.clone()));

    mission_control_route(
        auth_commander,
        astronaut_commander,
        astronaut_querier,
        mission_commander,
        mission_querier,
    )
    .layer(cors_layer(&settings.cors_origins))
}

/// Serves the api on an already bound listener until the server fails.
pub async fn serve(listener: TcpListener, settings: Settings) -> Result<(), ServeError> {
    listener.set_nonblocking(true)?;
    info!("mission control api listening on {}", listener.local_addr()?);

    Server::from_tcp(listener)?
        .serve(app(&settings).into_make_service())
        .await?;

    Ok(())
}
