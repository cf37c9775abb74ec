mod extractors;
mod into_responses;

use crate::domain::astronaut_commander::AstronautCommander;
use crate::domain::astronaut_commander::AstronautCommanderError;
use crate::domain::astronaut_model::Astronaut;
use crate::domain::astronaut_model::AstronautInput;
use crate::domain::astronaut_querier::AstronautQuerier;
use crate::domain::astronaut_querier::AstronautQuerierError;
use crate::domain::auth_commander::AuthCommander;
use crate::domain::auth_commander::AuthCommanderError;
use crate::domain::mission_commander::MissionCommander;
use crate::domain::mission_commander::MissionCommanderError;
use crate::domain::mission_model::Mission;
use crate::domain::mission_model::MissionInput;
use crate::domain::mission_model::MissionUpdateInput;
use crate::domain::mission_querier::MissionQuerier;
use crate::domain::mission_querier::MissionQuerierError;
use crate::domain::token_model::AccessTokenOutput;
use crate::domain::token_model::CredentialsInput;
use crate::domain::user_model::RegisterUserInput;
use crate::domain::user_model::User;
use crate::http::extractors::CurrentUser;
use axum::extract::Path;
use axum::http::StatusCode;
use axum::routing::get;
use axum::routing::post;
use axum::routing::put;
use axum::Extension;
use axum::Form;
use axum::Json;
use axum::Router;
use serde_json::json;
use serde_json::Value;
use std::sync::Arc;

async fn read_root() -> Json<Value> {
    Json(json!({ "status": "API is running" }))
}

async fn register_user(
    Extension(auth_commander): Extension<Arc<AuthCommander>>,
    Json(input): Json<RegisterUserInput>,
) -> Result<User, AuthCommanderError> {
    auth_commander.register_user(input).await
}

async fn login_for_access_token(
    Extension(auth_commander): Extension<Arc<AuthCommander>>,
    Form(input): Form<CredentialsInput>,
) -> Result<AccessTokenOutput, AuthCommanderError> {
    auth_commander.exchange_credentials_for_token(input).await
}

async fn list_astronauts(
    CurrentUser(_user): CurrentUser,
    Extension(astronaut_querier): Extension<Arc<AstronautQuerier>>,
) -> Result<Json<Vec<Astronaut>>, AstronautQuerierError> {
    Ok(Json(astronaut_querier.list_astronauts().await?))
}

async fn get_astronaut(
    CurrentUser(_user): CurrentUser,
    Extension(astronaut_querier): Extension<Arc<AstronautQuerier>>,
    Path(id): Path<i64>,
) -> Result<Json<Astronaut>, AstronautQuerierError> {
    Ok(Json(astronaut_querier.get_astronaut_by_id(id).await?))
}

async fn create_astronaut(
    CurrentUser(_user): CurrentUser,
    Extension(astronaut_commander): Extension<Arc<AstronautCommander>>,
    Json(input): Json<AstronautInput>,
) -> Result<(StatusCode, Json<Astronaut>), AstronautCommanderError> {
    let astronaut = astronaut_commander.create_astronaut(input).await?;

    Ok((StatusCode::CREATED, Json(astronaut)))
}

async fn update_astronaut(
    CurrentUser(_user): CurrentUser,
    Extension(astronaut_commander): Extension<Arc<AstronautCommander>>,
    Path(id): Path<i64>,
    Json(input): Json<AstronautInput>,
) -> Result<Json<Astronaut>, AstronautCommanderError> {
    Ok(Json(astronaut_commander.update_astronaut(id, input).await?))
}

async fn delete_astronaut(
    CurrentUser(_user): CurrentUser,
    Extension(astronaut_commander): Extension<Arc<AstronautCommander>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AstronautCommanderError> {
    astronaut_commander.delete_astronaut(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

async fn list_missions(
    CurrentUser(_user): CurrentUser,
    Extension(mission_querier): Extension<Arc<MissionQuerier>>,
    Path(astronaut_id): Path<i64>,
) -> Result<Json<Vec<Mission>>, MissionQuerierError> {
    Ok(Json(
        mission_querier
            .list_missions_for_astronaut(astronaut_id)
            .await?,
    ))
}

async fn create_mission(
    CurrentUser(_user): CurrentUser,
    Extension(mission_commander): Extension<Arc<MissionCommander>>,
    Path(astronaut_id): Path<i64>,
    Json(input): Json<MissionInput>,
) -> Result<(StatusCode, Json<Mission>), MissionCommanderError> {
    let mission = mission_commander
        .create_mission_for_astronaut(astronaut_id, input)
        .await?;

    Ok((StatusCode::CREATED, Json(mission)))
}

async fn update_mission(
    CurrentUser(_user): CurrentUser,
    Extension(mission_commander): Extension<Arc<MissionCommander>>,
    Path(id): Path<i64>,
    Json(input): Json<MissionUpdateInput>,
) -> Result<Json<Mission>, MissionCommanderError> {
    Ok(Json(mission_commander.update_mission(id, input).await?))
}

async fn delete_mission(
    CurrentUser(_user): CurrentUser,
    Extension(mission_commander): Extension<Arc<MissionCommander>>,
    Path(id): Path<i64>,
) -> Result<StatusCode, MissionCommanderError> {
    mission_commander.delete_mission(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub fn mission_control_route(
    auth_commander: Arc<AuthCommander>,
    astronaut_commander: Arc<AstronautCommander>,
    astronaut_querier: Arc<AstronautQuerier>,
    mission_commander: Arc<MissionCommander>,
    mission_querier: Arc<MissionQuerier>,
) -> Router {
    Router::new()
        .route("/", get(read_root))
        .route("/register/", post(register_user))
        .route("/token", post(login_for_access_token))
        .route("/astronauts/", get(list_astronauts).post(create_astronaut))
        .route(
            "/astronauts/:id",
            get(get_astronaut)
                .put(update_astronaut)
                .delete(delete_astronaut),
        )
        .route(
            "/astronauts/:id/missions/",
            get(list_missions).post(create_mission),
        )
        .route("/missions/:id", put(update_mission).delete(delete_mission))
        .layer(Extension(auth_commander))
        .layer(Extension(astronaut_commander))
        .layer(Extension(astronaut_querier))
        .layer(Extension(mission_commander))
        .layer(Extension(mission_querier))
}
