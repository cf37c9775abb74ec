use crate::domain::auth_commander::AuthCommander;
use crate::domain::user_model::User;
use crate::http::into_responses::unauthorized;
use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::headers::authorization::Bearer;
use axum::headers::Authorization;
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::Extension;
use axum::Json;
use axum::RequestPartsExt;
use axum::TypedHeader;
use serde_json::json;
use std::sync::Arc;

/// The user owning the bearer token of the request.
pub(super) struct CurrentUser(pub User);

#[async_trait]
impl<S> FromRequestParts<S> for CurrentUser
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let auth_commander = parts
            .extract::<Extension<Arc<AuthCommander>>>()
            .await
            .map_err(|rej| {
                log::error!("Expected to extract AuthCommander: {}", rej);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"detail": "Internal server error"})),
                )
                    .into_response()
            })?;

        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| unauthorized("Not authenticated"))?;

        let user = auth_commander
            .authenticate(bearer.token())
            .await
            .map_err(IntoResponse::into_response)?;

        Ok(CurrentUser(user))
    }
}
