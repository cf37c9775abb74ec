use crate::providers::session::SessionStoreImpl;
use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;

/// Message used when a rejected response carries no usable `detail`.
pub const GENERIC_FAILURE_DETAIL: &str = "The operation failed.";

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error(transparent)]
    TransportError(#[from] reqwest::Error),
    #[error(transparent)]
    JsonSerializerImplError(#[from] serde_json::Error),
    #[error("{detail} (status {status})")]
    Rejected { status: u16, detail: String },
}

impl ApiClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(
            self,
            ApiClientError::Rejected { status, .. }
                if *status == StatusCode::UNAUTHORIZED.as_u16()
        )
    }
}

/// Whether a request carries the session's bearer token.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Access {
    Public,
    Bearer,
}

pub enum Payload<'a> {
    Empty,
    Json(Value),
    Form(&'a [(&'a str, &'a str)]),
}

pub struct ApiClientImpl {
    base_url: String,
    client: Client,
    session: Arc<SessionStoreImpl>,
}

impl ApiClientImpl {
    pub fn new(base_url: &str, session: Arc<SessionStoreImpl>) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: Client::new(),
            session,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl ApiClientImpl {
    /// Sends one request and returns its parsed json body, or `Value::Null`
    /// when the body is empty. Any status outside 2xx is `Rejected`.
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        access: Access,
        payload: Payload<'_>,
    ) -> Result<Value, ApiClientError> {
        let mut req = self.client.request(method.clone(), self.url(path));

        if access == Access::Bearer {
            if let Some(token) = self.session.get_token() {
                req = req.bearer_auth(token);
            }
        }

        req = match payload {
            Payload::Empty => req,
            Payload::Json(body) => req.json(&body),
            Payload::Form(fields) => req.form(fields),
        };

        log::debug!("{} {}", method, path);

        let res = req.send().await?;
        let status = res.status();
        let bytes = res.bytes().await?;

        if !status.is_success() {
            let detail = rejection_detail(&bytes);
            log::debug!("{} {} rejected with {}: {}", method, path, status, detail);
            return Err(ApiClientError::Rejected {
                status: status.as_u16(),
                detail,
            });
        }

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_slice(&bytes)?)
    }
}

impl ApiClientImpl {
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiClientError> {
        let value = self
            .request(Method::GET, path, Access::Bearer, Payload::Empty)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        access: Access,
        body: &B,
    ) -> Result<T, ApiClientError> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let value = self.request(Method::POST, path, access, payload).await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn put_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiClientError> {
        let payload = Payload::Json(serde_json::to_value(body)?);
        let value = self
            .request(Method::PUT, path, Access::Bearer, payload)
            .await?;
        Ok(serde_json::from_value(value)?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiClientError> {
        self.request(Method::DELETE, path, Access::Bearer, Payload::Empty)
            .await?;
        Ok(())
    }

    pub async fn post_form<T: DeserializeOwned>(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<T, ApiClientError> {
        let value = self
            .request(Method::POST, path, Access::Public, Payload::Form(fields))
            .await?;
        Ok(serde_json::from_value(value)?)
    }
}

/// Pulls a human readable message out of an error body. `detail` may be a
/// plain string or a list of validation errors carrying a `msg` each.
pub(crate) fn rejection_detail(body: &[u8]) -> String {
    let detail = match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(mut fields)) => fields.remove("detail"),
        _ => None,
    };

    match detail {
        Some(Value::String(message)) if !message.trim().is_empty() => message,
        Some(Value::Array(items)) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            if messages.is_empty() {
                GENERIC_FAILURE_DETAIL.to_string()
            } else {
                messages.join("; ")
            }
        }
        _ => GENERIC_FAILURE_DETAIL.to_string(),
    }
}
