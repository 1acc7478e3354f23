//! `reqwest`-backed gateway with one timeout policy and consistent error
//! mapping. Bodies are JSON with `Content-Type: application/json`.

use super::{
    wire::{WireUser, WireUserPayload},
    RemoteGateway, USERS_PATH,
};
use crate::{
    config::GatewayConfig,
    error::GatewayError,
    record::{RemoteUser, UserDraft},
    APP_USER_AGENT,
};
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

/// Maximum number of error body characters surfaced to the user.
const MAX_ERROR_CHARS: usize = 200;

#[derive(Clone, Debug)]
pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    /// Build a gateway for the configured base URL.
    ///
    /// # Errors
    /// Returns `GatewayError::Config` if the HTTP client cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(APP_USER_AGENT)
            .timeout(config.timeout)
            .build()
            .map_err(|err| GatewayError::Config(format!("Failed to build HTTP client: {err}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.to_string(),
        })
    }

    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        build_url_with_base(&self.base_url, path)
    }

    async fn send_json(
        &self,
        method: Method,
        path: &str,
        draft: &UserDraft,
    ) -> Result<RemoteUser, GatewayError> {
        let payload = serde_json::to_string(&WireUserPayload::from(draft))
            .map_err(|err| GatewayError::Serialization(format!("Failed to encode request: {err}")))?;

        let response = self
            .client
            .request(method, self.url(path))
            .header("Content-Type", "application/json")
            .body(payload)
            .send()
            .await
            .map_err(map_request_error)?;

        let wire: WireUser = handle_json_response(response).await?;
        Ok(wire.into())
    }
}

impl RemoteGateway for HttpGateway {
    #[instrument(skip(self), fields(base_url = %self.base_url))]
    async fn list(&self) -> Result<Vec<RemoteUser>, GatewayError> {
        let response = self
            .client
            .get(self.url(USERS_PATH))
            .send()
            .await
            .map_err(map_request_error)?;

        let users: Vec<WireUser> = handle_json_response(response).await?;
        debug!("listed {} users", users.len());

        Ok(users.into_iter().map(RemoteUser::from).collect())
    }

    #[instrument(skip(self, draft))]
    async fn create(&self, draft: &UserDraft) -> Result<RemoteUser, GatewayError> {
        let user = self.send_json(Method::POST, USERS_PATH, draft).await?;
        debug!("create echoed id {:?}", user.id);
        Ok(user)
    }

    #[instrument(skip(self, draft))]
    async fn update(&self, id: u64, draft: &UserDraft) -> Result<RemoteUser, GatewayError> {
        let user = self
            .send_json(Method::PUT, &format!("{USERS_PATH}/{id}"), draft)
            .await?;

        if user.id.is_some_and(|echoed| echoed != id) {
            warn!("update of user {id} echoed id {:?}", user.id);
        }

        Ok(user)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: u64) -> Result<(), GatewayError> {
        let response = self
            .client
            .delete(self.url(&format!("{USERS_PATH}/{id}")))
            .send()
            .await
            .map_err(map_request_error)?;

        handle_empty_response(response).await
    }
}

/// Builds a URL from an explicit base URL and the provided path.
fn build_url_with_base(base_url: &str, path: &str) -> String {
    let base = base_url.trim().trim_end_matches('/');
    let path = path.trim();

    if base.is_empty() {
        path.to_string()
    } else {
        format!("{}/{}", base, path.trim_start_matches('/'))
    }
}

/// Maps transport errors into `GatewayError` variants with timeout detection.
fn map_request_error(err: reqwest::Error) -> GatewayError {
    if err.is_timeout() {
        GatewayError::Timeout("Request timed out. Please try again.".to_string())
    } else {
        GatewayError::Network(format!("Unable to reach the server: {err}"))
    }
}

/// Parses JSON responses and surfaces HTTP errors with sanitized bodies.
async fn handle_json_response<T: DeserializeOwned>(response: Response) -> Result<T, GatewayError> {
    let status = response.status();
    let body = response.text().await.map_err(map_request_error)?;

    if status.is_success() {
        serde_json::from_str(&body)
            .map_err(|err| GatewayError::Parse(format!("Failed to decode response: {err}")))
    } else {
        Err(GatewayError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Success is inferred from the status; the body is ignored.
async fn handle_empty_response(response: Response) -> Result<(), GatewayError> {
    let status = response.status();
    if status.is_success() {
        Ok(())
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(GatewayError::Http {
            status: status.as_u16(),
            message: sanitize_body(&body),
        })
    }
}

/// Trims and truncates error bodies for user-facing messages.
fn sanitize_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Request failed.".to_string()
    } else {
        trimmed.chars().take(MAX_ERROR_CHARS).collect()
    }
}
