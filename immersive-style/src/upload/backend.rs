//! Styles-editor backend API.

use std::fmt;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};
use tracing::{debug, info};

use super::credentials::Credentials;
use super::error::BackendError;
use super::http::AsyncHttpClient;
use crate::style::AssetGroup;

/// OAuth endpoint of the production auth service.
pub const DEFAULT_AUTH_URL: &str = "https://api.auth.2gis.com/2.1";

/// Root of the production styles-editor API.
pub const DEFAULT_STYLES_URL: &str = "https://styles-editor.api.2gis.com";

/// OAuth client id used for the password grant.
pub const DEFAULT_CLIENT_ID: &str = "online";

const TOKEN_HEADER: &str = "x-token-auth";
const SESSION_HEADER: &str = "X-Editorsession-Id";
const CONTENT_TYPE: (&str, &str) = ("Content-Type", "application/json");

/// Where and how to reach the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    pub auth_url: String,
    pub styles_url: String,
    pub client_id: String,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            auth_url: DEFAULT_AUTH_URL.to_string(),
            styles_url: DEFAULT_STYLES_URL.to_string(),
            client_id: DEFAULT_CLIENT_ID.to_string(),
            timeout_secs: 60,
        }
    }
}

/// Access token returned by the password grant.
#[derive(Clone, PartialEq, Eq)]
pub struct AuthToken(String);

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

/// Edit session id issued by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Typed calls against the styles backend.
pub struct StylesBackend<C> {
    client: C,
    config: BackendConfig,
}

impl<C: AsyncHttpClient> StylesBackend<C> {
    pub fn new(client: C, config: BackendConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Exchanges credentials for an access token.
    pub async fn authenticate(&self, credentials: &Credentials) -> Result<AuthToken, BackendError> {
        let url = format!("{}/oauth/token", self.config.auth_url);
        let form = [
            ("grant_type", "password"),
            ("client_id", self.config.client_id.as_str()),
            ("username", credentials.username.as_str()),
            ("password", credentials.password.as_str()),
        ];

        let body = self
            .client
            .post_form(&url, &[("Accept", "application/json")], &form)
            .await?;
        let response = parse_json("authenticate", &body)?;

        match response.get("access_token").and_then(Value::as_str) {
            Some(token) if !token.is_empty() => Ok(AuthToken::new(token)),
            _ => Err(BackendError::Auth {
                response: serde_json::to_string_pretty(&response)
                    .unwrap_or_else(|_| response.to_string()),
            }),
        }
    }

    /// Opens an edit session on `project`.
    pub async fn open_session(
        &self,
        project: &str,
        token: &AuthToken,
    ) -> Result<SessionId, BackendError> {
        let url = self.session_url(project);
        let body = self
            .client
            .put_json(&url, &headers(token, None), None)
            .await?;

        let response = parse_json("open edit session", &body)?;
        match response.pointer("/result/id") {
            Some(Value::String(id)) if !id.is_empty() => Ok(SessionId::new(id.as_str())),
            Some(Value::Number(id)) => Ok(SessionId::new(id.to_string())),
            _ => Err(protocol_error("open edit session", "result.id", &body)),
        }
    }

    /// Uploads an asset draft and returns the filename the backend assigned.
    pub async fn post_asset(
        &self,
        project: &str,
        token: &AuthToken,
        session: &SessionId,
        group: AssetGroup,
        name: &str,
        bytes: &[u8],
    ) -> Result<String, BackendError> {
        let url = format!(
            "{}/projects/{}/{}/draft",
            self.config.styles_url,
            project,
            group.api_name()
        );
        let payload = json!({
            "id": name,
            "sourceCode": STANDARD.encode(bytes),
        });

        let body = self
            .client
            .post_json(&url, &headers(token, Some(session)), Some(&payload.to_string()))
            .await?;

        let response = parse_json("upload asset", &body)?;
        let filename = response
            .pointer("/result/filename")
            .and_then(Value::as_str)
            .ok_or_else(|| protocol_error("upload asset", "result.filename", &body))?;

        info!("[{}] {}={}", group, name, filename);
        Ok(filename.to_string())
    }

    /// Replaces the project's draft with `style`.
    pub async fn update_style(
        &self,
        project: &str,
        token: &AuthToken,
        session: &SessionId,
        style: Value,
    ) -> Result<(), BackendError> {
        let url = format!("{}/projects/{}/draft", self.config.styles_url, project);
        let payload = json!({ "config": style });

        let body = self
            .client
            .put_json(&url, &headers(token, Some(session)), Some(&payload.to_string()))
            .await?;
        debug!(response = %String::from_utf8_lossy(&body), "Draft updated");
        Ok(())
    }

    /// Promotes the draft to the published style.
    pub async fn publish_style(
        &self,
        project: &str,
        token: &AuthToken,
        session: &SessionId,
    ) -> Result<(), BackendError> {
        let url = format!("{}/projects/{}/sync-with-draft", self.config.styles_url, project);

        let body = self
            .client
            .post_json(&url, &headers(token, Some(session)), None)
            .await?;
        debug!(response = %String::from_utf8_lossy(&body), "Draft published");
        Ok(())
    }

    /// Releases an edit session.
    pub async fn close_session(
        &self,
        project: &str,
        session: &SessionId,
        token: &AuthToken,
    ) -> Result<(), BackendError> {
        let url = self.session_url(project);
        self.client
            .delete(&url, &headers(token, Some(session)))
            .await?;
        Ok(())
    }

    fn session_url(&self, project: &str) -> String {
        format!("{}/projects/{}/editorsession", self.config.styles_url, project)
    }
}

fn headers<'a>(token: &'a AuthToken, session: Option<&'a SessionId>) -> Vec<(&'static str, &'a str)> {
    let mut headers = vec![(TOKEN_HEADER, token.as_str()), CONTENT_TYPE];
    if let Some(session) = session {
        headers.push((SESSION_HEADER, session.as_str()));
    }
    headers
}

fn parse_json(operation: &'static str, body: &[u8]) -> Result<Value, BackendError> {
    serde_json::from_slice(body).map_err(|source| BackendError::Json { operation, source })
}

fn protocol_error(operation: &'static str, field: &'static str, body: &[u8]) -> BackendError {
    BackendError::Protocol {
        operation,
        field,
        body: String::from_utf8_lossy(body).into_owned(),
    }
}
