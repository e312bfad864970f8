//! HTTP client abstraction for the styles backend.

use std::future::Future;
use std::time::Duration;

use tracing::{debug, trace, warn};

use super::error::BackendError;

/// Asynchronous HTTP operations used by the backend protocol.
///
/// Every method returns the response body on a 2xx status. Any other
/// status becomes [`BackendError::Status`] carrying the body.
pub trait AsyncHttpClient: Send + Sync {
    /// POSTs an `application/x-www-form-urlencoded` body.
    fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;

    /// POSTs an optional JSON body.
    fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;

    /// PUTs an optional JSON body.
    fn put_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;

    fn delete(
        &self,
        url: &str,
        headers: &[(&str, &str)],
    ) -> impl Future<Output = Result<Vec<u8>, BackendError>> + Send;
}

/// HTTP client implementation using reqwest.
#[derive(Clone)]
pub struct AsyncReqwestClient {
    client: reqwest::Client,
}

impl AsyncReqwestClient {
    /// Creates a client whose requests time out after `timeout_secs`.
    pub fn new(timeout_secs: u64) -> Result<Self, BackendError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| BackendError::ClientInit(e.to_string()))?;

        Ok(Self { client })
    }

    async fn send(
        &self,
        method: &'static str,
        url: &str,
        request: reqwest::RequestBuilder,
        headers: &[(&str, &str)],
    ) -> Result<Vec<u8>, BackendError> {
        let mut request = request;
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        trace!(method = method, url = url, "HTTP request starting");

        let response = request.send().await.map_err(|e| {
            warn!(
                method = method,
                url = url,
                error = %e,
                is_connect = e.is_connect(),
                is_timeout = e.is_timeout(),
                "HTTP request failed"
            );
            BackendError::Http {
                method,
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        debug!(method = method, url = url, status = status.as_u16(), "HTTP response received");

        let body = response.bytes().await.map_err(|e| BackendError::Http {
            method,
            url: url.to_string(),
            message: format!("Failed to read response: {}", e),
        })?;

        if !status.is_success() {
            warn!(method = method, url = url, status = status.as_u16(), "HTTP error status");
            return Err(BackendError::Status {
                method,
                url: url.to_string(),
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }

        Ok(body.to_vec())
    }
}

impl AsyncHttpClient for AsyncReqwestClient {
    async fn post_form(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        form: &[(&str, &str)],
    ) -> Result<Vec<u8>, BackendError> {
        let request = self.client.post(url).form(form);
        self.send("POST", url, request, headers).await
    }

    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
    ) -> Result<Vec<u8>, BackendError> {
        let mut request = self.client.post(url);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }
        self.send("POST", url, request, headers).await
    }

    async fn put_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: Option<&str>,
    ) -> Result<Vec<u8>, BackendError> {
        let mut request = self.client.put(url);
        if let Some(body) = body {
            request = request.body(body.to_string());
        }
        self.send("PUT", url, request, headers).await
    }

    async fn delete(&self, url: &str, headers: &[(&str, &str)]) -> Result<Vec<u8>, BackendError> {
        let request = self.client.delete(url);
        self.send("DELETE", url, request, headers).await
    }
}
