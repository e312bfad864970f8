//! Upload error types.

use thiserror::Error;

use super::credentials::CredentialsError;
use super::stage::UploadStage;
use crate::assets::AssetError;
use crate::style::StyleError;

/// Errors from a single backend call.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP client could not be created. No request was made.
    #[error("Failed to create HTTP client: {0}")]
    ClientInit(String),

    /// The request could not be sent or its response could not be read.
    #[error("{method} {url} failed: {message}")]
    Http {
        method: &'static str,
        url: String,
        message: String,
    },

    /// The backend answered with a non-success status.
    #[error("HTTP {status} from {method} {url}: {body}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },

    /// The token endpoint did not return an access token.
    #[error("Getting auth token failed:\n{response}")]
    Auth { response: String },

    /// A response lacked a field the protocol requires.
    #[error("Failed to {operation}: missing {field} in response {body}")]
    Protocol {
        operation: &'static str,
        field: &'static str,
        body: String,
    },

    /// A response body was not JSON.
    #[error("Failed to {operation}: invalid JSON response: {source}")]
    Json {
        operation: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Errors from an upload run.
#[derive(Debug, Error)]
pub enum UploadError {
    #[error(transparent)]
    Credentials(#[from] CredentialsError),

    #[error(transparent)]
    Style(#[from] StyleError),

    #[error(transparent)]
    Asset(#[from] AssetError),

    /// A backend call failed.
    #[error("Upload failed while {stage}: {source}")]
    Backend {
        stage: UploadStage,
        #[source]
        source: BackendError,
    },
}

impl UploadError {
    /// Stage a backend failure happened in.
    pub fn stage(&self) -> Option<UploadStage> {
        match self {
            UploadError::Backend { stage, .. } => Some(*stage),
            _ => None,
        }
    }
}

/// Attributes a backend failure to an upload stage.
pub(super) trait AtStage<T> {
    fn at(self, stage: UploadStage) -> Result<T, UploadError>;
}

impl<T> AtStage<T> for Result<T, BackendError> {
    fn at(self, stage: UploadStage) -> Result<T, UploadError> {
        self.map_err(|source| UploadError::Backend { stage, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_failure_names_its_stage() {
        let err = UploadError::Backend {
            stage: UploadStage::Publish,
            source: BackendError::Auth {
                response: "{}".to_string(),
            },
        };

        assert_eq!(err.stage(), Some(UploadStage::Publish));
        assert!(err.to_string().starts_with("Upload failed while"));
    }

    #[test]
    fn test_client_init_is_not_an_http_call() {
        let err = BackendError::ClientInit("no TLS backend".to_string());

        assert_eq!(err.to_string(), "Failed to create HTTP client: no TLS backend");
    }
}
