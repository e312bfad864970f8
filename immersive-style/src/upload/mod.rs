//! The Style Uploader.
//!
//! Publishes a composed style to the styles-editor backend in one edit
//! session:
//!
//! 1. authenticate with a password grant
//! 2. open an edit session on the target project
//! 3. upload assets the backend has not seen and point the style at them
//! 4. submit the style as the project's draft
//! 5. publish the draft
//! 6. close the session
//!
//! The session is closed whether or not steps 3 to 5 succeed.
//!
//! HTTP goes through [`AsyncHttpClient`], so the protocol can be exercised
//! without a network.

mod backend;
mod credentials;
mod diff;
mod error;
mod http;
mod stage;
mod uploader;

pub use backend::{AuthToken, BackendConfig, SessionId, StylesBackend, DEFAULT_AUTH_URL, DEFAULT_CLIENT_ID, DEFAULT_STYLES_URL};
pub use credentials::{Credentials, CredentialsError, PASSWORD_VAR, USERNAME_VAR};
pub use diff::new_assets;
pub use error::{BackendError, UploadError};
pub use http::{AsyncHttpClient, AsyncReqwestClient};
pub use stage::UploadStage;
pub use uploader::{UploadReport, UploadedAsset, Uploader, PLACEHOLDER_ASSET};
