//! Concrete implementations of the service traits.

use std::path::Path;

use super::traits::{Output, StyleService};
use crate::error::CliError;
use immersive_style::assets::Sha256Hasher;
use immersive_style::catalog::StyleCatalog;
use immersive_style::compose::{ComposeReport, Composer};
use immersive_style::lanes::{code_names, LaneIconCode};
use immersive_style::layout::StyleLayout;
use immersive_style::upload::{
    AsyncReqwestClient, BackendConfig, Credentials, StylesBackend, UploadReport, Uploader,
};

/// Standard console output implementation.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleOutput;

impl ConsoleOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Output for ConsoleOutput {
    fn println(&self, message: &str) {
        println!("{}", message);
    }
}

/// Style service backed by the immersive catalog and the HTTP backend.
pub struct DefaultStyleService {
    layout: StyleLayout,
    backend: BackendConfig,
}

impl DefaultStyleService {
    pub fn new(layout: StyleLayout, backend: BackendConfig) -> Self {
        Self { layout, backend }
    }
}

impl StyleService for DefaultStyleService {
    fn compose(&self, name: &str) -> Result<ComposeReport, CliError> {
        let composer = Composer::new(
            self.layout.clone(),
            StyleCatalog::immersive(),
            Sha256Hasher,
        );
        Ok(composer.compose(name)?)
    }

    fn upload(
        &self,
        name: &str,
        project_id: &str,
        credentials: &Credentials,
    ) -> Result<UploadReport, CliError> {
        let client =
            AsyncReqwestClient::new(self.backend.timeout_secs).map_err(CliError::HttpClient)?;
        let uploader = Uploader::new(
            StylesBackend::new(client, self.backend.clone()),
            self.layout.clone(),
        );

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| CliError::Runtime(e.to_string()))?;

        Ok(runtime.block_on(uploader.upload(name, project_id, credentials))?)
    }

    fn lane_codes(&self, dir: &Path) -> Result<Vec<LaneIconCode>, CliError> {
        code_names(dir).map_err(|error| CliError::LaneCodes {
            path: dir.to_path_buf(),
            error,
        })
    }

    fn credentials(&self) -> Result<Credentials, CliError> {
        Credentials::from_env().map_err(|e| CliError::Upload(e.into()))
    }
}
