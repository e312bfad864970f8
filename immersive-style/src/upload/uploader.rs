//! Upload pipeline.

use std::fs;

use tracing::{info, warn};

use super::backend::{AuthToken, SessionId, StylesBackend};
use super::credentials::Credentials;
use super::diff::new_assets;
use super::error::{AtStage, UploadError};
use super::http::AsyncHttpClient;
use super::stage::UploadStage;
use crate::assets::AssetError;
use crate::layout::StyleLayout;
use crate::style::{AssetGroup, StyleDocument};

/// Asset key that is never uploaded.
pub const PLACEHOLDER_ASSET: &str = "non-information";

/// An asset accepted by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedAsset {
    pub group: AssetGroup,
    pub name: String,
    /// Filename assigned by the backend, now the asset's `url`.
    pub filename: String,
}

/// Summary of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    pub style_name: String,
    pub project_id: String,
    pub session: SessionId,
    pub assets: Vec<UploadedAsset>,
}

/// Publishes composed styles.
pub struct Uploader<C> {
    backend: StylesBackend<C>,
    layout: StyleLayout,
}

impl<C: AsyncHttpClient> Uploader<C> {
    pub fn new(backend: StylesBackend<C>, layout: StyleLayout) -> Self {
        Self { backend, layout }
    }

    pub fn backend(&self) -> &StylesBackend<C> {
        &self.backend
    }

    /// Uploads `out/<style_name>` to `project_id`.
    ///
    /// Once a session is open it is always closed. If a step inside the
    /// session fails, a failure to close is only logged and the step's error
    /// is returned.
    pub async fn upload(
        &self,
        style_name: &str,
        project_id: &str,
        credentials: &Credentials,
    ) -> Result<UploadReport, UploadError> {
        let mut document = StyleDocument::from_path(&self.layout.output_style(style_name))?;

        info!(auth_url = %self.backend.config().auth_url, "Requesting access token");
        let token = self
            .backend
            .authenticate(credentials)
            .await
            .at(UploadStage::Authenticate)?;
        reached(UploadStage::Authenticate);

        info!(project = project_id, "Opening edit session");
        let session = self
            .backend
            .open_session(project_id, &token)
            .await
            .at(UploadStage::OpenSession)?;
        reached(UploadStage::OpenSession);

        let result = self
            .in_session(style_name, project_id, &token, &session, &mut document)
            .await;

        info!(project = project_id, session = %session, "Releasing edit session");
        let closed = self
            .backend
            .close_session(project_id, &session, &token)
            .await
            .at(UploadStage::CloseSession);

        let assets = match (result, closed) {
            (Ok(assets), Ok(())) => assets,
            (Ok(_), Err(close_error)) => return Err(close_error),
            (Err(error), Ok(())) => return Err(error),
            (Err(error), Err(close_error)) => {
                warn!(session = %session, error = %close_error, "Failed to release edit session");
                return Err(error);
            }
        };
        reached(UploadStage::CloseSession);
        info!(style = style_name, project = project_id, "Style published");

        Ok(UploadReport {
            style_name: style_name.to_string(),
            project_id: project_id.to_string(),
            session,
            assets,
        })
    }

    async fn in_session(
        &self,
        style_name: &str,
        project_id: &str,
        token: &AuthToken,
        session: &SessionId,
        document: &mut StyleDocument,
    ) -> Result<Vec<UploadedAsset>, UploadError> {
        info!(style = style_name, "Uploading new assets");
        let assets = self
            .sync_assets(style_name, project_id, token, session, document)
            .await?;
        reached(UploadStage::SyncAssets);

        info!(project = project_id, "Submitting style draft");
        document.mark_as_upload();
        let style = document.to_value()?;
        self.backend
            .update_style(project_id, token, session, style)
            .await
            .at(UploadStage::UpdateDraft)?;
        reached(UploadStage::UpdateDraft);

        info!(project = project_id, "Publishing draft");
        self.backend
            .publish_style(project_id, token, session)
            .await
            .at(UploadStage::Publish)?;
        reached(UploadStage::Publish);

        Ok(assets)
    }

    /// Uploads every asset whose composed file is new and points its entry
    /// at the backend filename.
    async fn sync_assets(
        &self,
        style_name: &str,
        project_id: &str,
        token: &AuthToken,
        session: &SessionId,
        document: &mut StyleDocument,
    ) -> Result<Vec<UploadedAsset>, UploadError> {
        let mut uploaded = Vec::new();

        for group in AssetGroup::ALL {
            let output_dir = self.layout.output_assets(style_name, group);
            let fresh = new_assets(&self.layout.source_assets(style_name, group), &output_dir)?;

            for (name, url) in document.asset_entries(group) {
                if name == PLACEHOLDER_ASSET || !fresh.contains(&url) {
                    continue;
                }

                let path = output_dir.join(&url);
                let bytes = fs::read(&path).map_err(|source| AssetError::Read {
                    path: path.clone(),
                    source,
                })?;

                let filename = self
                    .backend
                    .post_asset(project_id, token, session, group, &name, &bytes)
                    .await
                    .at(UploadStage::SyncAssets)?;

                document.set_asset_url(group, &name, &filename);
                uploaded.push(UploadedAsset {
                    group,
                    name,
                    filename,
                });
            }
        }

        Ok(uploaded)
    }
}

fn reached(stage: UploadStage) {
    info!(state = stage.reached_state(), "Upload stage complete");
}
