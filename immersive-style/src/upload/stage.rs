//! Upload stages.
//!
//! A run moves through
//! `UNAUTHENTICATED → AUTHENTICATED → SESSION_OPEN → ASSETS_SYNCED →
//! DRAFT_UPDATED → PUBLISHED → SESSION_CLOSED`. Each stage is the step
//! leading to one of those states.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum UploadStage {
    Authenticate,
    OpenSession,
    SyncAssets,
    UpdateDraft,
    Publish,
    CloseSession,
}

impl UploadStage {
    /// Stages in execution order.
    pub const ALL: [UploadStage; 6] = [
        UploadStage::Authenticate,
        UploadStage::OpenSession,
        UploadStage::SyncAssets,
        UploadStage::UpdateDraft,
        UploadStage::Publish,
        UploadStage::CloseSession,
    ];

    /// State reached once this stage succeeds.
    pub fn reached_state(self) -> &'static str {
        match self {
            UploadStage::Authenticate => "AUTHENTICATED",
            UploadStage::OpenSession => "SESSION_OPEN",
            UploadStage::SyncAssets => "ASSETS_SYNCED",
            UploadStage::UpdateDraft => "DRAFT_UPDATED",
            UploadStage::Publish => "PUBLISHED",
            UploadStage::CloseSession => "SESSION_CLOSED",
        }
    }

    /// True for stages that run inside an open edit session.
    pub fn needs_session(self) -> bool {
        matches!(
            self,
            UploadStage::SyncAssets | UploadStage::UpdateDraft | UploadStage::Publish
        )
    }
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let step = match self {
            UploadStage::Authenticate => "authenticating",
            UploadStage::OpenSession => "opening the edit session",
            UploadStage::SyncAssets => "uploading assets",
            UploadStage::UpdateDraft => "updating the draft",
            UploadStage::Publish => "publishing the draft",
            UploadStage::CloseSession => "closing the edit session",
        };
        f.write_str(step)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stages_reach_states_in_order() {
        let states: Vec<&str> = UploadStage::ALL.iter().map(|s| s.reached_state()).collect();
        assert_eq!(
            states,
            vec![
                "AUTHENTICATED",
                "SESSION_OPEN",
                "ASSETS_SYNCED",
                "DRAFT_UPDATED",
                "PUBLISHED",
                "SESSION_CLOSED"
            ]
        );
    }

    #[test]
    fn test_session_scoped_stages() {
        assert!(!UploadStage::OpenSession.needs_session());
        assert!(UploadStage::SyncAssets.needs_session());
        assert!(UploadStage::Publish.needs_session());
        assert!(!UploadStage::CloseSession.needs_session());
    }
}
