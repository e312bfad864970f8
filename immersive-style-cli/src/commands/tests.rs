//! Tests for style command handlers.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use super::args::*;
use super::handlers::*;
use super::traits::*;
use crate::error::CliError;
use immersive_style::assets::MaterializedAsset;
use immersive_style::compose::{ComposeError, ComposeReport};
use immersive_style::config::ConfigFile;
use immersive_style::lanes::LaneIconCode;
use immersive_style::slots::SlotError;
use immersive_style::style::AssetGroup;
use immersive_style::upload::{
    Credentials, CredentialsError, SessionId, UploadError, UploadReport, UploadedAsset,
    PASSWORD_VAR,
};

// ============================================================================
// Mock Output Implementation
// ============================================================================

/// Mock output that captures all messages for verification.
pub struct MockOutput {
    messages: RwLock<Vec<String>>,
}

impl Default for MockOutput {
    fn default() -> Self {
        Self {
            messages: RwLock::new(Vec::new()),
        }
    }
}

impl MockOutput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all captured messages.
    pub fn messages(&self) -> Vec<String> {
        self.messages.read().unwrap().clone()
    }

    /// Check if any message contains the given substring.
    pub fn contains(&self, substring: &str) -> bool {
        self.messages
            .read()
            .unwrap()
            .iter()
            .any(|m| m.contains(substring))
    }

    /// Get the full output as a single string.
    #[allow(dead_code)]
    pub fn full_output(&self) -> String {
        self.messages.read().unwrap().join("\n")
    }
}

impl Output for MockOutput {
    fn println(&self, message: &str) {
        self.messages.write().unwrap().push(message.to_string());
    }
}

// ============================================================================
// Mock Style Service Implementation
// ============================================================================

/// Mock style service with canned results and a call log.
#[derive(Default)]
pub struct MockStyleService {
    calls: RwLock<Vec<String>>,
    unmatched_slots: Option<Vec<String>>,
    missing_password: bool,
    lane_codes: Vec<LaneIconCode>,
}

impl MockStyleService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_unmatched_slots(mut self, slots: &[&str]) -> Self {
        self.unmatched_slots = Some(slots.iter().map(|s| s.to_string()).collect());
        self
    }

    pub fn without_password(mut self) -> Self {
        self.missing_password = true;
        self
    }

    pub fn with_lane_codes(mut self, codes: &[(u32, &str)]) -> Self {
        self.lane_codes = codes
            .iter()
            .map(|(code, name)| LaneIconCode {
                code: *code,
                file_name: name.to_string(),
            })
            .collect();
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.read().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.write().unwrap().push(call);
    }
}

impl StyleService for MockStyleService {
    fn compose(&self, name: &str) -> Result<ComposeReport, CliError> {
        self.record(format!("compose {}", name));
        if let Some(slots) = &self.unmatched_slots {
            return Err(ComposeError::from(SlotError::Unmatched {
                slots: slots.clone(),
            })
            .into());
        }
        Ok(ComposeReport {
            style_name: name.to_string(),
            assets: vec![MaterializedAsset {
                group: AssetGroup::Images,
                key: "lane_1".to_string(),
                file_name: "lane_1-abc.svg".to_string(),
            }],
            injected_layers: 12,
            output: PathBuf::from("out").join(name),
        })
    }

    fn upload(
        &self,
        name: &str,
        project_id: &str,
        credentials: &Credentials,
    ) -> Result<UploadReport, CliError> {
        self.record(format!("upload {} {} {}", name, project_id, credentials.username));
        Ok(UploadReport {
            style_name: name.to_string(),
            project_id: project_id.to_string(),
            session: SessionId::new("session-1"),
            assets: vec![UploadedAsset {
                group: AssetGroup::Models,
                name: "car".to_string(),
                filename: "1234.glb".to_string(),
            }],
        })
    }

    fn lane_codes(&self, dir: &Path) -> Result<Vec<LaneIconCode>, CliError> {
        self.record(format!("lane-codes {}", dir.display()));
        Ok(self.lane_codes.clone())
    }

    fn credentials(&self) -> Result<Credentials, CliError> {
        self.record("credentials".to_string());
        if self.missing_password {
            return Err(UploadError::from(CredentialsError::Missing {
                what: "password",
                variable: PASSWORD_VAR,
            })
            .into());
        }
        Ok(Credentials::new("editor", "secret"))
    }
}

fn config_with_targets(targets: &[(&str, &str)]) -> ConfigFile {
    ConfigFile {
        targets: targets
            .iter()
            .map(|(name, id)| (name.to_string(), id.to_string()))
            .collect::<BTreeMap<_, _>>(),
        ..ConfigFile::default()
    }
}

// ============================================================================
// Compose Handler Tests
// ============================================================================

#[test]
fn test_compose_prints_summary() {
    let output = MockOutput::new();
    let styles = MockStyleService::new();
    let config = ConfigFile::default();
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = ComposeArgs {
        name: "online".to_string(),
    };
    ComposeHandler::execute(args, &ctx).unwrap();

    assert_eq!(styles.calls(), vec!["compose online"]);
    assert!(output.contains("Composed 'online'"));
    assert!(output.contains("Assets copied:   1"));
    assert!(output.contains("Layers injected: 12"));
}

#[test]
fn test_compose_unmatched_slots_is_validation_error() {
    let output = MockOutput::new();
    let styles = MockStyleService::new().with_unmatched_slots(&["overpassSlot"]);
    let config = ConfigFile::default();
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = ComposeArgs {
        name: "online".to_string(),
    };
    let err = ComposeHandler::execute(args, &ctx).unwrap_err();

    match &err {
        CliError::Compose(e) => assert!(e.is_validation()),
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err.to_string().contains("overpassSlot"));
    assert!(output.messages().is_empty());
}

// ============================================================================
// Upload Handler Tests
// ============================================================================

#[test]
fn test_upload_uses_registered_project() {
    let output = MockOutput::new();
    let styles = MockStyleService::new();
    let config = config_with_targets(&[("online", "project-42")]);
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = UploadArgs {
        name: "online".to_string(),
    };
    UploadHandler::execute(args, &ctx).unwrap();

    assert_eq!(
        styles.calls(),
        vec!["credentials", "upload online project-42 editor"]
    );
    assert!(output.contains("Published 'online' to project project-42"));
    assert!(output.contains("[models] car=1234.glb"));
}

#[test]
fn test_upload_unknown_style_fails_before_any_call() {
    let output = MockOutput::new();
    let styles = MockStyleService::new();
    let config = config_with_targets(&[("online", "project-42")]);
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = UploadArgs {
        name: "night".to_string(),
    };
    let err = UploadHandler::execute(args, &ctx).unwrap_err();

    assert!(matches!(err, CliError::Config(_)));
    assert!(err.to_string().contains("night"));
    assert!(styles.calls().is_empty());
}

#[test]
fn test_upload_missing_credentials_stops_before_upload() {
    let output = MockOutput::new();
    let styles = MockStyleService::new().without_password();
    let config = config_with_targets(&[("online", "project-42")]);
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = UploadArgs {
        name: "online".to_string(),
    };
    let err = UploadHandler::execute(args, &ctx).unwrap_err();

    assert!(matches!(
        err,
        CliError::Upload(UploadError::Credentials(_))
    ));
    assert!(err.to_string().contains(PASSWORD_VAR));
    assert_eq!(styles.calls(), vec!["credentials"]);
}

// ============================================================================
// Lane Codes Handler Tests
// ============================================================================

#[test]
fn test_lane_codes_prints_code_and_filename() {
    let output = MockOutput::new();
    let styles = MockStyleService::new().with_lane_codes(&[
        (2, "straight.svg"),
        (6, "straight_right.svg"),
    ]);
    let config = ConfigFile::default();
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = LaneCodesArgs {
        dir: PathBuf::from("assets/images/lanes"),
    };
    LaneCodesHandler::execute(args, &ctx).unwrap();

    assert_eq!(
        output.messages(),
        vec!["2  straight.svg", "6  straight_right.svg"]
    );
}

#[test]
fn test_lane_codes_flags_unrecognized_icons() {
    let output = MockOutput::new();
    let styles = MockStyleService::new().with_lane_codes(&[(0, "blank.svg")]);
    let config = ConfigFile::default();
    let ctx = CommandContext::new(&output, &styles, &config);

    let args = LaneCodesArgs {
        dir: PathBuf::from("icons"),
    };
    LaneCodesHandler::execute(args, &ctx).unwrap();

    assert!(output.contains("0  blank.svg  (no direction tokens recognized)"));
}
