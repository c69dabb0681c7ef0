//! Wire envelopes. Every mutating endpoint signals success with a boolean
//! flag in the body; HTTP status alone is never trusted.

use std::collections::BTreeMap;

use serde::Deserialize;

use domain::alert::entity::AlertRecord;
use domain::common::error::{GatewayError, UNSPECIFIED_FAILURE_MESSAGE};
use domain::filedrop::entity::AnalysisResult;
use domain::rule::entity::RuleRecord;

#[derive(Debug, Deserialize)]
pub struct AlertListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub alerts: Vec<AlertRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct RuleListEnvelope {
    pub success: bool,
    #[serde(default)]
    pub rules: Vec<RuleRecord>,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AckEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ToggleEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub is_active: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeEnvelope {
    pub success: bool,
    #[serde(default)]
    pub results: Vec<AnalysisResult>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct ProfileEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub data: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Deserialize)]
pub struct AvatarEnvelope {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub avatar_url: Option<String>,
}

/// The logical-failure error for an envelope that carried
/// `success: false`: the server's message verbatim, or the fallback.
pub fn logical_failure(message: Option<String>) -> GatewayError {
    GatewayError::Logical(message.unwrap_or_else(|| UNSPECIFIED_FAILURE_MESSAGE.to_string()))
}

/// Ack message for a successful mutate envelope.
pub fn ack_message(message: Option<String>) -> String {
    message.unwrap_or_else(|| "ok".to_string())
}
