use std::collections::BTreeMap;
use std::future::Future;
use std::pin::Pin;

use domain::alert::entity::{AlertRecord, AlertStatus};
use domain::common::error::GatewayError;
use domain::filedrop::entity::{AnalysisResult, StagedFile};
use domain::profile::entity::ProfileFields;
use domain::rule::entity::{RuleDraft, RuleRecord};
use domain::trend::entity::TrendSeries;

pub type GatewayFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, GatewayError>> + Send + 'a>>;

/// Outcome of a rule toggle: the authoritative enabled flag plus the
/// server's message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleOutcome {
    pub enabled: bool,
    pub message: String,
}

/// Outcome of a file analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisOutcome {
    pub results: Vec<AnalysisResult>,
    pub message: String,
}

/// Outcome of a profile save: message plus the authoritative field values
/// the server chose to echo back (`None` entries mean "unchanged").
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileUpdateOutcome {
    pub message: String,
    pub data: Option<BTreeMap<String, Option<String>>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvatarOutcome {
    pub message: String,
    pub avatar_url: String,
}

/// The backend as seen by the views: one method per endpoint, JSON
/// envelopes already decoded, failures collapsed into the two
/// `GatewayError` kinds. Implementations must not retry.
pub trait BackendGateway: Send + Sync {
    fn fetch_alerts(&self) -> GatewayFuture<'_, Vec<AlertRecord>>;

    /// Returns the server's acknowledgement message.
    fn update_alert_status(&self, id: u64, status: AlertStatus) -> GatewayFuture<'_, String>;

    fn fetch_rules(&self) -> GatewayFuture<'_, Vec<RuleRecord>>;

    fn add_rule<'a>(&'a self, draft: &'a RuleDraft) -> GatewayFuture<'a, String>;

    fn edit_rule<'a>(&'a self, id: u64, draft: &'a RuleDraft) -> GatewayFuture<'a, String>;

    fn toggle_rule(&self, id: u64) -> GatewayFuture<'_, ToggleOutcome>;

    fn delete_rule(&self, id: u64) -> GatewayFuture<'_, String>;

    fn analyze_files<'a>(&'a self, files: &'a [StagedFile]) -> GatewayFuture<'a, AnalysisOutcome>;

    fn update_profile<'a>(
        &'a self,
        fields: &'a ProfileFields,
    ) -> GatewayFuture<'a, ProfileUpdateOutcome>;

    fn upload_avatar<'a>(&'a self, file: &'a StagedFile) -> GatewayFuture<'a, AvatarOutcome>;

    fn change_password<'a>(
        &'a self,
        current: &'a str,
        new: &'a str,
        confirm: &'a str,
    ) -> GatewayFuture<'a, String>;

    fn fetch_traffic_trend(&self) -> GatewayFuture<'_, TrendSeries>;
}
