//! Test doubles for the secondary ports. Compiled for tests and behind
//! the `test-utils` feature so downstream crates can share them.

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};

use domain::alert::entity::{AlertRecord, AlertStatus};
use domain::common::entity::Notice;
use domain::common::error::GatewayError;
use domain::filedrop::entity::StagedFile;
use domain::profile::entity::ProfileFields;
use domain::rule::entity::{RuleDraft, RuleRecord};
use domain::trend::entity::TrendSeries;

use crate::secondary::backend_gateway::{
    AnalysisOutcome, AvatarOutcome, BackendGateway, GatewayFuture, ProfileUpdateOutcome,
    ToggleOutcome,
};
use crate::secondary::clock::Clock;
use crate::secondary::notification_sink::NotificationSink;
use crate::secondary::view_surface::ViewSurface;

fn exhausted<T>() -> Result<T, GatewayError> {
    Err(GatewayError::Transport("no scripted response".to_string()))
}

fn pop<T>(queue: &Mutex<VecDeque<Result<T, GatewayError>>>) -> Result<T, GatewayError> {
    queue
        .lock()
        .expect("stub queue lock")
        .pop_front()
        .unwrap_or_else(exhausted)
}

/// Scriptable `BackendGateway`: each method pops the next queued response
/// and counts the call. An empty queue yields a transport error, so a test
/// that expects "the gateway is never invoked" can simply assert the
/// counter stayed at zero.
#[derive(Default)]
pub struct StubGateway {
    pub alert_responses: Mutex<VecDeque<Result<Vec<AlertRecord>, GatewayError>>>,
    pub update_responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub rule_responses: Mutex<VecDeque<Result<Vec<RuleRecord>, GatewayError>>>,
    pub add_responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub edit_responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub toggle_responses: Mutex<VecDeque<Result<ToggleOutcome, GatewayError>>>,
    pub delete_responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub analyze_responses: Mutex<VecDeque<Result<AnalysisOutcome, GatewayError>>>,
    pub profile_responses: Mutex<VecDeque<Result<ProfileUpdateOutcome, GatewayError>>>,
    pub avatar_responses: Mutex<VecDeque<Result<AvatarOutcome, GatewayError>>>,
    pub password_responses: Mutex<VecDeque<Result<String, GatewayError>>>,
    pub trend_responses: Mutex<VecDeque<Result<TrendSeries, GatewayError>>>,

    pub fetch_alert_calls: AtomicUsize,
    pub update_calls: AtomicUsize,
    pub fetch_rule_calls: AtomicUsize,
    pub add_calls: AtomicUsize,
    pub edit_calls: AtomicUsize,
    pub toggle_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub analyze_calls: AtomicUsize,
    pub profile_calls: AtomicUsize,
    pub avatar_calls: AtomicUsize,
    pub password_calls: AtomicUsize,
    pub trend_calls: AtomicUsize,
}

impl StubGateway {
    pub fn push_alerts(&self, response: Result<Vec<AlertRecord>, GatewayError>) {
        self.alert_responses.lock().unwrap().push_back(response);
    }

    pub fn push_update(&self, response: Result<String, GatewayError>) {
        self.update_responses.lock().unwrap().push_back(response);
    }

    pub fn push_rules(&self, response: Result<Vec<RuleRecord>, GatewayError>) {
        self.rule_responses.lock().unwrap().push_back(response);
    }

    pub fn push_add(&self, response: Result<String, GatewayError>) {
        self.add_responses.lock().unwrap().push_back(response);
    }

    pub fn push_edit(&self, response: Result<String, GatewayError>) {
        self.edit_responses.lock().unwrap().push_back(response);
    }

    pub fn push_toggle(&self, response: Result<ToggleOutcome, GatewayError>) {
        self.toggle_responses.lock().unwrap().push_back(response);
    }

    pub fn push_delete(&self, response: Result<String, GatewayError>) {
        self.delete_responses.lock().unwrap().push_back(response);
    }

    pub fn push_analyze(&self, response: Result<AnalysisOutcome, GatewayError>) {
        self.analyze_responses.lock().unwrap().push_back(response);
    }

    pub fn push_profile(&self, response: Result<ProfileUpdateOutcome, GatewayError>) {
        self.profile_responses.lock().unwrap().push_back(response);
    }

    pub fn push_avatar(&self, response: Result<AvatarOutcome, GatewayError>) {
        self.avatar_responses.lock().unwrap().push_back(response);
    }

    pub fn push_password(&self, response: Result<String, GatewayError>) {
        self.password_responses.lock().unwrap().push_back(response);
    }

    pub fn push_trend(&self, response: Result<TrendSeries, GatewayError>) {
        self.trend_responses.lock().unwrap().push_back(response);
    }
}

impl BackendGateway for StubGateway {
    fn fetch_alerts(&self) -> GatewayFuture<'_, Vec<AlertRecord>> {
        self.fetch_alert_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.alert_responses);
        Box::pin(async move { response })
    }

    fn update_alert_status(&self, _id: u64, _status: AlertStatus) -> GatewayFuture<'_, String> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.update_responses);
        Box::pin(async move { response })
    }

    fn fetch_rules(&self) -> GatewayFuture<'_, Vec<RuleRecord>> {
        self.fetch_rule_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.rule_responses);
        Box::pin(async move { response })
    }

    fn add_rule<'a>(&'a self, _draft: &'a RuleDraft) -> GatewayFuture<'a, String> {
        self.add_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.add_responses);
        Box::pin(async move { response })
    }

    fn edit_rule<'a>(&'a self, _id: u64, _draft: &'a RuleDraft) -> GatewayFuture<'a, String> {
        self.edit_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.edit_responses);
        Box::pin(async move { response })
    }

    fn toggle_rule(&self, _id: u64) -> GatewayFuture<'_, ToggleOutcome> {
        self.toggle_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.toggle_responses);
        Box::pin(async move { response })
    }

    fn delete_rule(&self, _id: u64) -> GatewayFuture<'_, String> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.delete_responses);
        Box::pin(async move { response })
    }

    fn analyze_files<'a>(&'a self, _files: &'a [StagedFile]) -> GatewayFuture<'a, AnalysisOutcome> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.analyze_responses);
        Box::pin(async move { response })
    }

    fn update_profile<'a>(
        &'a self,
        _fields: &'a ProfileFields,
    ) -> GatewayFuture<'a, ProfileUpdateOutcome> {
        self.profile_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.profile_responses);
        Box::pin(async move { response })
    }

    fn upload_avatar<'a>(&'a self, _file: &'a StagedFile) -> GatewayFuture<'a, AvatarOutcome> {
        self.avatar_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.avatar_responses);
        Box::pin(async move { response })
    }

    fn change_password<'a>(
        &'a self,
        _current: &'a str,
        _new: &'a str,
        _confirm: &'a str,
    ) -> GatewayFuture<'a, String> {
        self.password_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.password_responses);
        Box::pin(async move { response })
    }

    fn fetch_traffic_trend(&self) -> GatewayFuture<'_, TrendSeries> {
        self.trend_calls.fetch_add(1, Ordering::SeqCst);
        let response = pop(&self.trend_responses);
        Box::pin(async move { response })
    }
}

/// Sink that records every notification for assertion.
#[derive(Default)]
pub struct RecordingSink {
    messages: Mutex<Vec<(String, Notice)>>,
}

impl RecordingSink {
    pub fn messages(&self) -> Vec<(String, Notice)> {
        self.messages.lock().unwrap().clone()
    }

    pub fn last(&self) -> Option<(String, Notice)> {
        self.messages.lock().unwrap().last().cloned()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.lock().unwrap().is_empty()
    }
}

impl NotificationSink for RecordingSink {
    fn notify(&self, message: &str, severity: Notice) {
        self.messages
            .lock()
            .unwrap()
            .push((message.to_string(), severity));
    }
}

/// Surface that stores fragments and stat texts for assertion.
#[derive(Default)]
pub struct RecordingSurface {
    contents: Mutex<std::collections::BTreeMap<String, String>>,
    texts: Mutex<std::collections::BTreeMap<String, String>>,
}

impl RecordingSurface {
    pub fn content(&self, container_id: &str) -> Option<String> {
        self.contents.lock().unwrap().get(container_id).cloned()
    }

    pub fn text(&self, element_id: &str) -> Option<String> {
        self.texts.lock().unwrap().get(element_id).cloned()
    }
}

impl ViewSurface for RecordingSurface {
    fn replace_content(&self, container_id: &str, html: &str) {
        self.contents
            .lock()
            .unwrap()
            .insert(container_id.to_string(), html.to_string());
    }

    fn set_text(&self, element_id: &str, text: &str) {
        self.texts
            .lock()
            .unwrap()
            .insert(element_id.to_string(), text.to_string());
    }
}

/// Manually advanced clock.
#[derive(Default)]
pub struct FixedClock {
    now_ms: AtomicU64,
}

impl FixedClock {
    pub fn at(now_ms: u64) -> Self {
        Self {
            now_ms: AtomicU64::new(now_ms),
        }
    }

    pub fn advance(&self, delta_ms: u64) {
        self.now_ms.fetch_add(delta_ms, Ordering::SeqCst);
    }

    pub fn set(&self, now_ms: u64) {
        self.now_ms.store(now_ms, Ordering::SeqCst);
    }
}

impl Clock for FixedClock {
    fn now_ms(&self) -> u64 {
        self.now_ms.load(Ordering::SeqCst)
    }
}
