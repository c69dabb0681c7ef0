use std::sync::Arc;

use domain::common::entity::Notice;
use domain::rule::entity::{RuleDraft, RuleRecord};
use domain::rule::error::RuleError;
use domain::rule::query::{self, RuleFilter};
use domain::rule::stats::RuleStats;
use ports::secondary::backend_gateway::BackendGateway;
use ports::secondary::notification_sink::NotificationSink;
use ports::secondary::view_surface::ViewSurface;

use crate::actions::{DispatchOutcome, ViewAction};
use crate::render;

pub const RULES_CONTAINER: &str = "rules-container";
pub const TOTAL_STAT: &str = "total-rules";
pub const ACTIVE_STAT: &str = "active-rules";
pub const DISABLED_STAT: &str = "disabled-rules";

/// What a rule form submission asks of the caller afterwards. Add and
/// edit create or rename server-side state, the one structural change
/// that still warrants a full reload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    NeedsReload,
    Rejected,
}

/// The white-rule management view. The store bootstraps from data
/// embedded in the page and can re-fetch after structural changes; all
/// single-record mutations are optimistic patches followed by a
/// re-render.
pub struct RulesAppService {
    gateway: Arc<dyn BackendGateway>,
    surface: Arc<dyn ViewSurface>,
    sink: Arc<dyn NotificationSink>,
    rules: Vec<RuleRecord>,
    filter: RuleFilter,
    edit_target: Option<u64>,
}

impl RulesAppService {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        surface: Arc<dyn ViewSurface>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            gateway,
            surface,
            sink,
            rules: Vec::new(),
            filter: RuleFilter::default(),
            edit_target: None,
        }
    }

    pub fn rules(&self) -> &[RuleRecord] {
        &self.rules
    }

    pub fn stats(&self) -> RuleStats {
        RuleStats::compute(&self.rules)
    }

    pub fn projected(&self) -> Vec<&RuleRecord> {
        query::project(&self.rules, &self.filter)
    }

    pub fn edit_target(&self) -> Option<u64> {
        self.edit_target
    }

    /// Bootstrap or replace the store, e.g. from page-embedded data.
    pub fn replace_rules(&mut self, rules: Vec<RuleRecord>) {
        self.rules = rules;
        self.update_stats();
        self.rerender();
    }

    /// Re-fetch the store from the backend after a structural change.
    pub async fn reload(&mut self) {
        match self.gateway.fetch_rules().await {
            Ok(rules) => self.replace_rules(rules),
            Err(err) => {
                tracing::warn!("rule reload failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
    }

    pub fn set_filter(&mut self, filter: RuleFilter) {
        self.filter = filter;
        self.rerender();
    }

    pub fn set_search(&mut self, term: &str) {
        self.filter.search = term.to_string();
        self.rerender();
    }

    /// Flip one rule's enabled flag. Refused locally, with no request
    /// made, when the viewer does not own the rule; on success the
    /// server's `is_active` is patched in and the view re-rendered.
    pub async fn toggle(&mut self, id: u64) -> Result<(), RuleError> {
        self.owned(id)?;
        match self.gateway.toggle_rule(id).await {
            Ok(outcome) => {
                if let Some(rule) = self.rules.iter_mut().find(|r| r.id == id) {
                    rule.enabled = outcome.enabled;
                }
                self.update_stats();
                self.rerender();
                self.sink.notify(&outcome.message, Notice::Success);
            }
            Err(err) => {
                tracing::warn!(rule_id = id, "rule toggle failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }

    /// Delete one rule; the record leaves the store only after the
    /// server confirms.
    pub async fn delete(&mut self, id: u64) -> Result<(), RuleError> {
        self.owned(id)?;
        match self.gateway.delete_rule(id).await {
            Ok(message) => {
                self.rules.retain(|r| r.id != id);
                self.update_stats();
                self.rerender();
                self.sink.notify(&message, Notice::Success);
            }
            Err(err) => {
                tracing::warn!(rule_id = id, "rule delete failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }

    /// Open the form for an owned rule; returns the record to prefill.
    pub fn begin_edit(&mut self, id: u64) -> Result<&RuleRecord, RuleError> {
        let index = self
            .rules
            .iter()
            .position(|r| r.id == id)
            .ok_or(RuleError::NotFound(id))?;
        if !self.rules[index].is_own {
            return Err(RuleError::NotOwned(id));
        }
        self.edit_target = Some(id);
        Ok(&self.rules[index])
    }

    pub fn cancel_edit(&mut self) {
        self.edit_target = None;
    }

    /// Submit the form: edit when a target is set, add otherwise.
    pub async fn submit(&mut self, draft: RuleDraft) -> SubmitOutcome {
        let result = match self.edit_target {
            Some(id) => self.gateway.edit_rule(id, &draft).await,
            None => self.gateway.add_rule(&draft).await,
        };
        match result {
            Ok(message) => {
                self.edit_target = None;
                self.sink.notify(&message, Notice::Success);
                SubmitOutcome::NeedsReload
            }
            Err(err) => {
                tracing::warn!("rule submit failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
                SubmitOutcome::Rejected
            }
        }
    }

    /// Typed dispatch entry point for delegated row controls.
    pub async fn dispatch(&mut self, action: ViewAction) -> Result<DispatchOutcome, RuleError> {
        match action {
            ViewAction::ToggleRule(id) => {
                self.toggle(id).await?;
                Ok(DispatchOutcome::Handled)
            }
            ViewAction::DeleteRule(id) => {
                self.delete(id).await?;
                Ok(DispatchOutcome::Handled)
            }
            ViewAction::EditRule(id) => {
                self.begin_edit(id)?;
                Ok(DispatchOutcome::Handled)
            }
            _ => Ok(DispatchOutcome::Handled),
        }
    }

    /// Ownership gate: mutations on rules the viewer does not own are
    /// refused before any request is built.
    fn owned(&self, id: u64) -> Result<(), RuleError> {
        let rule = self
            .rules
            .iter()
            .find(|r| r.id == id)
            .ok_or(RuleError::NotFound(id))?;
        if !rule.is_own {
            return Err(RuleError::NotOwned(id));
        }
        Ok(())
    }

    fn rerender(&self) {
        let html = render::rules::rule_list(&self.projected());
        self.surface.replace_content(RULES_CONTAINER, &html);
    }

    fn update_stats(&self) {
        let stats = self.stats();
        self.surface.set_text(TOTAL_STAT, &stats.total.to_string());
        self.surface.set_text(ACTIVE_STAT, &stats.active.to_string());
        self.surface
            .set_text(DISABLED_STAT, &stats.disabled.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::common::error::GatewayError;
    use domain::rule::entity::RuleKind;
    use ports::secondary::backend_gateway::ToggleOutcome;
    use ports::test_utils::{RecordingSink, RecordingSurface, StubGateway};
    use std::sync::atomic::Ordering;

    struct Harness {
        gateway: Arc<StubGateway>,
        surface: Arc<RecordingSurface>,
        sink: Arc<RecordingSink>,
        service: RulesAppService,
    }

    fn harness() -> Harness {
        let gateway = Arc::new(StubGateway::default());
        let surface = Arc::new(RecordingSurface::default());
        let sink = Arc::new(RecordingSink::default());
        let service = RulesAppService::new(gateway.clone(), surface.clone(), sink.clone());
        Harness {
            gateway,
            surface,
            sink,
            service,
        }
    }

    fn make_rule(id: u64, is_own: bool, enabled: bool) -> RuleRecord {
        RuleRecord {
            id,
            name: format!("rule {id}"),
            kind: RuleKind::Ip,
            condition: "10.0.0.0/8".to_string(),
            enabled,
            created_at: String::new(),
            description: String::new(),
            creator_name: "ops".to_string(),
            is_own,
        }
    }

    #[test]
    fn bootstrap_renders_list_and_stats() {
        let mut h = harness();
        h.service
            .replace_rules(vec![make_rule(1, true, true), make_rule(2, false, false)]);

        assert_eq!(h.surface.text(TOTAL_STAT).as_deref(), Some("2"));
        assert_eq!(h.surface.text(ACTIVE_STAT).as_deref(), Some("1"));
        assert_eq!(h.surface.text(DISABLED_STAT).as_deref(), Some("1"));
        assert!(h.surface.content(RULES_CONTAINER).unwrap().contains("rule 1"));
    }

    #[tokio::test]
    async fn toggling_a_non_owned_rule_never_reaches_the_gateway() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(7, false, true)]);

        let result = h.service.toggle(7).await;
        assert_eq!(result, Err(RuleError::NotOwned(7)));
        assert_eq!(h.gateway.toggle_calls.load(Ordering::SeqCst), 0);

        let result = h.service.delete(7).await;
        assert_eq!(result, Err(RuleError::NotOwned(7)));
        assert_eq!(h.gateway.delete_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn toggle_patches_the_flag_the_server_returned() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(1, true, true)]);

        h.gateway.push_toggle(Ok(ToggleOutcome {
            enabled: false,
            message: "rule disabled".to_string(),
        }));
        h.service.toggle(1).await.unwrap();

        assert!(!h.service.rules()[0].enabled);
        assert_eq!(h.surface.text(ACTIVE_STAT).as_deref(), Some("0"));
        assert_eq!(
            h.sink.last(),
            Some(("rule disabled".to_string(), Notice::Success))
        );
    }

    #[tokio::test]
    async fn failed_toggle_leaves_the_flag_alone() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(1, true, true)]);

        h.gateway
            .push_toggle(Err(GatewayError::Logical("not allowed".to_string())));
        h.service.toggle(1).await.unwrap();

        assert!(h.service.rules()[0].enabled);
        assert_eq!(
            h.sink.last(),
            Some(("not allowed".to_string(), Notice::Error))
        );
    }

    #[tokio::test]
    async fn delete_removes_the_record_after_confirmation() {
        let mut h = harness();
        h.service
            .replace_rules(vec![make_rule(1, true, true), make_rule(2, true, true)]);

        h.gateway.push_delete(Ok("rule deleted".to_string()));
        h.service.delete(1).await.unwrap();

        assert_eq!(h.service.rules().len(), 1);
        assert_eq!(h.service.rules()[0].id, 2);
        assert_eq!(h.surface.text(TOTAL_STAT).as_deref(), Some("1"));
    }

    #[tokio::test]
    async fn submit_add_asks_for_a_reload() {
        let mut h = harness();
        h.gateway.push_add(Ok("rule created".to_string()));

        let outcome = h
            .service
            .submit(RuleDraft {
                name: "n".to_string(),
                kind: RuleKind::Port,
                condition: "443".to_string(),
                description: String::new(),
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::NeedsReload);
        assert_eq!(h.gateway.add_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.gateway.edit_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn submit_with_edit_target_hits_the_edit_endpoint() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(3, true, true)]);
        h.service.begin_edit(3).unwrap();

        h.gateway.push_edit(Ok("rule updated".to_string()));
        let outcome = h
            .service
            .submit(RuleDraft {
                name: "renamed".to_string(),
                kind: RuleKind::Ip,
                condition: "10.0.0.0/8".to_string(),
                description: String::new(),
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::NeedsReload);
        assert_eq!(h.gateway.edit_calls.load(Ordering::SeqCst), 1);
        assert_eq!(h.service.edit_target(), None);
    }

    #[tokio::test]
    async fn rejected_submit_keeps_the_edit_target() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(3, true, true)]);
        h.service.begin_edit(3).unwrap();

        h.gateway
            .push_edit(Err(GatewayError::Logical("duplicate name".to_string())));
        let outcome = h
            .service
            .submit(RuleDraft {
                name: "n".to_string(),
                kind: RuleKind::Ip,
                condition: "c".to_string(),
                description: String::new(),
            })
            .await;

        assert_eq!(outcome, SubmitOutcome::Rejected);
        assert_eq!(h.service.edit_target(), Some(3));
    }

    #[test]
    fn filter_narrows_the_rendered_list() {
        let mut h = harness();
        let mut named = make_rule(1, true, true);
        named.name = "build server".to_string();
        h.service.replace_rules(vec![named, make_rule(2, true, false)]);

        h.service.set_filter(RuleFilter {
            enabled: Some(true),
            search: "build".to_string(),
        });
        let html = h.surface.content(RULES_CONTAINER).unwrap();
        assert!(html.contains("build server"));
        assert!(!html.contains("rule 2"));
    }

    #[test]
    fn begin_edit_refuses_foreign_rules() {
        let mut h = harness();
        h.service.replace_rules(vec![make_rule(9, false, true)]);
        assert_eq!(h.service.begin_edit(9), Err(RuleError::NotOwned(9)));
        assert_eq!(h.service.edit_target(), None);
    }
}
