use std::sync::Arc;

use domain::alert::entity::{AlertRecord, AlertStatus};
use domain::alert::error::AlertError;
use domain::alert::query::{self, AlertFilter};
use domain::alert::stats::AlertStats;
use domain::common::entity::Notice;
use domain::common::error::GatewayError;
use ports::secondary::backend_gateway::BackendGateway;
use ports::secondary::clock::Clock;
use ports::secondary::notification_sink::NotificationSink;
use ports::secondary::view_surface::ViewSurface;

use crate::actions::{DispatchOutcome, ViewAction};
use crate::render;

pub const ALERTS_CONTAINER: &str = "alerts-container";
pub const PENDING_STAT: &str = "pending-alerts";
pub const PROCESSING_STAT: &str = "processing-alerts";
pub const RESOLVED_STAT: &str = "resolved-alerts";
pub const TODAY_STAT: &str = "today-alerts";

/// The alert triage view: owns the alert store and filter state,
/// orchestrates load → project → render, and dispatches status updates.
///
/// Constructed once per page view with its collaborators injected; all
/// mutation goes through `&mut self`, so overlapping writes to the store
/// are impossible by construction.
pub struct AlertsAppService {
    gateway: Arc<dyn BackendGateway>,
    surface: Arc<dyn ViewSurface>,
    sink: Arc<dyn NotificationSink>,
    clock: Arc<dyn Clock>,
    alerts: Vec<AlertRecord>,
    filter: AlertFilter,
}

impl AlertsAppService {
    pub fn new(
        gateway: Arc<dyn BackendGateway>,
        surface: Arc<dyn ViewSurface>,
        sink: Arc<dyn NotificationSink>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            gateway,
            surface,
            sink,
            clock,
            alerts: Vec::new(),
            filter: AlertFilter::default(),
        }
    }

    pub fn alerts(&self) -> &[AlertRecord] {
        &self.alerts
    }

    pub fn filter(&self) -> &AlertFilter {
        &self.filter
    }

    pub fn stats(&self) -> AlertStats {
        AlertStats::compute(&self.alerts, self.clock.now_ms())
    }

    /// Current projection of the store through the filter.
    pub fn projected(&self) -> Vec<&AlertRecord> {
        query::project(&self.alerts, &self.filter)
    }

    /// Fetch the store from the backend. On success the store is replaced
    /// wholesale, in server order; on any failure it is left untouched.
    /// Safe to call repeatedly; the last response to resolve wins.
    pub async fn load(&mut self) -> Result<(), GatewayError> {
        let alerts = self.gateway.fetch_alerts().await?;
        self.alerts = alerts;
        Ok(())
    }

    /// Load, then bring stats and list up to date. Failures surface
    /// through the sink and leave everything as it was.
    pub async fn refresh(&mut self) {
        match self.load().await {
            Ok(()) => {
                self.update_stats();
                self.rerender();
            }
            Err(err) => {
                tracing::warn!("alert refresh failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
    }

    /// Replace the filter snapshot and re-project.
    pub fn set_filter(&mut self, filter: AlertFilter) {
        self.filter = filter;
        self.rerender();
    }

    /// Update just the search term, as the search box does per keystroke.
    pub fn set_search(&mut self, term: &str) {
        self.filter.search = term.to_string();
        self.rerender();
    }

    /// Detail fragment for the modal.
    pub fn detail(&self, id: u64) -> Result<String, AlertError> {
        let alert = self.find(id)?;
        Ok(render::alerts::alert_detail(alert))
    }

    /// Plain-text summary destined for the clipboard.
    pub fn copy_info(&self, id: u64) -> Result<String, AlertError> {
        let alert = self.find(id)?;
        let mut text = format!(
            "Alert\ntitle: {}\nseverity: {}\nstatus: {}\ncreated: {}\n",
            alert.title,
            alert.kind.severity_label(),
            alert.status,
            render::alerts::format_utc(alert.created_at_ms),
        );
        if let Some(ref ip) = alert.source_ip {
            text.push_str(&format!("source IP: {ip}\n"));
        }
        if let Some(ref ip) = alert.dest_ip {
            text.push_str(&format!("dest IP: {ip}\n"));
        }
        text.push_str(&format!("details: {}", alert.message));
        Ok(text)
    }

    /// Drive a status transition. Locally refused when the record is
    /// unknown or the transition runs backward; otherwise the gateway is
    /// asked and, on success, the single record is patched and the view
    /// re-rendered. On a gateway failure the store is untouched and the
    /// server's message (or the generic transport text) goes to the sink.
    pub async fn update_status(&mut self, id: u64, next: AlertStatus) -> Result<(), AlertError> {
        let current = self.find(id)?.status;
        if !current.can_become(next) {
            return Err(AlertError::InvalidTransition {
                id,
                from: current,
                to: next,
            });
        }

        match self.gateway.update_alert_status(id, next).await {
            Ok(message) => {
                let now_ms = self.clock.now_ms();
                if let Some(alert) = self.alerts.iter_mut().find(|a| a.id == id) {
                    alert.status = next;
                    if next == AlertStatus::Resolved {
                        alert.resolved_at_ms = Some(now_ms);
                    }
                }
                self.update_stats();
                self.rerender();
                self.sink.notify(&message, Notice::Success);
            }
            Err(err) => {
                tracing::warn!(alert_id = id, "status update failed: {err}");
                self.sink.notify(err.user_message(), Notice::Error);
            }
        }
        Ok(())
    }

    /// Typed dispatch entry point for delegated row controls.
    pub async fn dispatch(&mut self, action: ViewAction) -> Result<DispatchOutcome, AlertError> {
        match action {
            ViewAction::ViewDetail(id) => self.detail(id).map(DispatchOutcome::Markup),
            ViewAction::MarkProcessing(id) => {
                self.update_status(id, AlertStatus::Processing).await?;
                Ok(DispatchOutcome::Handled)
            }
            ViewAction::MarkResolved(id) => {
                self.update_status(id, AlertStatus::Resolved).await?;
                Ok(DispatchOutcome::Handled)
            }
            ViewAction::CopyInfo(id) => self.copy_info(id).map(DispatchOutcome::Clipboard),
            _ => Ok(DispatchOutcome::Handled),
        }
    }

    fn find(&self, id: u64) -> Result<&AlertRecord, AlertError> {
        self.alerts
            .iter()
            .find(|a| a.id == id)
            .ok_or(AlertError::NotFound(id))
    }

    fn rerender(&self) {
        let html = render::alerts::alert_list(&self.projected(), self.clock.now_ms());
        self.surface.replace_content(ALERTS_CONTAINER, &html);
    }

    fn update_stats(&self) {
        let stats = self.stats();
        self.surface.set_text(PENDING_STAT, &stats.pending.to_string());
        self.surface
            .set_text(PROCESSING_STAT, &stats.processing.to_string());
        self.surface
            .set_text(RESOLVED_STAT, &stats.resolved.to_string());
        self.surface.set_text(TODAY_STAT, &stats.today.to_string());
    }
}
