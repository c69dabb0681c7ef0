use std::fmt::Write;

use domain::alert::entity::{AlertKind, AlertRecord, AlertStatus};
use domain::alert::extract::{self, TrafficInfo};

use super::EMPTY_STATE_CLASS;
use super::escape::escape_html;

const MS_PER_MINUTE: u64 = 60_000;
const MS_PER_HOUR: u64 = 3_600_000;
const MS_PER_DAY: u64 = 86_400_000;
const MS_PER_WEEK: u64 = 7 * MS_PER_DAY;

/// Longest payload excerpt shown on a list item.
const PAYLOAD_SNIPPET_CHARS: usize = 50;

fn severity_meta(kind: AlertKind) -> (&'static str, &'static str, &'static str) {
    // (tone, label, icon)
    match kind {
        AlertKind::Danger => ("danger", "high", "fa-exclamation-triangle"),
        AlertKind::Warning => ("warning", "medium", "fa-exclamation-circle"),
        AlertKind::Info => ("primary", "low", "fa-info-circle"),
        AlertKind::Unknown => ("primary", "unknown", "fa-question-circle"),
    }
}

fn status_meta(status: AlertStatus) -> (&'static str, &'static str, &'static str) {
    match status {
        AlertStatus::Pending => ("danger", "pending", "fa-clock-o"),
        AlertStatus::Processing => ("warning", "processing", "fa-spinner"),
        AlertStatus::Resolved => ("success", "resolved", "fa-check-circle"),
    }
}

/// Tone for an AI verdict string: keyword match, neutral fallback.
fn verdict_tone(verdict: &str) -> &'static str {
    let verdict = verdict.to_lowercase();
    if verdict.contains("malicious") {
        "danger"
    } else if verdict.contains("suspicious") {
        "warning"
    } else if verdict.contains("normal") {
        "success"
    } else {
        "primary"
    }
}

/// Coarse relative timestamp, matching the buckets users expect on a
/// triage list: under a minute, minutes, hours, days, then a date.
pub fn format_relative(then_ms: u64, now_ms: u64) -> String {
    let elapsed = now_ms.saturating_sub(then_ms);
    if elapsed < MS_PER_MINUTE {
        "just now".to_string()
    } else if elapsed < MS_PER_HOUR {
        format!("{}m ago", elapsed / MS_PER_MINUTE)
    } else if elapsed < MS_PER_DAY {
        format!("{}h ago", elapsed / MS_PER_HOUR)
    } else if elapsed < MS_PER_WEEK {
        format!("{}d ago", elapsed / MS_PER_DAY)
    } else {
        format_utc_date(then_ms)
    }
}

/// `YYYY-MM-DD` in UTC from epoch milliseconds.
fn format_utc_date(ms: u64) -> String {
    let (year, month, day) = civil_from_days((ms / MS_PER_DAY) as i64);
    format!("{year:04}-{month:02}-{day:02}")
}

/// Full `YYYY-MM-DD HH:MM:SS UTC` timestamp for detail views.
pub fn format_utc(ms: u64) -> String {
    let secs_of_day = (ms / 1000) % 86_400;
    let (year, month, day) = civil_from_days((ms / MS_PER_DAY) as i64);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02} UTC",
        secs_of_day / 3600,
        (secs_of_day / 60) % 60,
        secs_of_day % 60,
    )
}

// Howard Hinnant's civil-from-days: days since 1970-01-01 to (y, m, d).
fn civil_from_days(z: i64) -> (i64, u32, u32) {
    let z = z + 719_468;
    let era = z.div_euclid(146_097);
    let doe = z.rem_euclid(146_097);
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let y = yoe + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = (doy - (153 * mp + 2) / 5 + 1) as u32;
    let m = if mp < 10 { mp + 3 } else { mp - 9 } as u32;
    (if m <= 2 { y + 1 } else { y }, m, d)
}

fn empty_state() -> String {
    format!(
        r#"<div class="{EMPTY_STATE_CLASS}"><i class="fa fa-bell-slash-o"></i><p>No alerts match the current filters</p></div>"#
    )
}

/// Render the whole filtered view: one fragment per alert in view order,
/// or the empty-state placeholder.
pub fn alert_list(alerts: &[&AlertRecord], now_ms: u64) -> String {
    if alerts.is_empty() {
        return empty_state();
    }
    let mut html = String::new();
    for alert in alerts {
        html.push_str(&alert_item(alert, now_ms));
    }
    html
}

/// One list row. Controls are attribute-addressed (`data-action`,
/// `data-alert-id`) so a delegated listener can dispatch without per-row
/// closures.
pub fn alert_item(alert: &AlertRecord, now_ms: u64) -> String {
    let (sev_tone, sev_label, sev_icon) = severity_meta(alert.kind);
    let (status_tone, status_label, status_icon) = status_meta(alert.status);
    let unread = if alert.status == AlertStatus::Pending {
        " unread"
    } else {
        ""
    };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="alert-item{unread}" data-alert-id="{}"><div class="alert-item-header">"#,
        alert.id
    );
    let _ = write!(
        html,
        r#"<div class="alert-severity-indicator"><i class="fa {sev_icon} text-{sev_tone}"></i></div>"#
    );
    let _ = write!(html, r#"<div class="alert-item-content"><div class="alert-title-row">"#);
    if alert.status == AlertStatus::Pending {
        html.push_str(r#"<span class="alert-unread-dot"></span>"#);
    }
    let _ = write!(
        html,
        r#"<h4 class="alert-title">{}</h4>"#,
        escape_html(&alert.title)
    );
    let _ = write!(
        html,
        r#"<div class="alert-tags"><span class="alert-tag {sev_tone}"><i class="fa {sev_icon}"></i> {sev_label}</span><span class="alert-tag {status_tone}"><i class="fa {status_icon}"></i> {status_label}</span></div></div>"#
    );

    match extract::traffic_info(&alert.message) {
        Some(info) => html.push_str(&traffic_preview(&info)),
        None => {
            let _ = write!(
                html,
                r#"<div class="alert-description"><p>{}</p></div>"#,
                escape_html(&alert.message)
            );
        }
    }

    let _ = write!(
        html,
        r#"<div class="alert-meta-info"><span class="alert-meta-item"><i class="fa fa-clock-o"></i> created {}</span>"#,
        format_relative(alert.created_at_ms, now_ms)
    );
    if let Some(resolved_at) = alert.resolved_at_ms {
        let _ = write!(
            html,
            r#"<span class="alert-meta-item"><i class="fa fa-check"></i> resolved {}</span>"#,
            format_relative(resolved_at, now_ms)
        );
    }
    if let Some(ref ip) = alert.source_ip {
        let _ = write!(
            html,
            r#"<span class="alert-meta-item"><i class="fa fa-server"></i> from {}</span>"#,
            escape_html(ip)
        );
    }
    html.push_str("</div></div>");

    // Action buttons; the resolve shortcut is offered while pending only.
    let _ = write!(
        html,
        r#"<div class="alert-actions"><button class="alert-action-btn primary" data-action="view-detail" data-alert-id="{}" title="view detail"><i class="fa fa-eye"></i></button>"#,
        alert.id
    );
    if alert.status == AlertStatus::Pending {
        let _ = write!(
            html,
            r#"<button class="alert-action-btn success" data-action="mark-resolved" data-alert-id="{}" title="mark resolved"><i class="fa fa-check"></i></button>"#,
            alert.id
        );
    }
    let _ = write!(
        html,
        r#"<button class="alert-action-btn secondary" data-action="copy-info" data-alert-id="{}" title="copy info"><i class="fa fa-copy"></i></button></div>"#,
        alert.id
    );

    html.push_str("</div></div>");
    html
}

fn traffic_preview(info: &TrafficInfo) -> String {
    let mut html = String::from(
        r#"<div class="traffic-preview"><div class="traffic-preview-header"><i class="fa fa-shield text-warning"></i><span class="traffic-preview-title">traffic threat detection</span></div><div class="traffic-preview-content">"#,
    );
    if let Some(ref ip) = info.source_ip {
        let _ = write!(
            html,
            r#"<span class="traffic-preview-item">source <code>{}</code></span>"#,
            escape_html(ip)
        );
    }
    if let Some(ref ip) = info.dest_ip {
        let _ = write!(
            html,
            r#"<span class="traffic-preview-item">dest <code>{}</code></span>"#,
            escape_html(ip)
        );
    }
    if let Some(ref traffic_type) = info.traffic_type {
        let _ = write!(
            html,
            r#"<span class="traffic-preview-item">type {}</span>"#,
            escape_html(traffic_type)
        );
    }
    if let Some(ref verdict) = info.ai_verdict {
        let _ = write!(
            html,
            r#"<span class="traffic-prediction"><span class="alert-tag {}">{}</span></span>"#,
            verdict_tone(verdict),
            escape_html(verdict)
        );
    }
    if let Some(ref payload) = info.request_payload {
        let snippet: String = payload.chars().take(PAYLOAD_SNIPPET_CHARS).collect();
        let ellipsis = if payload.chars().count() > PAYLOAD_SNIPPET_CHARS {
            "…"
        } else {
            ""
        };
        let _ = write!(
            html,
            r#"<div class="traffic-request-preview"><i class="fa fa-code text-danger"></i> payload <code class="traffic-request-snippet">{}{ellipsis}</code></div>"#,
            escape_html(&snippet)
        );
    }
    html.push_str("</div></div>");
    html
}

/// Detail fragment shown in the alert modal.
pub fn alert_detail(alert: &AlertRecord) -> String {
    let (sev_tone, sev_label, _) = severity_meta(alert.kind);
    let (status_tone, status_label, _) = status_meta(alert.status);
    let traffic = extract::traffic_info(&alert.message);

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="alert-detail"><div class="alert-detail-head"><h4>{}</h4><span class="alert-tag {sev_tone}">{sev_label}</span><span class="alert-tag {status_tone}">{status_label}</span></div>"#,
        escape_html(&alert.title)
    );

    if let Some(ref info) = traffic {
        html.push_str(&traffic_card(info));
    }

    html.push_str(r#"<div class="alert-detail-grid">"#);
    if let Some(ref ip) = alert.source_ip {
        let _ = write!(
            html,
            r#"<div class="alert-detail-field"><label>source address</label><p>{}</p></div>"#,
            escape_html(ip)
        );
    }
    if let Some(ref ip) = alert.dest_ip {
        let _ = write!(
            html,
            r#"<div class="alert-detail-field"><label>destination address</label><p>{}</p></div>"#,
            escape_html(ip)
        );
    }
    let _ = write!(
        html,
        r#"<div class="alert-detail-field"><label>created</label><p>{}</p></div>"#,
        format_utc(alert.created_at_ms)
    );
    if let Some(resolved_at) = alert.resolved_at_ms {
        let _ = write!(
            html,
            r#"<div class="alert-detail-field"><label>resolved</label><p>{}</p></div>"#,
            format_utc(resolved_at)
        );
    }
    html.push_str("</div>");

    if traffic.is_none() {
        let _ = write!(
            html,
            r#"<div class="alert-description-box">{}</div>"#,
            escape_html(&alert.message)
        );
    }

    html.push_str(&suggestions(traffic.is_some()));
    html.push_str("</div>");
    html
}

fn traffic_card(info: &TrafficInfo) -> String {
    let mut html = String::from(
        r#"<div class="traffic-info-card"><div class="traffic-info-header"><i class="fa fa-shield text-warning"></i><h5>traffic details</h5></div><div class="traffic-info-grid">"#,
    );
    let fields = [
        ("source IP", info.source_ip.as_deref()),
        ("destination IP", info.dest_ip.as_deref()),
        ("traffic type", info.traffic_type.as_deref()),
    ];
    for (label, value) in fields {
        if let Some(value) = value {
            let _ = write!(
                html,
                r#"<div class="traffic-info-item"><label>{label}</label><p>{}</p></div>"#,
                escape_html(value)
            );
        }
    }
    if let Some(ref verdict) = info.ai_verdict {
        let _ = write!(
            html,
            r#"<div class="traffic-info-item"><label>AI verdict</label><p><span class="alert-tag {}">{}</span></p></div>"#,
            verdict_tone(verdict),
            escape_html(verdict)
        );
    }
    html.push_str("</div>");

    if let Some(ref payload) = info.request_payload {
        let _ = write!(
            html,
            r#"<div class="traffic-request-content"><label>request payload</label><div class="traffic-request-box"><code>{}</code>{}</div></div>"#,
            escape_html(payload),
            threat_block(payload)
        );
    }
    html.push_str("</div>");
    html
}

fn threat_block(payload: &str) -> String {
    let markers = extract::threat_markers(payload);
    if markers.is_empty() {
        return String::new();
    }
    let mut html = String::from(
        r#"<div class="threat-analysis"><p class="threat-analysis-title"><i class="fa fa-exclamation-triangle text-danger"></i> threat signatures found:</p><div class="threat-tags">"#,
    );
    for marker in markers {
        let _ = write!(html, r#"<span class="alert-tag danger">{marker}</span>"#);
    }
    html.push_str("</div></div>");
    html
}

fn suggestions(has_traffic: bool) -> String {
    let items: &[&str] = if has_traffic {
        &[
            "inspect the flow's characteristics and behavior pattern",
            "check the request payload for attack code",
            "look the source IP up against known-bad address lists",
            "consider a blocking rule for similar traffic",
            "verify the issue is gone, then update the alert status",
        ]
    } else {
        &[
            "check the state of the affected components",
            "read the detailed logs to find the root cause",
            "apply the fix appropriate to the alert kind",
            "verify the issue is gone, then update the alert status",
        ]
    };
    let mut html = String::from(
        r#"<div class="alert-suggestions-box"><label>suggested handling</label><ul class="alert-suggestions-list">"#,
    );
    for item in items {
        let _ = write!(html, "<li>{item}</li>");
    }
    html.push_str("</ul></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_alert(status: AlertStatus, message: &str) -> AlertRecord {
        AlertRecord {
            id: 9,
            title: "Suspicious login".to_string(),
            kind: AlertKind::Warning,
            status,
            message: message.to_string(),
            source_ip: Some("203.0.113.9".to_string()),
            dest_ip: None,
            created_at_ms: 1_700_000_000_000,
            resolved_at_ms: None,
        }
    }

    #[test]
    fn empty_view_renders_only_the_empty_state() {
        let html = alert_list(&[], 0);
        assert!(html.contains(EMPTY_STATE_CLASS));
        assert!(!html.contains("alert-item"));
    }

    #[test]
    fn list_concatenates_items_in_view_order() {
        let a = make_alert(AlertStatus::Pending, "first");
        let mut b = make_alert(AlertStatus::Resolved, "second");
        b.id = 10;
        let html = alert_list(&[&a, &b], 1_700_000_100_000);
        let first = html.find(r#"data-alert-id="9""#).unwrap();
        let second = html.find(r#"data-alert-id="10""#).unwrap();
        assert!(first < second);
        assert!(!html.contains(EMPTY_STATE_CLASS));
    }

    #[test]
    fn fields_are_escaped() {
        let mut alert = make_alert(AlertStatus::Pending, "note");
        alert.title = "<script>alert(1)</script>".to_string();
        let html = alert_item(&alert, 0);
        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn resolve_button_only_while_pending() {
        let pending = make_alert(AlertStatus::Pending, "m");
        assert!(alert_item(&pending, 0).contains(r#"data-action="mark-resolved""#));

        let resolved = make_alert(AlertStatus::Resolved, "m");
        assert!(!alert_item(&resolved, 0).contains(r#"data-action="mark-resolved""#));
    }

    #[test]
    fn structured_message_gets_a_traffic_preview() {
        let alert = make_alert(
            AlertStatus::Pending,
            "Source IP: 203.0.113.7 AI Verdict: malicious",
        );
        let html = alert_item(&alert, 0);
        assert!(html.contains("traffic-preview"));
        assert!(html.contains("203.0.113.7"));
        assert!(html.contains(r#"alert-tag danger"#));
        assert!(!html.contains("alert-description"));
    }

    #[test]
    fn plain_message_gets_a_description_block() {
        let alert = make_alert(AlertStatus::Pending, "disk filling up");
        let html = alert_item(&alert, 0);
        assert!(html.contains("alert-description"));
        assert!(!html.contains("traffic-preview"));
    }

    #[test]
    fn payload_snippet_is_truncated() {
        let long_payload = format!("Payload: {}", "x".repeat(120));
        let alert = make_alert(AlertStatus::Pending, &long_payload);
        let html = alert_item(&alert, 0);
        assert!(html.contains('…'));
        assert!(!html.contains(&"x".repeat(60)));
    }

    #[test]
    fn detail_includes_threat_tags_for_hostile_payload() {
        let alert = make_alert(
            AlertStatus::Processing,
            "Payload: <script>eval(document.cookie)</script>",
        );
        let html = alert_detail(&alert);
        assert!(html.contains("threat-analysis"));
        assert!(html.contains("XSS script injection"));
        assert!(html.contains("code execution"));
        // The payload itself is escaped.
        assert!(!html.contains("<script>eval"));
    }

    #[test]
    fn relative_time_buckets() {
        let now = 10 * MS_PER_WEEK;
        assert_eq!(format_relative(now - 30_000, now), "just now");
        assert_eq!(format_relative(now - MS_PER_MINUTE, now), "1m ago");
        assert_eq!(format_relative(now - MS_PER_HOUR, now), "1h ago");
        assert_eq!(format_relative(now - 3 * MS_PER_DAY, now), "3d ago");
        assert!(format_relative(now - 2 * MS_PER_WEEK, now).starts_with("19"));
    }

    #[test]
    fn utc_formatting_known_instant() {
        // 2023-11-14 22:13:20 UTC
        assert_eq!(format_utc(1_700_000_000_000), "2023-11-14 22:13:20 UTC");
        assert_eq!(format_utc(0), "1970-01-01 00:00:00 UTC");
    }

    #[test]
    fn verdict_tones() {
        assert_eq!(verdict_tone("Malicious traffic"), "danger");
        assert_eq!(verdict_tone("suspicious"), "warning");
        assert_eq!(verdict_tone("normal"), "success");
        assert_eq!(verdict_tone("inconclusive"), "primary");
    }
}
