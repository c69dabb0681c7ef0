use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use adapters::clock::SystemClock;
use adapters::http::HttpBackendGateway;
use adapters::notify::TracingNotificationSink;
use adapters::surface::BufferSurface;
use application::alerts_service_impl::{self as alerts_view, AlertsAppService};
use application::filedrop_service_impl::{self as filedrop_view, FileDropAppService};
use application::profile_service_impl::ProfileAppService;
use application::render;
use application::rules_service_impl::{self as rules_view, RulesAppService, SubmitOutcome};
use domain::alert::entity::{AlertKind, AlertStatus};
use domain::alert::query::AlertFilter;
use domain::filedrop::entity::StagedFile;
use domain::filedrop::staging;
use domain::profile::entity::ProfileFields;
use ports::secondary::backend_gateway::BackendGateway;
use domain::rule::entity::{RuleDraft, RuleKind};
use domain::rule::query::RuleFilter;
use ports::secondary::clock::Clock;

use crate::cli::OutputFormat;

// ── Shared plumbing ─────────────────────────────────────────────────────

struct AlertView {
    surface: Arc<BufferSurface>,
    service: AlertsAppService,
}

fn alert_view(gateway: Arc<HttpBackendGateway>) -> AlertView {
    let surface = Arc::new(BufferSurface::default());
    let service = AlertsAppService::new(
        gateway,
        surface.clone(),
        Arc::new(TracingNotificationSink),
        Arc::new(SystemClock),
    );
    AlertView { surface, service }
}

struct RuleView {
    surface: Arc<BufferSurface>,
    service: RulesAppService,
}

fn rule_view(gateway: Arc<HttpBackendGateway>) -> RuleView {
    let surface = Arc::new(BufferSurface::default());
    let service = RulesAppService::new(
        gateway,
        surface.clone(),
        Arc::new(TracingNotificationSink),
    );
    RuleView { surface, service }
}

fn parse_alert_kind(text: &str) -> Result<AlertKind> {
    match text.to_lowercase().as_str() {
        "danger" => Ok(AlertKind::Danger),
        "warning" => Ok(AlertKind::Warning),
        "info" => Ok(AlertKind::Info),
        other => bail!("unknown alert kind: {other} (expected danger, warning or info)"),
    }
}

fn parse_alert_status(text: &str) -> Result<AlertStatus> {
    match text.to_lowercase().as_str() {
        "pending" => Ok(AlertStatus::Pending),
        "processing" => Ok(AlertStatus::Processing),
        "resolved" => Ok(AlertStatus::Resolved),
        other => bail!("unknown alert status: {other} (expected pending, processing or resolved)"),
    }
}

fn parse_rule_kind(text: &str) -> Result<RuleKind> {
    match text.to_lowercase().as_str() {
        "ip" => Ok(RuleKind::Ip),
        "domain" => Ok(RuleKind::Domain),
        "port" => Ok(RuleKind::Port),
        "protocol" => Ok(RuleKind::Protocol),
        other => bail!("unknown rule kind: {other} (expected ip, domain, port or protocol)"),
    }
}

fn parse_rule_status(text: &str) -> Result<Option<bool>> {
    match text.to_lowercase().as_str() {
        "enabled" => Ok(Some(true)),
        "disabled" => Ok(Some(false)),
        other => bail!("unknown rule status: {other} (expected enabled or disabled)"),
    }
}

fn yes_no(value: bool) -> &'static str {
    if value { "yes" } else { "no" }
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut shortened: String = text.chars().take(max.saturating_sub(1)).collect();
    shortened.push('…');
    shortened
}

// ── Version ─────────────────────────────────────────────────────────────

pub fn cmd_version() {
    println!("whitewatch {}", env!("CARGO_PKG_VERSION"));
}

// ── Alerts ──────────────────────────────────────────────────────────────

pub async fn cmd_alerts_list(
    gateway: Arc<HttpBackendGateway>,
    output: OutputFormat,
    kind: Option<String>,
    status: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let mut view = alert_view(gateway);
    view.service.load().await?;

    let filter = AlertFilter {
        kind: kind.as_deref().map(parse_alert_kind).transpose()?,
        status: status.as_deref().map(parse_alert_status).transpose()?,
        search: search.unwrap_or_default(),
    };
    view.service.set_filter(filter);

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view.service.projected())?);
        }
        OutputFormat::Html => {
            if let Some(html) = view.surface.content(alerts_view::ALERTS_CONTAINER) {
                println!("{html}");
            }
        }
        OutputFormat::Table => {
            let now_ms = SystemClock.now_ms();
            let alerts = view.service.projected();
            if alerts.is_empty() {
                println!("No alerts match the current filters.");
                return Ok(());
            }
            println!(
                "{:>6}  {:<8}  {:<10}  {:<40}  {:<16}  {:<12}",
                "ID", "SEVERITY", "STATUS", "TITLE", "SOURCE", "CREATED"
            );
            for alert in &alerts {
                println!(
                    "{:>6}  {:<8}  {:<10}  {:<40}  {:<16}  {:<12}",
                    alert.id,
                    alert.kind.severity_label(),
                    alert.status,
                    truncate(&alert.title, 40),
                    alert.source_ip.as_deref().unwrap_or("-"),
                    render::alerts::format_relative(alert.created_at_ms, now_ms),
                );
            }
            let stats = view.service.stats();
            println!(
                "\n{} alert(s) shown, {} pending, {} processing, {} resolved, {} new today.",
                alerts.len(),
                stats.pending,
                stats.processing,
                stats.resolved,
                stats.today,
            );
        }
    }
    Ok(())
}

pub async fn cmd_alerts_watch(gateway: Arc<HttpBackendGateway>, interval_secs: u64) -> Result<()> {
    let mut view = alert_view(gateway);
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs.max(1)));

    println!("watching alerts every {interval_secs}s, ctrl-c to stop");
    loop {
        ticker.tick().await;
        view.service.refresh().await;
        let stats = view.service.stats();
        println!(
            "pending={} processing={} resolved={} today={}",
            stats.pending, stats.processing, stats.resolved, stats.today
        );
    }
}

pub async fn cmd_alerts_show(
    gateway: Arc<HttpBackendGateway>,
    id: u64,
    output: OutputFormat,
) -> Result<()> {
    let mut view = alert_view(gateway);
    view.service.load().await?;

    if output == OutputFormat::Json {
        let alert = view
            .service
            .alerts()
            .iter()
            .find(|a| a.id == id)
            .with_context(|| format!("alert not found: {id}"))?;
        println!("{}", serde_json::to_string_pretty(alert)?);
        return Ok(());
    }

    let fragment = view.service.detail(id)?;
    println!("{fragment}");
    Ok(())
}

pub async fn cmd_alerts_update(
    gateway: Arc<HttpBackendGateway>,
    id: u64,
    status: AlertStatus,
) -> Result<()> {
    let mut view = alert_view(gateway);
    view.service.load().await?;
    view.service.update_status(id, status).await?;

    let actual = view
        .service
        .alerts()
        .iter()
        .find(|a| a.id == id)
        .map(|a| a.status);
    match actual {
        Some(now) if now == status => println!("alert {id} is now {now}"),
        Some(now) => println!("alert {id} unchanged, still {now}"),
        None => println!("alert {id} no longer present"),
    }
    Ok(())
}

pub async fn cmd_alerts_copy(gateway: Arc<HttpBackendGateway>, id: u64) -> Result<()> {
    let mut view = alert_view(gateway);
    view.service.load().await?;
    println!("{}", view.service.copy_info(id)?);
    Ok(())
}

// ── Rules ───────────────────────────────────────────────────────────────

pub async fn cmd_rules_list(
    gateway: Arc<HttpBackendGateway>,
    output: OutputFormat,
    status: Option<String>,
    search: Option<String>,
) -> Result<()> {
    let mut view = rule_view(gateway.clone());
    let rules = gateway.fetch_rules().await?;
    view.service.replace_rules(rules);

    let filter = RuleFilter {
        enabled: match status.as_deref() {
            Some(text) => parse_rule_status(text)?,
            None => None,
        },
        search: search.unwrap_or_default(),
    };
    view.service.set_filter(filter);

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&view.service.projected())?);
        }
        OutputFormat::Html => {
            if let Some(html) = view.surface.content(rules_view::RULES_CONTAINER) {
                println!("{html}");
            }
        }
        OutputFormat::Table => {
            let rules = view.service.projected();
            if rules.is_empty() {
                println!("No rules match the current filters.");
                return Ok(());
            }
            println!(
                "{:>6}  {:<24}  {:<10}  {:<28}  {:<8}  {:<5}",
                "ID", "NAME", "KIND", "CONDITION", "ENABLED", "OWN"
            );
            for rule in &rules {
                println!(
                    "{:>6}  {:<24}  {:<10}  {:<28}  {:<8}  {:<5}",
                    rule.id,
                    truncate(&rule.name, 24),
                    rule.kind.as_str(),
                    truncate(&rule.condition, 28),
                    yes_no(rule.enabled),
                    yes_no(rule.is_own),
                );
            }
            let stats = view.service.stats();
            println!(
                "\n{} rule(s) total, {} active, {} disabled.",
                stats.total, stats.active, stats.disabled
            );
        }
    }
    Ok(())
}

pub async fn cmd_rules_submit(
    gateway: Arc<HttpBackendGateway>,
    edit_id: Option<u64>,
    name: String,
    kind: String,
    condition: String,
    description: String,
) -> Result<()> {
    let mut view = rule_view(gateway.clone());
    if let Some(id) = edit_id {
        let rules = gateway.fetch_rules().await?;
        view.service.replace_rules(rules);
        view.service.begin_edit(id)?;
    }

    let draft = RuleDraft {
        name,
        kind: parse_rule_kind(&kind)?,
        condition,
        description,
    };
    match view.service.submit(draft).await {
        SubmitOutcome::NeedsReload => {
            view.service.reload().await;
            println!("rule saved, {} rule(s) now on record", view.service.rules().len());
            Ok(())
        }
        SubmitOutcome::Rejected => bail!("rule submission rejected by the server"),
    }
}

pub async fn cmd_rules_toggle(gateway: Arc<HttpBackendGateway>, id: u64) -> Result<()> {
    let mut view = rule_view(gateway.clone());
    let rules = gateway.fetch_rules().await?;
    view.service.replace_rules(rules);
    view.service.toggle(id).await?;

    if let Some(rule) = view.service.rules().iter().find(|r| r.id == id) {
        println!(
            "rule {id} is now {}",
            if rule.enabled { "enabled" } else { "disabled" }
        );
    }
    Ok(())
}

pub async fn cmd_rules_delete(gateway: Arc<HttpBackendGateway>, id: u64) -> Result<()> {
    let mut view = rule_view(gateway.clone());
    let rules = gateway.fetch_rules().await?;
    view.service.replace_rules(rules);
    view.service.delete(id).await?;
    println!("{} rule(s) remain", view.service.rules().len());
    Ok(())
}

// ── Files ───────────────────────────────────────────────────────────────

pub async fn cmd_files_analyze(
    gateway: Arc<HttpBackendGateway>,
    paths: Vec<std::path::PathBuf>,
    output: OutputFormat,
) -> Result<()> {
    let surface = Arc::new(BufferSurface::default());
    let mut service = FileDropAppService::new(
        gateway,
        surface.clone(),
        Arc::new(TracingNotificationSink),
    );

    let mut candidates = Vec::new();
    for path in &paths {
        candidates.push(read_staged_file(path)?);
    }
    service.stage(candidates);
    if service.staged().is_empty() {
        bail!("no files were accepted for staging");
    }

    service.analyze().await?;

    match output {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(service.last_results())?);
        }
        OutputFormat::Html => {
            if let Some(html) = surface.content(filedrop_view::RESULTS_CONTAINER) {
                println!("{html}");
            }
        }
        OutputFormat::Table => {
            let results = service.last_results();
            if results.is_empty() {
                println!("No analysis results returned.");
                return Ok(());
            }
            println!(
                "{:<28}  {:<10}  {:<12}  {:>10}  {:>10}",
                "FILE", "VERDICT", "BAND", "CONFIDENCE", "RISK"
            );
            for result in results {
                if let Some(ref error) = result.error {
                    println!("{:<28}  failed: {error}", truncate(&result.filename, 28));
                    continue;
                }
                println!(
                    "{:<28}  {:<10}  {:<12}  {:>9.1}%  {:>10}",
                    truncate(&result.filename, 28),
                    if result.is_white_traffic { "white" } else { "suspicious" },
                    result.band().label(),
                    result.confidence * 100.0,
                    result.risk_score,
                );
            }
        }
    }
    Ok(())
}

fn read_staged_file(path: &Path) -> Result<StagedFile> {
    let data =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .with_context(|| format!("not a file path: {}", path.display()))?;
    let mime = staging::infer_mime(&name).map(str::to_string);
    Ok(StagedFile { name, mime, data })
}

// ── Profile ─────────────────────────────────────────────────────────────

pub async fn cmd_profile_update(
    gateway: Arc<HttpBackendGateway>,
    pairs: Vec<String>,
) -> Result<()> {
    let mut service = ProfileAppService::new(
        gateway,
        Arc::new(TracingNotificationSink),
        ProfileFields::default(),
    );

    service.begin_edit();
    for pair in &pairs {
        let Some((name, value)) = pair.split_once('=') else {
            bail!("expected name=value, got: {pair}");
        };
        service.set_field(name.trim(), value.trim());
    }
    service.save().await;

    if service.editing() {
        bail!("profile update rejected by the server");
    }
    for (name, value) in service.fields().iter() {
        println!("{name}: {value}");
    }
    Ok(())
}

pub async fn cmd_profile_avatar(
    gateway: Arc<HttpBackendGateway>,
    path: std::path::PathBuf,
) -> Result<()> {
    let mut service = ProfileAppService::new(
        gateway,
        Arc::new(TracingNotificationSink),
        ProfileFields::default(),
    );
    let file = read_staged_file(&path)?;
    service.upload_avatar(file).await?;

    match service.avatar_url() {
        Some(url) => println!("avatar updated: {url}"),
        None => bail!("avatar upload rejected by the server"),
    }
    Ok(())
}

pub async fn cmd_profile_password(
    gateway: Arc<HttpBackendGateway>,
    current: String,
    new: String,
    confirm: String,
) -> Result<()> {
    let mut service = ProfileAppService::new(
        gateway,
        Arc::new(TracingNotificationSink),
        ProfileFields::default(),
    );
    service.change_password(&current, &new, &confirm).await?;
    Ok(())
}

// ── Trend ───────────────────────────────────────────────────────────────

pub async fn cmd_trend(gateway: Arc<HttpBackendGateway>, output: OutputFormat) -> Result<()> {
    let trend = gateway.fetch_traffic_trend().await?;

    if output == OutputFormat::Json {
        println!("{}", serde_json::to_string_pretty(&trend)?);
        return Ok(());
    }

    if trend.is_empty() {
        println!("No trend data available.");
        return Ok(());
    }
    println!("{:<12}  {:>12}  {:>12}", "BUCKET", "TOTAL", "WHITE");
    for (label, total, white) in trend.buckets() {
        println!("{label:<12}  {total:>12.1}  {white:>12.1}");
    }
    Ok(())
}
