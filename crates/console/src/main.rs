#![forbid(unsafe_code)]

mod cli;
mod commands;

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result, bail};

use adapters::http::HttpBackendGateway;
use cli::{AlertsCommand, Command, ConnectionArgs, FilesCommand, ProfileCommand, RulesCommand};
use domain::alert::entity::AlertStatus;
use infrastructure::config::{ConsoleConfig, LogFormat, LogLevel};
use infrastructure::constants::DEFAULT_CONFIG_PATH;
use infrastructure::logging::init_logging;

fn load_config(path: &str) -> Result<ConsoleConfig> {
    if Path::new(path).exists() {
        return ConsoleConfig::load(Path::new(path))
            .with_context(|| format!("failed to load config from {path}"));
    }
    // The default path is optional; an explicitly given one must exist.
    if path != DEFAULT_CONFIG_PATH {
        bail!("config file not found: {path}");
    }
    Ok(ConsoleConfig::default())
}

fn gateway(conn: &ConnectionArgs, config: &ConsoleConfig) -> Arc<HttpBackendGateway> {
    let url = conn.url.as_deref().unwrap_or(&config.backend.base_url);
    Arc::new(HttpBackendGateway::new(
        url,
        Duration::from_secs(config.backend.timeout_secs),
    ))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = cli::parse();
    let config = load_config(&cli.config)?;
    init_logging(
        cli.log_level.unwrap_or(LogLevel::Info),
        cli.log_format.unwrap_or(LogFormat::Text),
    );
    let output = cli.output;

    match cli.command {
        Command::Version => {
            commands::cmd_version();
            Ok(())
        }

        Command::Alerts(args) => {
            let gateway = gateway(&args.conn, &config);
            match args.command {
                AlertsCommand::List {
                    kind,
                    status,
                    search,
                } => commands::cmd_alerts_list(gateway, output, kind, status, search).await,
                AlertsCommand::Watch { interval } => {
                    commands::cmd_alerts_watch(gateway, interval).await
                }
                AlertsCommand::Show { id } => commands::cmd_alerts_show(gateway, id, output).await,
                AlertsCommand::Process { id } => {
                    commands::cmd_alerts_update(gateway, id, AlertStatus::Processing).await
                }
                AlertsCommand::Resolve { id } => {
                    commands::cmd_alerts_update(gateway, id, AlertStatus::Resolved).await
                }
                AlertsCommand::Copy { id } => commands::cmd_alerts_copy(gateway, id).await,
            }
        }

        Command::Rules(args) => {
            let gateway = gateway(&args.conn, &config);
            match args.command {
                RulesCommand::List { status, search } => {
                    commands::cmd_rules_list(gateway, output, status, search).await
                }
                RulesCommand::Add {
                    name,
                    kind,
                    condition,
                    description,
                } => {
                    commands::cmd_rules_submit(gateway, None, name, kind, condition, description)
                        .await
                }
                RulesCommand::Edit {
                    id,
                    name,
                    kind,
                    condition,
                    description,
                } => {
                    commands::cmd_rules_submit(
                        gateway,
                        Some(id),
                        name,
                        kind,
                        condition,
                        description,
                    )
                    .await
                }
                RulesCommand::Toggle { id } => commands::cmd_rules_toggle(gateway, id).await,
                RulesCommand::Delete { id } => commands::cmd_rules_delete(gateway, id).await,
            }
        }

        Command::Files(args) => {
            let gateway = gateway(&args.conn, &config);
            match args.command {
                FilesCommand::Analyze { paths } => {
                    commands::cmd_files_analyze(gateway, paths, output).await
                }
            }
        }

        Command::Profile(args) => {
            let gateway = gateway(&args.conn, &config);
            match args.command {
                ProfileCommand::Update { fields } => {
                    commands::cmd_profile_update(gateway, fields).await
                }
                ProfileCommand::Avatar { path } => {
                    commands::cmd_profile_avatar(gateway, path).await
                }
                ProfileCommand::Password {
                    current,
                    new,
                    confirm,
                } => commands::cmd_profile_password(gateway, current, new, confirm).await,
            }
        }

        Command::Trend { conn } => {
            let gateway = gateway(&conn, &config);
            commands::cmd_trend(gateway, output).await
        }
    }
}
