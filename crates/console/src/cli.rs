use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use infrastructure::config::{LogFormat, LogLevel};
use infrastructure::constants::DEFAULT_CONFIG_PATH;

#[derive(Parser, Debug)]
#[command(
    name = "whitewatch",
    about = "White-traffic monitoring dashboard console",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// Log level override (takes precedence over config file)
    #[arg(short, long)]
    pub log_level: Option<LogLevel>,

    /// Log format: text (default) or json
    #[arg(long)]
    pub log_format: Option<LogFormat>,

    /// Output format
    #[arg(short, long, default_value = "table", global = true)]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format for console commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table (default)
    Table,
    /// The rendered markup fragment, as a page would embed it
    Html,
    /// Raw records as JSON
    Json,
}

/// Connection parameters for reaching the dashboard backend.
#[derive(Args, Debug, Clone)]
pub struct ConnectionArgs {
    /// Backend base URL (overrides the config file)
    #[arg(long, env = "WHITEWATCH_URL")]
    pub url: Option<String>,
}

/// Generic domain args: connection + subcommand.
#[derive(Args, Debug)]
pub struct DomainArgs<T: Subcommand> {
    #[command(flatten)]
    pub conn: ConnectionArgs,

    #[command(subcommand)]
    pub command: T,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Display version information
    Version,

    /// Triage alerts
    Alerts(DomainArgs<AlertsCommand>),

    /// Manage white-traffic rules
    Rules(DomainArgs<RulesCommand>),

    /// Analyze files for white-traffic classification
    Files(DomainArgs<FilesCommand>),

    /// Edit the signed-in profile
    Profile(DomainArgs<ProfileCommand>),

    /// Show the traffic trend series
    Trend {
        #[command(flatten)]
        conn: ConnectionArgs,
    },
}

// ── Alerts ──────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum AlertsCommand {
    /// List alerts, optionally filtered
    List {
        /// Filter by kind: danger, warning, info
        #[arg(long)]
        kind: Option<String>,
        /// Filter by status: pending, processing, resolved
        #[arg(long)]
        status: Option<String>,
        /// Free-text search over title, message and addresses
        #[arg(long)]
        search: Option<String>,
    },
    /// Poll the alert view on an interval and print stat changes
    Watch {
        /// Poll interval in seconds
        #[arg(long, default_value_t = 30)]
        interval: u64,
    },
    /// Show one alert's detail fragment
    Show {
        /// Alert ID
        id: u64,
    },
    /// Mark an alert as processing
    Process {
        /// Alert ID
        id: u64,
    },
    /// Mark an alert as resolved
    Resolve {
        /// Alert ID
        id: u64,
    },
    /// Print an alert's copy-out summary
    Copy {
        /// Alert ID
        id: u64,
    },
}

// ── Rules ───────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum RulesCommand {
    /// List rules, optionally filtered
    List {
        /// Filter by status: enabled or disabled
        #[arg(long)]
        status: Option<String>,
        /// Free-text search over name and condition
        #[arg(long)]
        search: Option<String>,
    },
    /// Create a rule
    Add {
        /// Rule name
        #[arg(long)]
        name: String,
        /// Rule kind: ip, domain, port, protocol
        #[arg(long)]
        kind: String,
        /// Match condition, e.g. 192.168.1.0/24
        #[arg(long)]
        condition: String,
        /// Optional description
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Edit an owned rule
    Edit {
        /// Rule ID
        id: u64,
        #[arg(long)]
        name: String,
        #[arg(long)]
        kind: String,
        #[arg(long)]
        condition: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Toggle an owned rule between enabled and disabled
    Toggle {
        /// Rule ID
        id: u64,
    },
    /// Delete an owned rule
    Delete {
        /// Rule ID
        id: u64,
    },
}

// ── Files ───────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum FilesCommand {
    /// Stage local files and run the AI analysis
    Analyze {
        /// Files to analyze
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
}

// ── Profile ─────────────────────────────────────────────────────────────

#[derive(Subcommand, Debug)]
pub enum ProfileCommand {
    /// Update profile fields given as name=value pairs
    Update {
        /// Fields, e.g. email=a@b.c phone=555-0100
        #[arg(required = true)]
        fields: Vec<String>,
    },
    /// Upload a new avatar image
    Avatar {
        /// Image file (JPG, PNG or GIF, max 5 MB)
        path: PathBuf,
    },
    /// Change the account password
    Password {
        #[arg(long)]
        current: String,
        #[arg(long)]
        new: String,
        #[arg(long)]
        confirm: String,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}
