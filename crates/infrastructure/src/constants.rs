use std::time::Duration;

// ── Backend defaults ───────────────────────────────────────────────

pub const DEFAULT_CONFIG_PATH: &str = "/etc/whitewatch/config.yaml";
pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

// ── View timings ───────────────────────────────────────────────────

/// How often the alert view re-polls the backend.
pub const ALERT_POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Quiet window applied to table search input.
pub const SEARCH_DEBOUNCE_MS: u64 = 300;

/// How long a toast stays on screen.
pub const TOAST_DURATION: Duration = Duration::from_secs(3);
