use serde::{Deserialize, Serialize};

/// Alert class as reported by the backend. Maps onto the displayed
/// severity: `danger` is high, `warning` is medium, `info` is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertKind {
    Danger,
    Warning,
    Info,
    /// Catch-all for kinds this build does not know yet; rendered with
    /// neutral styling instead of failing the whole envelope.
    #[serde(other)]
    Unknown,
}

impl AlertKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Danger => "danger",
            Self::Warning => "warning",
            Self::Info => "info",
            Self::Unknown => "unknown",
        }
    }

    /// Severity label shown in tags and copy-out text.
    pub fn severity_label(self) -> &'static str {
        match self {
            Self::Danger => "high",
            Self::Warning => "medium",
            Self::Info => "low",
            Self::Unknown => "unknown",
        }
    }
}

/// Triage status. Transitions are monotonic: `pending → processing →
/// resolved`, with `resolved` terminal for the UI. The server remains the
/// authority; this type only refuses transitions the UI must not offer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertStatus {
    Pending,
    Processing,
    Resolved,
}

impl AlertStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Resolved => "resolved",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Resolved)
    }

    /// Whether the UI may offer a transition from `self` to `next`.
    pub fn can_become(self, next: Self) -> bool {
        match (self, next) {
            (Self::Pending, Self::Processing | Self::Resolved) => true,
            (Self::Processing, Self::Resolved) => true,
            _ => false,
        }
    }
}

impl std::fmt::Display for AlertStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One alert as held in the view's data store. Instances are treated as
/// immutable between loads except for the narrow status patch applied
/// after a successful update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertRecord {
    pub id: u64,
    pub title: String,
    #[serde(rename = "alert_type")]
    pub kind: AlertKind,
    pub status: AlertStatus,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_ip: Option<String>,
    /// Creation time, milliseconds since the Unix epoch.
    pub created_at_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_at_ms: Option<u64>,
}

impl AlertRecord {
    /// Concatenation of the searchable fields, lowercased. The free-text
    /// search predicate matches against this.
    pub fn searchable_text(&self) -> String {
        let mut text = String::with_capacity(
            self.title.len() + self.message.len() + 32,
        );
        text.push_str(&self.title);
        text.push(' ');
        text.push_str(&self.message);
        if let Some(ref ip) = self.source_ip {
            text.push(' ');
            text.push_str(ip);
        }
        if let Some(ref ip) = self.dest_ip {
            text.push(' ');
            text.push_str(ip);
        }
        text.to_lowercase()
    }
}
