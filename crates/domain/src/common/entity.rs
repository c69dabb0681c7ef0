use serde::{Deserialize, Serialize};

/// Severity of a transient user-facing notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Notice {
    Success,
    Error,
    Warning,
    Info,
}

impl Notice {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notice_as_str() {
        assert_eq!(Notice::Success.as_str(), "success");
        assert_eq!(Notice::Error.as_str(), "error");
        assert_eq!(Notice::Warning.as_str(), "warning");
        assert_eq!(Notice::Info.as_str(), "info");
    }

    #[test]
    fn notice_display_matches_as_str() {
        assert_eq!(format!("{}", Notice::Error), "error");
    }

    #[test]
    fn notice_serializes_lowercase() {
        let json = serde_json::to_string(&Notice::Warning).unwrap();
        assert_eq!(json, "\"warning\"");
    }
}
