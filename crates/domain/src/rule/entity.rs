use serde::{Deserialize, Serialize};

/// What a white-traffic rule matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RuleKind {
    Ip,
    Domain,
    Port,
    Protocol,
}

impl RuleKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ip => "ip",
            Self::Domain => "domain",
            Self::Port => "port",
            Self::Protocol => "protocol",
        }
    }

    /// Human label for the kind tag.
    pub fn label(self) -> &'static str {
        match self {
            Self::Ip => "IP address",
            Self::Domain => "domain",
            Self::Port => "port",
            Self::Protocol => "protocol",
        }
    }

    /// Placeholder hint shown in the condition input for this kind.
    pub fn condition_hint(self) -> &'static str {
        match self {
            Self::Ip => "e.g. 192.168.1.0/24 or 10.0.0.1",
            Self::Domain => "e.g. *.example.com or api.example.com",
            Self::Port => "e.g. 80 or 443-8080",
            Self::Protocol => "e.g. TCP or UDP",
        }
    }
}

/// One white-traffic rule as delivered by the backend. `is_own` gates
/// which controls are rendered for the current viewer; it is a UI
/// convenience only, the server enforces real authorization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub id: u64,
    pub name: String,
    #[serde(rename = "rule_type")]
    pub kind: RuleKind,
    #[serde(rename = "rule_value")]
    pub condition: String,
    #[serde(rename = "is_active")]
    pub enabled: bool,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub creator_name: String,
    #[serde(default, rename = "is_own_rule")]
    pub is_own: bool,
}

/// Form payload for creating or editing a rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleDraft {
    pub name: String,
    pub kind: RuleKind,
    pub condition: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_deserializes_from_wire_names() {
        let json = r#"{
            "id": 12,
            "name": "office subnet",
            "rule_type": "ip",
            "rule_value": "192.168.10.0/24",
            "is_active": true,
            "created_at": "2026-07-30 09:15:00",
            "creator_name": "ops",
            "is_own_rule": true
        }"#;
        let rule: RuleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(rule.kind, RuleKind::Ip);
        assert_eq!(rule.condition, "192.168.10.0/24");
        assert!(rule.enabled);
        assert!(rule.is_own);
        assert_eq!(rule.description, "");
    }

    #[test]
    fn ownership_defaults_to_false() {
        let json = r#"{
            "id": 1,
            "name": "n",
            "rule_type": "port",
            "rule_value": "443",
            "is_active": false
        }"#;
        let rule: RuleRecord = serde_json::from_str(json).unwrap();
        assert!(!rule.is_own);
        assert!(rule.creator_name.is_empty());
    }

    #[test]
    fn kind_labels() {
        assert_eq!(RuleKind::Ip.label(), "IP address");
        assert_eq!(RuleKind::Protocol.as_str(), "protocol");
    }

    #[test]
    fn every_kind_has_a_condition_hint() {
        for kind in [RuleKind::Ip, RuleKind::Domain, RuleKind::Port, RuleKind::Protocol] {
            assert!(kind.condition_hint().starts_with("e.g."));
        }
    }
}
