use serde::{Deserialize, Serialize};

/// A file staged for analysis, with its payload held in memory until the
/// analysis request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagedFile {
    pub name: String,
    pub mime: Option<String>,
    pub data: Vec<u8>,
}

impl StagedFile {
    pub fn size_bytes(&self) -> u64 {
        self.data.len() as u64
    }
}

/// Per-file outcome of the backend's analysis. `error` set means this
/// file failed server-side; the remaining fields are then meaningless.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default)]
    pub is_white_traffic: bool,
    /// Model confidence, 0.0 to 1.0.
    #[serde(default)]
    pub confidence: f64,
    /// Risk score, 0 to 100.
    #[serde(default)]
    pub risk_score: u32,
    #[serde(default)]
    pub risk_factors: Vec<String>,
    #[serde(rename = "type", default)]
    pub file_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl AnalysisResult {
    pub fn band(&self) -> RiskBand {
        RiskBand::from_score(self.risk_score)
    }
}

/// Severity band a risk score falls into. Cut-offs: 50 and above is high,
/// 30 and above is medium, anything below is low.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Medium,
    High,
}

impl RiskBand {
    pub fn from_score(score: u32) -> Self {
        if score >= 50 {
            Self::High
        } else if score >= 30 {
            Self::Medium
        } else {
            Self::Low
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "low risk",
            Self::Medium => "medium risk",
            Self::High => "high risk",
        }
    }

    /// Styling tone used by the result card renderer.
    pub fn tone(self) -> &'static str {
        match self {
            Self::Low => "success",
            Self::Medium => "warning",
            Self::High => "danger",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn band_boundaries_sit_at_30_and_50() {
        assert_eq!(RiskBand::from_score(0), RiskBand::Low);
        assert_eq!(RiskBand::from_score(29), RiskBand::Low);
        assert_eq!(RiskBand::from_score(30), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(49), RiskBand::Medium);
        assert_eq!(RiskBand::from_score(50), RiskBand::High);
        assert_eq!(RiskBand::from_score(100), RiskBand::High);
    }

    #[test]
    fn result_deserializes_with_wire_type_field() {
        let json = r#"{
            "filename": "invoice.pdf",
            "is_white_traffic": true,
            "confidence": 0.85,
            "risk_score": 12,
            "risk_factors": [],
            "type": "application/pdf",
            "details": "clean document, no embedded scripts"
        }"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.file_type, "application/pdf");
        assert_eq!(result.band(), RiskBand::Low);
        assert!(result.error.is_none());
    }

    #[test]
    fn error_result_needs_only_filename() {
        let json = r#"{"filename": "broken.bin", "error": "unreadable archive"}"#;
        let result: AnalysisResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.error.as_deref(), Some("unreadable archive"));
        assert_eq!(result.risk_score, 0);
    }

    #[test]
    fn staged_file_size_reflects_payload() {
        let file = StagedFile {
            name: "a.txt".to_string(),
            mime: Some("text/plain".to_string()),
            data: vec![0u8; 42],
        };
        assert_eq!(file.size_bytes(), 42);
    }
}
