use std::fmt::Write;

use domain::filedrop::entity::{AnalysisResult, StagedFile};
use domain::filedrop::staging::{self, FileCategory};

use super::EMPTY_STATE_CLASS;
use super::escape::escape_html;

fn icon_class(category: FileCategory) -> &'static str {
    match category {
        FileCategory::Image => "fa-file-image-o",
        FileCategory::Video => "fa-file-video-o",
        FileCategory::Audio => "fa-file-audio-o",
        FileCategory::Pdf => "fa-file-pdf-o",
        FileCategory::Word => "fa-file-word-o",
        FileCategory::Excel => "fa-file-excel-o",
        FileCategory::Archive => "fa-file-archive-o",
        FileCategory::Text => "fa-file-text-o",
        FileCategory::Other => "fa-file-o",
    }
}

fn empty_state() -> String {
    format!(
        r#"<div class="{EMPTY_STATE_CLASS}"><i class="fa fa-inbox"></i><p>No files staged, drop some here</p></div>"#
    )
}

/// Render the staging list, or the empty-state placeholder.
pub fn file_list(files: &[StagedFile]) -> String {
    if files.is_empty() {
        return empty_state();
    }
    let mut html = String::new();
    for (index, file) in files.iter().enumerate() {
        html.push_str(&file_item(file, index));
    }
    html
}

fn file_item(file: &StagedFile, index: usize) -> String {
    let icon = icon_class(staging::categorize(file));
    let type_label = file.mime.as_deref().unwrap_or("unknown type");
    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="file-item"><i class="fa {icon}"></i><div class="file-meta"><p class="file-name">{}</p><p class="file-info">{} · {}</p></div><span class="file-status">queued</span><button class="remove-file-btn" data-action="remove-file" data-index="{index}"><i class="fa fa-times"></i></button></div>"#,
        escape_html(&file.name),
        staging::format_size(file.size_bytes()),
        escape_html(type_label),
    );
    html
}

/// Render the analysis result section: header plus one card per file.
pub fn result_cards(results: &[AnalysisResult]) -> String {
    let mut html = String::from(
        r#"<div class="analysis-results"><div class="analysis-results-header"><h3>AI analysis results</h3><span class="status-dot online"></span></div><div class="analysis-results-grid">"#,
    );
    for result in results {
        html.push_str(&result_card(result));
    }
    html.push_str("</div></div>");
    html
}

fn result_card(result: &AnalysisResult) -> String {
    if let Some(ref error) = result.error {
        return format!(
            r#"<div class="result-card failed"><i class="fa fa-exclamation-triangle text-danger"></i><span class="result-verdict text-danger">analysis failed</span><p class="result-filename">{}</p><p class="result-error">{}</p></div>"#,
            escape_html(&result.filename),
            escape_html(error),
        );
    }

    let band = result.band();
    let tone = band.tone();
    let verdict = if result.is_white_traffic {
        "white traffic"
    } else {
        "suspicious traffic"
    };
    let confidence = result.confidence * 100.0;
    let detail_lead = result
        .details
        .as_deref()
        .and_then(|d| d.split([',', '，']).next())
        .unwrap_or("");

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="result-card {tone}"><div class="result-head"><span class="result-verdict text-{tone}">{verdict}</span><span class="result-band">{}</span></div><p class="result-filename">{}</p><div class="result-metrics"><span>{}</span><span>confidence {confidence:.1}%</span><span>risk score {}</span></div>"#,
        band.label(),
        escape_html(&result.filename),
        escape_html(&result.file_type),
        result.risk_score,
    );
    if !detail_lead.is_empty() {
        let _ = write!(
            html,
            r#"<p class="result-details">{}</p>"#,
            escape_html(detail_lead)
        );
    }
    if !result.risk_factors.is_empty() {
        html.push_str(r#"<div class="result-risk-factors">"#);
        for factor in &result.risk_factors {
            let _ = write!(
                html,
                r#"<span class="risk-factor-chip">{}</span>"#,
                escape_html(factor)
            );
        }
        html.push_str("</div>");
    }
    html.push_str("</div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    fn staged(name: &str, mime: Option<&str>, size: usize) -> StagedFile {
        StagedFile {
            name: name.to_string(),
            mime: mime.map(str::to_string),
            data: vec![0u8; size],
        }
    }

    fn clean_result(score: u32) -> AnalysisResult {
        AnalysisResult {
            filename: "invoice.pdf".to_string(),
            error: None,
            is_white_traffic: score < 30,
            confidence: 0.857,
            risk_score: score,
            risk_factors: vec![],
            file_type: "application/pdf".to_string(),
            details: Some("clean document, no embedded scripts".to_string()),
        }
    }

    #[test]
    fn empty_staging_list_renders_empty_state() {
        let html = file_list(&[]);
        assert!(html.contains(EMPTY_STATE_CLASS));
        assert!(!html.contains("file-item"));
    }

    #[test]
    fn file_items_carry_remove_action_and_index() {
        let files = vec![
            staged("a.txt", Some("text/plain"), 1024),
            staged("b.pdf", Some("application/pdf"), 2048),
        ];
        let html = file_list(&files);
        assert!(html.contains(r#"data-action="remove-file" data-index="0""#));
        assert!(html.contains(r#"data-action="remove-file" data-index="1""#));
        assert!(html.contains("1 KB"));
        assert!(html.contains("fa-file-pdf-o"));
    }

    #[test]
    fn file_name_is_escaped() {
        let files = vec![staged("<img src=x>.txt", Some("text/plain"), 1)];
        let html = file_list(&files);
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img"));
    }

    #[test]
    fn result_card_shows_confidence_percent_and_band() {
        let html = result_card(&clean_result(12));
        assert!(html.contains("confidence 85.7%"));
        assert!(html.contains("low risk"));
        assert!(html.contains("white traffic"));
        assert!(html.contains("clean document"));
        // Only the first comma-separated segment of the details is shown.
        assert!(!html.contains("no embedded scripts"));
    }

    #[test]
    fn risky_result_uses_danger_tone() {
        let mut result = clean_result(72);
        result.is_white_traffic = false;
        result.risk_factors = vec!["macro code".to_string(), "obfuscation".to_string()];
        let html = result_card(&result);
        assert!(html.contains("high risk"));
        assert!(html.contains("suspicious traffic"));
        assert!(html.contains("macro code"));
        assert!(html.contains("risk-factor-chip"));
    }

    #[test]
    fn error_result_renders_the_failure_card() {
        let result = AnalysisResult {
            filename: "broken.bin".to_string(),
            error: Some("unreadable archive".to_string()),
            is_white_traffic: false,
            confidence: 0.0,
            risk_score: 0,
            risk_factors: vec![],
            file_type: String::new(),
            details: None,
        };
        let html = result_card(&result);
        assert!(html.contains("analysis failed"));
        assert!(html.contains("unreadable archive"));
        assert!(!html.contains("confidence"));
    }

    #[test]
    fn cards_section_wraps_all_results() {
        let html = result_cards(&[clean_result(10), clean_result(40)]);
        assert!(html.contains("AI analysis results"));
        assert_eq!(html.matches("result-card").count(), 2);
        assert!(html.contains("medium risk"));
    }
}
