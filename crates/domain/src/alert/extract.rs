use std::sync::OnceLock;

use regex::Regex;

/// Structured fields mined from a free-text alert message.
///
/// Populated best-effort: each field is present only if its labelled
/// pattern matched somewhere in the text. A message with no recognized
/// labels is not an error, it is simply unstructured.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrafficInfo {
    pub source_ip: Option<String>,
    pub dest_ip: Option<String>,
    pub traffic_type: Option<String>,
    pub ai_verdict: Option<String>,
    pub request_payload: Option<String>,
}

fn regex(cell: &'static OnceLock<Regex>, pattern: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(pattern).expect("static pattern"))
}

// Labels accept `:` or `：` so mixed-locale alert text still mines.
// The value patterns require at least one non-space character, which is
// what makes "label present, value empty" count as absent.
fn source_ip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)source\s*ip[:：]\s*([^\s•]+)")
}

fn dest_ip_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)dest(?:ination)?\s*ip[:：]\s*([^\s•]+)")
}

fn traffic_type_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)traffic\s*type[:：]\s*([^\s•]+)")
}

fn ai_verdict_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    regex(&RE, r"(?i)ai\s*verdict[:：]\s*([^\s•]+)")
}

fn payload_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Unlike the token fields, the payload value must start on the label's
    // own line; it then runs to end of line.
    regex(&RE, r"(?i)payload[:：][ \t]*(\S[^\n]*)")
}

fn capture(re: &Regex, text: &str) -> Option<String> {
    re.captures(text)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Mine a raw alert message for traffic fields. Patterns are tried
/// independently and are order-insensitive; returns `None` when nothing
/// matched. Deterministic: the same text always yields the same result.
pub fn traffic_info(message: &str) -> Option<TrafficInfo> {
    let info = TrafficInfo {
        source_ip: capture(source_ip_re(), message),
        dest_ip: capture(dest_ip_re(), message),
        traffic_type: capture(traffic_type_re(), message),
        ai_verdict: capture(ai_verdict_re(), message),
        request_payload: capture(payload_re(), message),
    };

    let any = info.source_ip.is_some()
        || info.dest_ip.is_some()
        || info.traffic_type.is_some()
        || info.ai_verdict.is_some()
        || info.request_payload.is_some();

    any.then_some(info)
}

/// Attack signatures recognized in a request payload, with the label each
/// one renders as.
const THREAT_MARKERS: &[(&str, &str)] = &[
    ("<script>", "XSS script injection"),
    ("alert(", "JavaScript execution"),
    ("../", "path traversal"),
    ("eval(", "code execution"),
];

/// Scan a request payload for known attack signatures. SQL injection is
/// flagged only when both keywords appear, the single words are too common
/// in benign text.
pub fn threat_markers(payload: &str) -> Vec<&'static str> {
    let mut found: Vec<&'static str> = THREAT_MARKERS
        .iter()
        .filter(|(needle, _)| payload.contains(needle))
        .map(|&(_, label)| label)
        .collect();

    if payload.contains("SELECT") && payload.contains("FROM") {
        found.push("SQL injection");
    }

    found
}
