use std::fmt::Write;

use domain::rule::entity::RuleRecord;

use super::EMPTY_STATE_CLASS;
use super::escape::escape_html;

fn empty_state() -> String {
    format!(
        r#"<div class="{EMPTY_STATE_CLASS}"><i class="fa fa-filter"></i><p>No rules match the current filters</p></div>"#
    )
}

/// Render the filtered rule view, or the empty-state placeholder.
pub fn rule_list(rules: &[&RuleRecord]) -> String {
    if rules.is_empty() {
        return empty_state();
    }
    let mut html = String::new();
    for rule in rules {
        html.push_str(&rule_item(rule));
    }
    html
}

/// One rule row. Mutation controls are rendered only for rules the viewer
/// owns; this is a convenience gate, the server still enforces ownership.
pub fn rule_item(rule: &RuleRecord) -> String {
    let state_tag = if rule.enabled {
        r#"<span class="rule-tag enabled">active</span>"#
    } else {
        r#"<span class="rule-tag disabled">disabled</span>"#
    };
    let creator = if rule.creator_name.is_empty() {
        "unknown user"
    } else {
        &rule.creator_name
    };
    let readonly = if rule.is_own { "" } else { " readonly" };

    let mut html = String::new();
    let _ = write!(
        html,
        r#"<div class="rule-item{readonly}" data-rule-id="{}"><div class="rule-header"><div class="rule-info"><div class="rule-title"><h4 class="rule-name">{}</h4>{state_tag}<span class="rule-tag type">{}</span><span class="rule-tag creator">by {}</span></div>"#,
        rule.id,
        escape_html(&rule.name),
        rule.kind.label(),
        escape_html(creator),
    );
    let _ = write!(
        html,
        r#"<p class="rule-condition">matches: {}</p>"#,
        escape_html(&rule.condition)
    );
    if !rule.created_at.is_empty() {
        let _ = write!(
            html,
            r#"<p class="rule-time">created: {}</p>"#,
            escape_html(&rule.created_at)
        );
    }
    html.push_str("</div>");

    html.push_str(r#"<div class="rule-actions">"#);
    if rule.is_own {
        let toggle_label = if rule.enabled { "disable" } else { "enable" };
        let toggle_icon = if rule.enabled { "fa-pause" } else { "fa-play" };
        let _ = write!(
            html,
            r#"<button class="rule-action-btn edit" data-action="edit" data-rule-id="{id}"><i class="fa fa-edit"></i> edit</button><button class="rule-action-btn toggle" data-action="toggle" data-rule-id="{id}"><i class="fa {toggle_icon}"></i> {toggle_label}</button><button class="rule-action-btn delete" data-action="delete" data-rule-id="{id}"><i class="fa fa-trash"></i> delete</button>"#,
            id = rule.id,
        );
    } else {
        html.push_str(
            r#"<span class="rule-no-permission"><i class="fa fa-lock"></i> read only</span>"#,
        );
    }
    html.push_str("</div></div></div>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::rule::entity::RuleKind;

    fn make_rule(id: u64, is_own: bool, enabled: bool) -> RuleRecord {
        RuleRecord {
            id,
            name: "Office subnet".to_string(),
            kind: RuleKind::Ip,
            condition: "192.168.10.0/24".to_string(),
            enabled,
            created_at: "2026-07-30 09:15:00".to_string(),
            description: String::new(),
            creator_name: "ops".to_string(),
            is_own,
        }
    }

    #[test]
    fn empty_view_renders_only_the_empty_state() {
        let html = rule_list(&[]);
        assert!(html.contains(EMPTY_STATE_CLASS));
        assert!(!html.contains("rule-item"));
    }

    #[test]
    fn owned_rule_renders_all_three_controls() {
        let rule = make_rule(5, true, true);
        let html = rule_item(&rule);
        assert!(html.contains(r#"data-action="edit""#));
        assert!(html.contains(r#"data-action="toggle""#));
        assert!(html.contains(r#"data-action="delete""#));
        assert!(html.contains("disable"));
        assert!(!html.contains("rule-no-permission"));
    }

    #[test]
    fn non_owned_rule_renders_no_controls() {
        let rule = make_rule(5, false, true);
        let html = rule_item(&rule);
        assert!(!html.contains("data-action"));
        assert!(html.contains("rule-no-permission"));
        assert!(html.contains("readonly"));
    }

    #[test]
    fn disabled_rule_offers_enable() {
        let html = rule_item(&make_rule(1, true, false));
        assert!(html.contains("enable"));
        assert!(html.contains("fa-play"));
    }

    #[test]
    fn name_and_condition_are_escaped() {
        let mut rule = make_rule(1, true, true);
        rule.name = "<b>bold</b>".to_string();
        rule.condition = "a&b".to_string();
        let html = rule_item(&rule);
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("a&amp;b"));
    }

    #[test]
    fn empty_creator_falls_back() {
        let mut rule = make_rule(1, true, true);
        rule.creator_name = String::new();
        assert!(rule_item(&rule).contains("unknown user"));
    }
}
