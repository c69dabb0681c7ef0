use super::entity::RuleRecord;

/// Snapshot of the rule view's filter widgets. Search matches name and
/// condition; the status filter matches the enabled flag exactly.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleFilter {
    pub enabled: Option<bool>,
    pub search: String,
}

impl RuleFilter {
    pub fn matches(&self, rule: &RuleRecord) -> bool {
        if let Some(enabled) = self.enabled
            && rule.enabled != enabled
        {
            return false;
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !rule.name.to_lowercase().contains(&needle)
                && !rule.condition.to_lowercase().contains(&needle)
            {
                return false;
            }
        }
        true
    }
}

/// Order-preserving projection of the rule store through the filter.
pub fn project<'a>(rules: &'a [RuleRecord], filter: &RuleFilter) -> Vec<&'a RuleRecord> {
    rules.iter().filter(|r| filter.matches(r)).collect()
}
