use super::entity::RuleRecord;

/// Counters for the stat tiles above the rule list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RuleStats {
    pub total: usize,
    pub active: usize,
    pub disabled: usize,
}

impl RuleStats {
    pub fn compute(rules: &[RuleRecord]) -> Self {
        let total = rules.len();
        let active = rules.iter().filter(|r| r.enabled).count();
        Self {
            total,
            active,
            disabled: total - active,
        }
    }
}
