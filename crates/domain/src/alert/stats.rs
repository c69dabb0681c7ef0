use super::entity::{AlertRecord, AlertStatus};

pub const MS_PER_DAY: u64 = 86_400_000;

/// Counters for the stat tiles above the alert list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AlertStats {
    pub pending: usize,
    pub processing: usize,
    pub resolved: usize,
    /// Alerts created on the same UTC day as `now_ms`.
    pub today: usize,
}

impl AlertStats {
    pub fn compute(alerts: &[AlertRecord], now_ms: u64) -> Self {
        let today = now_ms / MS_PER_DAY;
        let mut stats = Self::default();
        for alert in alerts {
            match alert.status {
                AlertStatus::Pending => stats.pending += 1,
                AlertStatus::Processing => stats.processing += 1,
                AlertStatus::Resolved => stats.resolved += 1,
            }
            if alert.created_at_ms / MS_PER_DAY == today {
                stats.today += 1;
            }
        }
        stats
    }
}
