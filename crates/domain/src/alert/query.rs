use super::entity::{AlertKind, AlertRecord, AlertStatus};

/// Snapshot of the alert view's filter widgets. A value of `None` (or an
/// empty search term) means "match everything" for that predicate; active
/// predicates are ANDed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AlertFilter {
    pub kind: Option<AlertKind>,
    pub status: Option<AlertStatus>,
    pub search: String,
}

impl AlertFilter {
    /// Check whether an alert passes all active predicates.
    pub fn matches(&self, alert: &AlertRecord) -> bool {
        if let Some(kind) = self.kind
            && alert.kind != kind
        {
            return false;
        }
        if let Some(status) = self.status
            && alert.status != status
        {
            return false;
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            if !alert.searchable_text().contains(&needle) {
                return false;
            }
        }
        true
    }
}

/// Project the data store through the filter. Pure and total: the result
/// is always a subsequence of `alerts` in the original order, recomputed
/// in full on every call and never cached across reloads.
pub fn project<'a>(alerts: &'a [AlertRecord], filter: &AlertFilter) -> Vec<&'a AlertRecord> {
    alerts.iter().filter(|a| filter.matches(a)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_alert(id: u64, kind: AlertKind, status: AlertStatus, title: &str) -> AlertRecord {
        AlertRecord {
            id,
            title: title.to_string(),
            kind,
            status,
            message: format!("details for {title}"),
            source_ip: Some("192.168.1.50".to_string()),
            dest_ip: None,
            created_at_ms: 1_700_000_000_000 + id,
            resolved_at_ms: None,
        }
    }

    fn store() -> Vec<AlertRecord> {
        vec![
            make_alert(1, AlertKind::Danger, AlertStatus::Pending, "SQL injection attempt"),
            make_alert(2, AlertKind::Warning, AlertStatus::Processing, "High CPU usage"),
            make_alert(3, AlertKind::Info, AlertStatus::Resolved, "Backup finished"),
            make_alert(4, AlertKind::Danger, AlertStatus::Resolved, "Port scan"),
        ]
    }

    #[test]
    fn empty_filter_is_identity() {
        let alerts = store();
        let view = project(&alerts, &AlertFilter::default());
        assert_eq!(view.len(), alerts.len());
        for (projected, original) in view.iter().zip(alerts.iter()) {
            assert_eq!(projected.id, original.id);
        }
    }

    #[test]
    fn projection_preserves_order() {
        let alerts = store();
        let filter = AlertFilter {
            kind: Some(AlertKind::Danger),
            ..Default::default()
        };
        let view = project(&alerts, &filter);
        let ids: Vec<u64> = view.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn projection_is_a_subsequence() {
        let alerts = store();
        let filter = AlertFilter {
            status: Some(AlertStatus::Resolved),
            ..Default::default()
        };
        let view = project(&alerts, &filter);
        let mut last_index = 0;
        for projected in view {
            let index = alerts.iter().position(|a| a.id == projected.id).unwrap();
            assert!(index >= last_index);
            last_index = index;
        }
    }

    #[test]
    fn search_is_case_insensitive() {
        let alerts = store();
        let upper = AlertFilter {
            search: "SQL".to_string(),
            ..Default::default()
        };
        let lower = AlertFilter {
            search: "sql".to_string(),
            ..Default::default()
        };
        let a: Vec<u64> = project(&alerts, &upper).iter().map(|x| x.id).collect();
        let b: Vec<u64> = project(&alerts, &lower).iter().map(|x| x.id).collect();
        assert_eq!(a, b);
        assert_eq!(a, vec![1]);
    }

    #[test]
    fn search_covers_source_ip() {
        let alerts = store();
        let filter = AlertFilter {
            search: "192.168.1.50".to_string(),
            ..Default::default()
        };
        assert_eq!(project(&alerts, &filter).len(), alerts.len());
    }

    #[test]
    fn predicates_are_anded() {
        let alerts = store();
        let filter = AlertFilter {
            kind: Some(AlertKind::Danger),
            status: Some(AlertStatus::Resolved),
            search: "port".to_string(),
        };
        let view = project(&alerts, &filter);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].id, 4);
    }

    #[test]
    fn no_match_yields_empty_view() {
        let alerts = store();
        let filter = AlertFilter {
            search: "nonexistent".to_string(),
            ..Default::default()
        };
        assert!(project(&alerts, &filter).is_empty());
    }
}
