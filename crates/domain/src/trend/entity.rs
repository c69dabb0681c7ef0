use serde::{Deserialize, Serialize};

/// Chart bootstrap payload for the dashboard traffic-trend graph: one
/// label per bucket plus the total and white-traffic series.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TrendSeries {
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(default)]
    pub total_traffic: Vec<f64>,
    #[serde(default)]
    pub white_traffic: Vec<f64>,
}

impl TrendSeries {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// Iterate aligned buckets; series shorter than the label list yield
    /// zero for the missing points.
    pub fn buckets(&self) -> impl Iterator<Item = (&str, f64, f64)> {
        self.labels.iter().enumerate().map(|(i, label)| {
            (
                label.as_str(),
                self.total_traffic.get(i).copied().unwrap_or(0.0),
                self.white_traffic.get(i).copied().unwrap_or(0.0),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_align_and_pad_short_series() {
        let trend = TrendSeries {
            labels: vec!["00:00".to_string(), "01:00".to_string()],
            total_traffic: vec![10.0],
            white_traffic: vec![8.0, 7.0],
        };
        let buckets: Vec<_> = trend.buckets().collect();
        assert_eq!(buckets[0], ("00:00", 10.0, 8.0));
        assert_eq!(buckets[1], ("01:00", 0.0, 7.0));
    }

    #[test]
    fn decodes_the_wire_shape() {
        let json = r#"{"labels":["mon"],"total_traffic":[1.5],"white_traffic":[0.5]}"#;
        let trend: TrendSeries = serde_json::from_str(json).unwrap();
        assert!(!trend.is_empty());
    }
}
