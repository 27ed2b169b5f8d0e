//! Key-metrics panel for quick dataset inspection
//!
//! Independent of the analysis engine: any number of groups, simple means and
//! counts only, and a B-vs-A lift line when groups literally named `A` and `B`
//! exist.

use crate::analysis::{order_labels, parse_numeric};
use crate::analysis::statistics::{mean, relative_lift};
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Count and mean for one group label
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupSummary {
    pub label: String,
    pub n: usize,
    pub mean: f64,
}

/// Dataset-level KPIs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSummary {
    pub metric: String,
    pub total_rows: usize,
    pub metric_total: f64,
    /// Ordered like the analysis engine orders group labels
    pub groups: Vec<GroupSummary>,
    /// (mean_B - mean_A) / mean_A when both labels exist and mean_A != 0
    pub lift: Option<f64>,
}

impl DashboardSummary {
    /// Summarize `metric_col` per value of `group_col`
    ///
    /// Rows with a missing group, a missing metric, or a non-numeric metric
    /// are dropped first.
    pub fn from_dataset(dataset: &Dataset, group_col: &str, metric_col: &str) -> Result<Self> {
        let missing: Vec<String> = [group_col, metric_col]
            .iter()
            .filter(|c| !dataset.has_column(c))
            .map(|c| c.to_string())
            .collect();
        let (Some(groups), Some(values)) = (dataset.column(group_col), dataset.column(metric_col))
        else {
            return Err(AnalysisError::Schema { missing });
        };

        let mut labels = Vec::new();
        let mut kept = Vec::new();
        for (label, raw) in groups.zip(values) {
            if let (Some(label), Some(value)) = (label, raw.and_then(parse_numeric)) {
                labels.push(label);
                kept.push(value);
            }
        }
        let total_rows = kept.len();
        let metric_total: f64 = kept.iter().sum();

        let (names, positions) = order_labels(&labels);
        let mut by_group = vec![Vec::new(); names.len()];
        for (&position, value) in positions.iter().zip(kept) {
            by_group[position].push(value);
        }

        let group_mean = |name: &str| {
            names
                .iter()
                .position(|n| n == name)
                .map(|i| mean(&by_group[i]))
        };
        let lift = match (group_mean("A"), group_mean("B")) {
            (Some(a), Some(b)) => relative_lift(a, b),
            _ => None,
        };

        let groups: Vec<GroupSummary> = names
            .into_iter()
            .zip(&by_group)
            .map(|(label, values)| GroupSummary {
                label,
                n: values.len(),
                mean: mean(values),
            })
            .collect();

        Ok(Self {
            metric: metric_col.to_string(),
            total_rows,
            metric_total,
            groups,
            lift,
        })
    }

    /// Monospace KPI panel
    pub fn render(&self) -> String {
        let mut lines = vec![
            "Key Metrics".to_string(),
            "-----------".to_string(),
            format!("Total Rows: {}", self.total_rows),
            format!("Total {}: {:.2}", self.metric, self.metric_total),
            String::new(),
            "Per-Group".to_string(),
            "---------".to_string(),
        ];
        for group in &self.groups {
            lines.push(format!("{}: n={}, mean={:.2}", group.label, group.n, group.mean));
        }
        if let Some(lift) = self.lift {
            lines.push(String::new());
            lines.push(format!("Lift (B vs A): {:.2}%", lift * 100.0));
        }

        let mut panel = lines.join("\n");
        panel.push('\n');
        panel
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_with_ab_labels() {
        let ds = Dataset::from_csv_str("group,revenue\nB,12\nA,10\nA,11\nB,14\nA,\n").unwrap();
        let summary = DashboardSummary::from_dataset(&ds, "group", "revenue").unwrap();

        assert_eq!(summary.total_rows, 4);
        assert_eq!(summary.metric_total, 47.0);
        assert_eq!(summary.groups[0].label, "A");
        assert_eq!(summary.groups[0].n, 2);
        assert_eq!(summary.groups[0].mean, 10.5);
        assert_eq!(summary.groups[1].mean, 13.0);
        assert!((summary.lift.unwrap() - 2.5 / 10.5).abs() < 1e-12);
    }

    #[test]
    fn test_many_groups_without_lift() {
        let ds = Dataset::from_csv_str("arm,v\nx,1\ny,2\nz,3\nz,abc\n").unwrap();
        let summary = DashboardSummary::from_dataset(&ds, "arm", "v").unwrap();
        assert_eq!(summary.groups.len(), 3);
        assert_eq!(summary.total_rows, 3);
        assert_eq!(summary.lift, None);
    }

    #[test]
    fn test_numeric_labels_ordered_like_engine() {
        let ds = Dataset::from_csv_str("arm,v\n10,1\n9,2\n10,3\n9,4\n").unwrap();
        let summary = DashboardSummary::from_dataset(&ds, "arm", "v").unwrap();
        let labels: Vec<_> = summary.groups.iter().map(|g| g.label.as_str()).collect();
        assert_eq!(labels, vec!["9", "10"]);
        assert_eq!(summary.groups[0].mean, 3.0);

        let engine = crate::analysis::split_groups(&ds, "arm", "v").unwrap();
        assert_eq!(engine.a_label, summary.groups[0].label);
    }

    #[test]
    fn test_zero_control_mean_has_no_lift() {
        let ds = Dataset::from_csv_str("g,v\nA,0\nB,5\n").unwrap();
        let summary = DashboardSummary::from_dataset(&ds, "g", "v").unwrap();
        assert_eq!(summary.lift, None);
    }

    #[test]
    fn test_missing_columns() {
        let ds = Dataset::from_csv_str("g,v\nA,1\n").unwrap();
        match DashboardSummary::from_dataset(&ds, "group", "v") {
            Err(AnalysisError::Schema { missing }) => assert_eq!(missing, vec!["group"]),
            other => panic!("Expected Schema error, got {:?}", other),
        }
    }

    #[test]
    fn test_render_panel() {
        let ds = Dataset::from_csv_str("group,revenue\nA,10\nB,12\n").unwrap();
        let panel = DashboardSummary::from_dataset(&ds, "group", "revenue")
            .unwrap()
            .render();
        assert!(panel.contains("Total Rows: 2"));
        assert!(panel.contains("Total revenue: 22.00"));
        assert!(panel.contains("A: n=1, mean=10.00"));
        assert!(panel.contains("Lift (B vs A): 20.00%"));
    }
}
