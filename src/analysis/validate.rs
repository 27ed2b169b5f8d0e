// Schema validation and group splitting
//
// Turns a loosely-typed `Dataset` into a `GroupAssignment`:
// 1. Both columns must exist (SchemaError)
// 2. Rows missing either cell are dropped (EmptyDataset if none remain)
// 3. Metric cells are coerced to finite f64, failures dropped (EmptyDataset)
// 4. Exactly two distinct labels must remain (GroupCardinality)
// 5. The smaller label becomes A (control), the larger B (variant)

use crate::analysis::sample::{GroupAssignment, Sample};
use crate::dataset::Dataset;
use crate::error::{AnalysisError, Result};
use tracing::debug;

/// Parse a cell as a finite number, ignoring surrounding whitespace
pub fn parse_numeric(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Validate the dataset and split the metric column into control/variant samples
///
/// Each sample keeps the relative row order of its group.
///
/// # Example
/// ```
/// use abtest::{split_groups, Dataset};
///
/// let ds = Dataset::from_csv_str("group,revenue\nvariant,12\ncontrol,10\ncontrol,11\nvariant,13\n").unwrap();
/// let groups = split_groups(&ds, "group", "revenue").unwrap();
/// assert_eq!(groups.a_label, "control");
/// assert_eq!(groups.a.values(), &[10.0, 11.0]);
/// assert_eq!(groups.b.values(), &[12.0, 13.0]);
/// ```
pub fn split_groups(dataset: &Dataset, group_col: &str, value_col: &str) -> Result<GroupAssignment> {
    let (group_idx, value_idx) = match (
        dataset.column_index(group_col),
        dataset.column_index(value_col),
    ) {
        (Some(g), Some(v)) => (g, v),
        (g, v) => {
            let mut missing = Vec::new();
            if g.is_none() {
                missing.push(group_col.to_string());
            }
            if v.is_none() && !missing.iter().any(|m| m == value_col) {
                missing.push(value_col.to_string());
            }
            return Err(AnalysisError::Schema { missing });
        }
    };

    let present: Vec<(&str, &str)> = dataset
        .rows()
        .iter()
        .filter_map(|row| Some((row[group_idx].as_deref()?, row[value_idx].as_deref()?)))
        .collect();
    if present.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            stage: "after dropping missing values",
        });
    }

    let numeric: Vec<(&str, f64)> = present
        .iter()
        .filter_map(|&(label, raw)| Some((label, parse_numeric(raw)?)))
        .collect();
    if numeric.is_empty() {
        return Err(AnalysisError::EmptyDataset {
            stage: "after numeric coercion",
        });
    }
    debug!(
        total = dataset.len(),
        missing = dataset.len() - present.len(),
        non_numeric = present.len() - numeric.len(),
        kept = numeric.len(),
        "Cleaned metric column '{}'",
        value_col
    );

    let (in_a, a_label, b_label) = assign_labels(group_col, &numeric)?;

    let mut a = Vec::new();
    let mut b = Vec::new();
    for (&(_, value), is_a) in numeric.iter().zip(in_a) {
        if is_a {
            a.push(value);
        } else {
            b.push(value);
        }
    }

    debug!(
        a_label = %a_label,
        b_label = %b_label,
        n_a = a.len(),
        n_b = b.len(),
        "Assigned groups"
    );

    Ok(GroupAssignment {
        a_label,
        b_label,
        a: Sample::new(a)?,
        b: Sample::new(b)?,
    })
}

/// Distinct labels in group order, plus each row's position in that order
///
/// Labels are compared numerically when every label parses as a number,
/// so "9" sorts before "10" and "1" equals "1.0". Otherwise they compare
/// as strings.
pub(crate) fn order_labels(labels: &[&str]) -> (Vec<String>, Vec<usize>) {
    let numeric_keys: Option<Vec<f64>> = labels.iter().map(|label| parse_numeric(label)).collect();

    match numeric_keys {
        Some(keys) => {
            let mut distinct = keys.clone();
            distinct.sort_by(f64::total_cmp);
            distinct.dedup_by(|x, y| x == y);

            // Numeric groups are named by their first spelling in the data
            let names = distinct
                .iter()
                .map(|&key| {
                    labels
                        .iter()
                        .zip(&keys)
                        .find(|(_, k)| **k == key)
                        .map(|(label, _)| label.trim().to_string())
                        .unwrap_or_else(|| key.to_string())
                })
                .collect();
            let positions = keys
                .iter()
                .map(|k| distinct.partition_point(|d| d < k))
                .collect();
            (names, positions)
        }
        None => {
            let mut distinct: Vec<&str> = labels.to_vec();
            distinct.sort_unstable();
            distinct.dedup();

            let positions = labels
                .iter()
                .map(|label| distinct.partition_point(|d| d < label))
                .collect();
            (distinct.into_iter().map(str::to_string).collect(), positions)
        }
    }
}

/// Decide which rows belong to A; returns the per-row flags and both labels
fn assign_labels(group_col: &str, rows: &[(&str, f64)]) -> Result<(Vec<bool>, String, String)> {
    let labels: Vec<&str> = rows.iter().map(|(label, _)| *label).collect();
    let (distinct, positions) = order_labels(&labels);

    let [a_label, b_label]: [String; 2] = distinct.try_into().map_err(|found: Vec<String>| {
        AnalysisError::GroupCardinality {
            column: group_col.to_string(),
            found: found.len(),
        }
    })?;

    let in_a = positions.iter().map(|&p| p == 0).collect();
    Ok((in_a, a_label, b_label))
}
