// Strongly-typed samples produced by input validation
//
// Nothing downstream of validation touches raw cells: every statistic is
// computed from a `Sample`, which is guaranteed non-empty and finite.

use crate::analysis::statistics;
use crate::error::{AnalysisError, Result};
use serde::Serialize;

/// Cleaned metric values for one group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sample(Vec<f64>);

impl Sample {
    /// Wrap values, rejecting empty input and non-finite entries
    pub fn new(values: Vec<f64>) -> Result<Self> {
        if values.is_empty() {
            return Err(AnalysisError::EmptyDataset {
                stage: "in sample",
            });
        }
        if let Some((index, &value)) = values.iter().enumerate().find(|(_, v)| !v.is_finite()) {
            return Err(AnalysisError::NonFiniteValue { index, value });
        }
        Ok(Self(values))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for the `len`/`is_empty` convention
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn mean(&self) -> f64 {
        statistics::mean(&self.0)
    }

    /// Apply a value-wise transform that preserves length and finiteness
    pub(crate) fn map_values(&self, f: impl FnOnce(&[f64]) -> Vec<f64>) -> Self {
        Self(f(&self.0))
    }

    pub fn into_inner(self) -> Vec<f64> {
        self.0
    }
}

/// Control/variant pair after deterministic label assignment
///
/// `a` always belongs to the smaller label (numeric order when every label is
/// numeric, lexicographic otherwise).
#[derive(Debug, Clone, PartialEq)]
pub struct GroupAssignment {
    pub a_label: String,
    pub b_label: String,
    pub a: Sample,
    pub b: Sample,
}
