//! Immutable parameters for one A/B analysis
//!
//! Loaded from defaults, a named preset, or an `abtest.toml` file:
//!
//! ```toml
//! alpha = 0.05
//! winsor = 0.01
//! n_boot = 5000
//! seed = 42
//! ```

use crate::error::{AnalysisError, Result};
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Configuration for a two-group comparison
///
/// # Example
/// ```
/// use abtest::AnalysisConfig;
///
/// let config = AnalysisConfig::default();
/// assert_eq!(config.alpha, 0.05); // 95% confidence
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Significance level for the Welch verdict and the bootstrap interval
    ///
    /// The bootstrap interval covers `1 - alpha`, so 0.05 gives a 95% CI.
    /// Must lie strictly inside (0, 1).
    pub alpha: f64,

    /// Two-sided winsorization proportion in [0, 0.5)
    ///
    /// 0.0 (default) leaves both samples untouched. 0.01 clips each group's
    /// values to its own 1st and 99th percentiles.
    pub winsor: f64,

    /// Number of bootstrap resamples (must be positive)
    pub n_boot: usize,

    /// Seed for the bootstrap generator
    ///
    /// `None` draws a fresh seed from OS entropy; the seed actually used is
    /// echoed in the result so the run can be reproduced.
    pub seed: Option<u64>,

    /// Minimum number of defined bootstrap lifts needed to form an interval
    pub min_bootstrap_samples: usize,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            alpha: 0.05,
            winsor: 0.0,
            n_boot: 5000,
            seed: Some(42),
            min_bootstrap_samples: 2,
        }
    }
}

impl AnalysisConfig {
    /// Stricter significance and a tighter bootstrap estimate
    pub fn strict() -> Self {
        Self {
            alpha: 0.01,
            n_boot: 10_000,
            ..Self::default()
        }
    }

    /// Fewer resamples for interactive exploration
    pub fn quick() -> Self {
        Self {
            n_boot: 1000,
            ..Self::default()
        }
    }

    /// Load a configuration from a TOML file
    ///
    /// Keys absent from the file keep their default values.
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::from_toml_str(&content)
    }

    /// Load a configuration from a TOML string
    pub fn from_toml_str(content: &str) -> anyhow::Result<Self> {
        toml::from_str(content).context("Failed to parse TOML")
    }

    /// Confidence level of the bootstrap interval (`1 - alpha`)
    pub fn confidence_level(&self) -> f64 {
        1.0 - self.alpha
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if !self.alpha.is_finite() || self.alpha <= 0.0 || self.alpha >= 1.0 {
            return Err(AnalysisError::InvalidConfig(format!(
                "alpha must be in (0, 1), got {}",
                self.alpha
            )));
        }

        if !self.winsor.is_finite() || !(0.0..0.5).contains(&self.winsor) {
            return Err(AnalysisError::InvalidConfig(format!(
                "winsor must be in [0, 0.5), got {}",
                self.winsor
            )));
        }

        if self.n_boot == 0 {
            return Err(AnalysisError::InvalidConfig(
                "n_boot must be a positive integer, got 0".to_string(),
            ));
        }

        if self.min_bootstrap_samples < 2 {
            return Err(AnalysisError::InvalidConfig(format!(
                "min_bootstrap_samples must be >= 2, got {}",
                self.min_bootstrap_samples
            )));
        }

        Ok(())
    }
}
