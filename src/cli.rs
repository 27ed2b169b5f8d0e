//! CLI argument parsing for abtest

use crate::config::AnalysisConfig;
use anyhow::Result;
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Bootstrap resamples used when neither a flag nor a config file sets one
pub const DEFAULT_CLI_BOOTSTRAP: usize = 3000;

/// Output format for the summary report
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Markdown summary (default)
    Markdown,
    /// JSON for machine parsing
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "abtest")]
#[command(version)]
#[command(about = "Two-group A/B test analyzer: Welch, Mann-Whitney and bootstrap lift CI", long_about = None)]
pub struct Cli {
    /// Delimited file with at least a group column and a metric column (.tsv = tab-separated)
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Name of the group column (must have exactly 2 distinct values)
    #[arg(long, value_name = "COL")]
    pub group: String,

    /// Name of the numeric metric column to test
    #[arg(long, value_name = "COL")]
    pub metric: String,

    /// Significance level (default: 0.05)
    #[arg(long, value_name = "ALPHA")]
    pub alpha: Option<f64>,

    /// Two-sided winsorization proportion, e.g. 0.01 (default: 0)
    #[arg(long, value_name = "P")]
    pub winsor: Option<f64>,

    /// Number of bootstrap resamples (default: 3000)
    #[arg(long = "bootstrap", value_name = "N")]
    pub bootstrap: Option<usize>,

    /// Seed for bootstrap resampling (default: 42)
    #[arg(long, value_name = "SEED", conflicts_with = "random_seed")]
    pub seed: Option<u64>,

    /// Draw a fresh bootstrap seed from OS entropy (echoed in the report)
    #[arg(long = "random-seed")]
    pub random_seed: bool,

    /// TOML file with analysis settings; flags override its values
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Report format
    #[arg(long = "format", value_enum, default_value = "markdown")]
    pub format: OutputFormat,

    /// Where to write the report
    #[arg(long, value_name = "PATH", default_value = "ab_summary.md")]
    pub out: PathBuf,

    /// Also write a key-metrics panel for the dataset to this path
    #[arg(long, value_name = "PATH")]
    pub dashboard: Option<PathBuf>,

    /// Enable debug tracing on stderr
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Merge defaults, the optional config file and explicit flags
    pub fn analysis_config(&self) -> Result<AnalysisConfig> {
        let mut config = match &self.config {
            Some(path) => AnalysisConfig::from_file(path)?,
            None => AnalysisConfig {
                n_boot: DEFAULT_CLI_BOOTSTRAP,
                ..AnalysisConfig::default()
            },
        };

        if let Some(alpha) = self.alpha {
            config.alpha = alpha;
        }
        if let Some(winsor) = self.winsor {
            config.winsor = winsor;
        }
        if let Some(n_boot) = self.bootstrap {
            config.n_boot = n_boot;
        }
        if self.random_seed {
            config.seed = None;
        } else if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }

        Ok(config)
    }
}
