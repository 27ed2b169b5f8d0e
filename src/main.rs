use abtest::{analyze, cli::Cli, dashboard::DashboardSummary, report, Dataset};
use anyhow::{Context, Result};
use clap::Parser;
use std::fs;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber for debug output
fn init_tracing(debug: bool) {
    if debug {
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::from_default_env().add_directive(tracing::Level::DEBUG.into()),
            )
            .with_writer(std::io::stderr)
            .init();
    }
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let config = args.analysis_config()?;
    let dataset = Dataset::from_path(&args.csv)
        .with_context(|| format!("Failed to load {}", args.csv.display()))?;

    let result = analyze(&dataset, &args.group, &args.metric, &config)
        .context("A/B analysis failed")?;
    let rendered = report::render(&result, args.format).context("Failed to render report")?;

    // Everything is computed before the first write so a failure leaves no files behind
    let panel = match &args.dashboard {
        Some(_) => Some(DashboardSummary::from_dataset(&dataset, &args.group, &args.metric)?.render()),
        None => None,
    };

    if let (Some(path), Some(panel)) = (&args.dashboard, &panel) {
        fs::write(path, panel).with_context(|| format!("Failed to write {}", path.display()))?;
    }
    if let Err(e) = fs::write(&args.out, &rendered) {
        if let Some(path) = &args.dashboard {
            let _ = fs::remove_file(path);
        }
        return Err(e).with_context(|| format!("Failed to write {}", args.out.display()));
    }

    println!("{}", rendered);
    println!("\nSaved report → {}", args.out.display());
    if let Some(path) = &args.dashboard {
        println!("Saved dashboard → {}", path.display());
    }

    Ok(())
}
