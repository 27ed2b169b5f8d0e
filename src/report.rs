//! Human- and machine-readable renderings of an `ABResult`
//!
//! Markdown follows the classic one-page A/B summary: sample table, both test
//! lines with a significance verdict, and the bootstrap lift interval.

use crate::analysis::ABResult;
use crate::cli::OutputFormat;

/// Render a result in the requested format
pub fn render(result: &ABResult, format: OutputFormat) -> serde_json::Result<String> {
    match format {
        OutputFormat::Markdown => Ok(render_markdown(result)),
        OutputFormat::Json => render_json(result),
    }
}

fn percent(value: Option<f64>) -> String {
    match value {
        Some(v) => format!("{:.2}%", v * 100.0),
        None => "undefined".to_string(),
    }
}

/// "95" for 0.95, "97.5" for 0.975
fn confidence_label(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{}", pct.round() as i64)
    } else {
        format!("{:.1}", pct)
    }
}

/// Render the Markdown summary report
pub fn render_markdown(result: &ABResult) -> String {
    let verdict = if result.is_significant() {
        "SIGNIFICANT ✅"
    } else {
        "NOT SIGNIFICANT ❌"
    };

    let mut report = String::new();
    report.push_str("# A/B Test Summary\n\n");
    report.push_str(&format!("**Metric:** `{}`  \n", result.metric));
    report.push_str(&format!(
        "**Groups:** `{}` (A = `{}` vs B = `{}`)  \n",
        result.group_col, result.group_a_label, result.group_b_label
    ));
    report.push_str(&format!(
        "**Alpha:** {:.2} | **Winsor:** {:.3} | **Bootstrap:** {} (seed {})\n\n",
        result.alpha, result.winsor, result.n_boot, result.seed
    ));

    report.push_str("|            |    A (control) |  B (variant) |\n");
    report.push_str("|------------|---------------:|-------------:|\n");
    report.push_str(&format!(
        "| n          | {:>14} | {:>12} |\n",
        result.group_a_n, result.group_b_n
    ));
    report.push_str(&format!(
        "| mean       | {:>14.4} | {:>12.4} |\n",
        result.group_a_mean, result.group_b_mean
    ));
    report.push_str(&format!(
        "| lift (B/A) | {:>14} | {:>12} |\n\n",
        "—",
        percent(result.lift)
    ));

    report.push_str(&format!(
        "**Welch's t-test:** t = {:.3}, df = {:.1}, p = {:.4} → **{}**  \n",
        result.welch.statistic, result.welch.df, result.welch.pvalue, verdict
    ));
    report.push_str(&format!(
        "**Mann–Whitney U:** U = {:.1}, p = {:.4}  \n",
        result.mann_whitney.statistic, result.mann_whitney.pvalue
    ));
    report.push_str(&format!(
        "**Bootstrap {}% CI for lift:** [{}, {}]\n\n",
        confidence_label(result.ci.confidence),
        percent(Some(result.ci.low)),
        percent(Some(result.ci.high))
    ));

    report.push_str(
        "> Interpretation: If the CI excludes 0% and p < α, the variant shows a \
         statistically significant effect.\n",
    );

    if !result.warnings.is_empty() {
        report.push_str("\n## Warnings\n\n");
        for warning in &result.warnings {
            report.push_str(&format!("- {}\n", warning));
        }
    }

    report
}

/// Render the result as pretty-printed JSON
///
/// Non-finite numbers (an undefined Welch p-value) serialize as `null`.
pub fn render_json(result: &ABResult) -> serde_json::Result<String> {
    serde_json::to_string_pretty(result)
}
