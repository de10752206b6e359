use colored::Colorize;

use crate::analysis::SimulationResult;

const BAR_WIDTH: usize = 40;

/// Number of rows drawn for a single yield curve.
pub const DEFAULT_CHART_ROWS: usize = 11;

fn bar(value: f64, max: f64) -> String {
    let len = if max > 0.0 {
        ((value / max) * BAR_WIDTH as f64).round().clamp(0.0, BAR_WIDTH as f64) as usize
    } else {
        0
    };
    "\u{2588}".repeat(len)
}

/// Indices of `rows` points spread evenly over `len`, first and last included.
fn sample_indices(len: usize, rows: usize) -> Vec<usize> {
    if len == 0 || rows == 0 {
        return Vec::new();
    }
    if rows == 1 || len == 1 {
        return vec![len - 1];
    }
    let rows = rows.min(len);
    let mut indices: Vec<usize> = (0..rows)
        .map(|i| ((i as f64) * (len - 1) as f64 / (rows - 1) as f64).round() as usize)
        .collect();
    indices.dedup();
    indices
}

/// Format a text chart of cumulative yield over time as a string.
///
/// Bars are scaled to the ultimate yield G0 so that the approach to the
/// asymptote is visible.
pub fn format_yield_chart(result: &SimulationResult, rows: usize) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Cumulative Biogas: {}", result.ratio_name).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if result.points.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let g0 = result.parameters.g0;
    output.push_str(&format!(
        "  {:>8}  {:>10}  Yield (full bar = G0 = {:.1} mL/g VS)\n",
        "Day", "mL/g VS", g0
    ));
    output.push_str(&format!("  {}\n", "-".repeat(70)));

    for idx in sample_indices(result.points.len(), rows) {
        let point = &result.points[idx];
        output.push_str(&format!(
            "  {:>8.1}  {:>10.1}  {}\n",
            point.time,
            point.cumulative_yield,
            bar(point.cumulative_yield, g0).green()
        ));
    }

    output.push('\n');
    output
}

/// Print a text chart of cumulative yield over time.
pub fn print_yield_chart(result: &SimulationResult, rows: usize) {
    print!("{}", format_yield_chart(result, rows));
}

/// Format a bar chart comparing the final yield of several runs as a string.
pub fn format_comparison_chart(results: &[SimulationResult]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Final Yield by Ratio".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    if results.is_empty() {
        output.push_str("  No data available.\n");
        return output;
    }

    let max_yield = results
        .iter()
        .map(|r| r.final_yield())
        .fold(0.0f64, f64::max);

    output.push_str(&format!(
        "  {:>12}  {:>6}  {:>10}  Final Yield\n",
        "Ratio", "FW %", "mL/g VS"
    ));
    output.push_str(&format!("  {}\n", "-".repeat(70)));

    for result in results {
        let final_yield = result.final_yield();
        let bar = bar(final_yield, max_yield);
        let bar = if final_yield >= max_yield {
            bar.yellow()
        } else {
            bar.green()
        };
        output.push_str(&format!(
            "  {:>12}  {:>6.1}  {:>10.1}  {}\n",
            result.ratio_name, result.parameters.fw_percent, final_yield, bar
        ));
    }

    output.push('\n');
    output
}

/// Print a bar chart comparing the final yield of several runs.
pub fn print_comparison_chart(results: &[SimulationResult]) {
    print!("{}", format_comparison_chart(results));
}
