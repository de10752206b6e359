use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, ContentArrangement, Table};

use crate::analysis::{MixturePropertySet, SimulationResult};
use crate::models::{GompertzParameterSet, ParameterTable, SubstrateTable};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

/// Format the kinetic parameters of one ratio as a string.
pub fn format_ratio_info(set: &GompertzParameterSet) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", format!("Ratio: {}", set.name).bold().green()));
    output.push_str(&format!("{}\n", set.description.dimmed()));
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let ratio = set.mixing_ratio();
    let mut table = new_table();
    table.set_header(vec!["Parameter", "Value", "Unit"]);
    table.add_row(vec![
        Cell::new("Food Waste"),
        Cell::new(format!("{:.1}", set.fw_percent)),
        Cell::new("%"),
    ]);
    table.add_row(vec![
        Cell::new("Cow Manure"),
        Cell::new(format!("{:.1}", set.cm_percent())),
        Cell::new("%"),
    ]);
    table.add_row(vec![
        Cell::new("Approx. Parts (FW:CM)"),
        Cell::new(ratio.to_string()),
        Cell::new(""),
    ]);
    table.add_row(vec![
        Cell::new("Ultimate Yield (G0)"),
        Cell::new(format!("{:.2}", set.g0)),
        Cell::new("mL/g VS"),
    ]);
    table.add_row(vec![
        Cell::new("Max Production Rate (k_max)"),
        Cell::new(format!("{:.2}", set.k_max)),
        Cell::new("mL/g VS/day"),
    ]);
    table.add_row(vec![
        Cell::new("Lag Phase (lambda)"),
        Cell::new(format!("{:.2}", set.lambda)),
        Cell::new("days"),
    ]);

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the kinetic parameters of one ratio.
pub fn print_ratio_info(set: &GompertzParameterSet) {
    print!("{}", format_ratio_info(set));
}

/// Format the list of available ratios as a string.
pub fn format_ratio_list(table: &ParameterTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Available FW:CM Ratios".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(70)));

    let optimal = table.optimal().map(|s| s.name.clone());
    let mut list = new_table();
    list.set_header(vec!["Ratio", "FW %", "G0 (mL/g VS)", "k_max", "lambda", "Description"]);

    for set in table.iter() {
        let name = if optimal.as_deref() == Some(set.name.as_str()) {
            Cell::new(format!("{} *", set.name))
        } else {
            Cell::new(&set.name)
        };
        list.add_row(vec![
            name,
            Cell::new(format!("{:.1}", set.fw_percent)),
            Cell::new(format!("{:.2}", set.g0)),
            Cell::new(format!("{:.2}", set.k_max)),
            Cell::new(format!("{:.2}", set.lambda)),
            Cell::new(&set.description),
        ]);
    }

    output.push_str(&format!("{list}\n"));
    output
}

/// Print the list of available ratios.
pub fn print_ratio_list(table: &ParameterTable) {
    print!("{}", format_ratio_list(table));
}

/// Format blended mixture properties as a string.
pub fn format_mixture_table(mixture: &MixturePropertySet) -> String {
    let mut output = String::new();
    output.push_str(&format!(
        "\n{}\n",
        format!("Mixture Properties ({} FW:CM)", mixture.ratio).bold().green()
    ));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Property", "Value", "Unit"]);

    let rows = [
        ("Food Waste", format!("{:.1}", mixture.fw_percent), "% (parts)"),
        ("Cow Manure", format!("{:.1}", mixture.cm_percent), "% (parts)"),
        ("pH", format!("{:.2}", mixture.ph), ""),
        ("Total Solids (target)", format!("{:.1}", mixture.ts_percent), "%"),
        ("Volatile Solids", format!("{:.2}", mixture.vs_percent), "% of TS"),
        ("C/N Ratio", format!("{:.2}", mixture.c_n_ratio), ""),
        ("Soluble COD", format!("{:.1}", mixture.scod_g_l), "g/L"),
        ("Total COD", format!("{:.1}", mixture.tcod_g_l), "g/L"),
    ];
    for (name, value, unit) in rows {
        table.add_row(vec![Cell::new(name), Cell::new(value), Cell::new(unit)]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print blended mixture properties.
pub fn print_mixture_table(mixture: &MixturePropertySet) {
    print!("{}", format_mixture_table(mixture));
}

/// Format the pure-substrate characterization as a string.
pub fn format_substrate_table(substrates: &SubstrateTable) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Substrate Properties".bold().green()));
    output.push_str(&format!("{}\n", "=".repeat(50)));

    let mut table = new_table();
    table.set_header(vec!["Substrate", "pH", "TS %", "VS %", "C/N", "sCOD (g/L)", "tCOD (g/L)"]);

    for (name, props) in [
        ("Food Waste (FW)", &substrates.food_waste),
        ("Cow Manure (CM)", &substrates.cow_manure),
    ] {
        table.add_row(vec![
            Cell::new(name),
            Cell::new(format!("{:.1}", props.ph)),
            Cell::new(format!("{:.1}", props.ts_percent)),
            Cell::new(format!("{:.2}", props.vs_percent)),
            Cell::new(format!("{:.2}", props.c_n_ratio)),
            Cell::new(format!("{:.1}", props.scod_g_l)),
            Cell::new(format!("{:.1}", props.tcod_g_l)),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print the pure-substrate characterization.
pub fn print_substrate_table(substrates: &SubstrateTable) {
    print!("{}", format_substrate_table(substrates));
}

/// Format a summary of one or more simulation runs as a string.
pub fn format_simulation_summary(results: &[SimulationResult]) -> String {
    let mut output = String::new();
    output.push_str(&format!("\n{}\n", "Simulation Results".bold().green()));
    if let Some(first) = results.first() {
        let t_max = first.points.last().map(|p| p.time).unwrap_or(0.0);
        output.push_str(&format!(
            "{}\n",
            format!("Period: {:.1} days | Time points: {}", t_max, first.points.len()).dimmed()
        ));
    }
    output.push_str(&format!("{}\n", "=".repeat(60)));

    let mut table = new_table();
    table.set_header(vec![
        "Ratio",
        "Final Yield (mL/g VS)",
        "% of G0",
        "Max Rate (mL/g VS/day)",
    ]);

    for result in results {
        table.add_row(vec![
            Cell::new(&result.ratio_name),
            Cell::new(format!("{:.2}", result.final_yield())),
            Cell::new(format!("{:.1}%", result.percent_of_ultimate())),
            Cell::new(format!("{:.2}", result.max_production_rate())),
        ]);
    }

    output.push_str(&format!("{table}\n"));
    output
}

/// Print a summary of one or more simulation runs.
pub fn print_simulation_summary(results: &[SimulationResult]) {
    print!("{}", format_simulation_summary(results));
}
