use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::warn;
use tracing_subscriber::EnvFilter;

use codigestion_kinetics::{
    analysis::{calc_mixture_properties_with, SimulationResult, Simulator, TimeGrid},
    config::Settings,
    io,
    models::{MixingRatio, ParameterTable},
    visualization::{
        print_comparison_chart, print_mixture_table, print_ratio_info, print_ratio_list,
        print_simulation_summary, print_substrate_table, print_yield_chart, DEFAULT_CHART_ROWS,
    },
    KineticsError,
};

#[derive(Parser)]
#[command(
    name = "codigestion",
    about = "Modified Gompertz biogas kinetics for food waste and cow manure co-digestion",
    version,
    author
)]
struct Cli {
    /// Path to a TOML settings file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the available FW:CM ratios and their kinetic parameters
    List,

    /// Show the parameters and mixture properties of one ratio
    Info {
        /// Ratio name, e.g. Ratio-6_2
        #[arg(short, long)]
        ratio: String,
    },

    /// Simulate cumulative biogas production for one ratio
    Simulate {
        /// Ratio name, e.g. Ratio-6_2
        #[arg(short, long)]
        ratio: String,

        /// Simulated period in days
        #[arg(short, long)]
        t_max: Option<f64>,

        /// Number of time points
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Export the curve to a .csv or .json file
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Save the curve as a PNG chart
        #[arg(short, long)]
        plot: Option<PathBuf>,
    },

    /// Compute blended properties of a FW:CM mixture
    Mixture {
        /// Mixing ratio as FW:CM parts, e.g. 6:2
        #[arg(short, long)]
        ratio: MixingRatio,

        /// Target total solids of the diluted feed (%)
        #[arg(long)]
        ts_target: Option<f64>,
    },

    /// Simulate and compare every ratio
    Compare {
        /// Simulated period in days
        #[arg(short, long)]
        t_max: Option<f64>,

        /// Number of time points
        #[arg(short = 'n', long)]
        points: Option<usize>,

        /// Save the comparison as a PNG chart
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the pure-substrate characterization
    Substrates,

    /// Walk through the literature examples and write charts to the output directory
    Demo,

    /// Print the effective settings as TOML
    Config,
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Ok(Settings::from_file(path)?),
        None => Ok(Settings::default()),
    }
}

fn grid_from(settings: &Settings, t_max: Option<f64>, points: Option<usize>) -> Result<TimeGrid> {
    Ok(TimeGrid::new(
        t_max.unwrap_or(settings.simulation.t_max),
        points.unwrap_or(settings.simulation.n_points),
    )?)
}

fn warn_plot_failure(path: &Path, err: &KineticsError) {
    warn!(path = %path.display(), error = %err, "plot failed");
    eprintln!(
        "{}: could not create plot {}: {err}",
        "Warning".yellow(),
        path.display()
    );
}

#[cfg(feature = "plot")]
fn save_single_plot(result: &SimulationResult, title: &str, path: &Path) {
    match codigestion_kinetics::visualization::plot_biogas(result, title, path) {
        Ok(()) => println!("{} Saved plot: {}", "Success:".green().bold(), path.display()),
        Err(e) => warn_plot_failure(path, &e),
    }
}

#[cfg(feature = "plot")]
fn save_comparison_plot(results: &[SimulationResult], path: &Path) {
    match codigestion_kinetics::visualization::plot_all_ratios(results, path) {
        Ok(()) => println!("{} Saved plot: {}", "Success:".green().bold(), path.display()),
        Err(e) => warn_plot_failure(path, &e),
    }
}

#[cfg(not(feature = "plot"))]
fn save_single_plot(_result: &SimulationResult, _title: &str, path: &Path) {
    warn_plot_failure(path, &plot_feature_disabled());
}

#[cfg(not(feature = "plot"))]
fn save_comparison_plot(_results: &[SimulationResult], path: &Path) {
    warn_plot_failure(path, &plot_feature_disabled());
}

#[cfg(not(feature = "plot"))]
fn plot_feature_disabled() -> KineticsError {
    KineticsError::Plot("built without the `plot` feature".to_string())
}

fn run_demo(settings: &Settings) -> Result<()> {
    let simulator = Simulator::from_settings(settings)?.with_table(ParameterTable::builtin());
    let table = simulator.table();

    println!("\n{}", "=".repeat(70));
    println!("{}", "ANAEROBIC CO-DIGESTION MODEL".bold().cyan());
    println!("Modified Gompertz equation for food waste + cow manure");
    println!("{}", "=".repeat(70));

    println!("\n{}", "[Example 1] Optimal ratio (6:2)".bold());
    let optimal_params = table.get("Ratio-6_2")?;
    print_ratio_info(optimal_params);
    let optimal = simulator.simulate("Ratio-6_2")?;
    println!("  Final biogas yield: {:.2} mL/g VS", optimal.final_yield());
    println!("  Time points:        {}", optimal.points.len());
    if settings.output.show_plots {
        print_yield_chart(&optimal, DEFAULT_CHART_ROWS);
    }

    println!("\n{}", "[Example 2] Balanced ratio (4:4)".bold());
    print_ratio_info(table.get("Ratio-4_4")?);
    let balanced = simulator.simulate("Ratio-4_4")?;
    println!("  Final biogas yield: {:.2} mL/g VS", balanced.final_yield());

    println!("\n{}", "[Example 3] Mixture properties for 6:2".bold());
    let mixture = simulator.mixture(MixingRatio::new(6, 2))?;
    println!("  pH:        {:.1}", mixture.ph);
    println!("  C/N ratio: {:.2}", mixture.c_n_ratio);
    println!("  VS:        {:.2}%", mixture.vs_percent);

    println!("\n{}", "[Example 4] All available ratios".bold());
    print_ratio_list(table);

    println!("\n{}", "[Example 5] Charts".bold());
    let out_dir = &settings.output.dir;
    save_single_plot(
        &optimal,
        "Ratio-6_2 (Optimal)",
        &out_dir.join("biogas_optimal.png"),
    );
    let all = simulator.simulate_all()?;
    save_comparison_plot(&all, &out_dir.join("all_ratios.png"));

    println!("\n{}", "=".repeat(70));
    println!("{}", "Simulation complete!".bold().green());
    println!("{}\n", "=".repeat(70));
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = load_settings(cli.config.as_deref())?;
    let simulator = Simulator::from_settings(&settings)?;
    let table = simulator.table();

    match cli.command {
        Commands::List => {
            print_ratio_list(table);
        }

        Commands::Info { ratio } => {
            let set = table.get(&ratio)?;
            print_ratio_info(set);

            match simulator.mixture(set.mixing_ratio()) {
                Ok(mixture) => print_mixture_table(&mixture),
                Err(e) => eprintln!("{}: {e}", "Warning".yellow()),
            }
        }

        Commands::Simulate {
            ratio,
            t_max,
            points,
            export,
            plot,
        } => {
            let grid = grid_from(&settings, t_max, points)?;
            let result = simulator.clone().with_grid(grid).simulate(&ratio)?;

            println!(
                "\n{}",
                format!("Biogas Simulation: {ratio}").bold().cyan()
            );
            print_ratio_info(&result.parameters);
            print_simulation_summary(std::slice::from_ref(&result));

            if settings.output.show_plots {
                print_yield_chart(&result, DEFAULT_CHART_ROWS);
            }

            if let Some(path) = export {
                let writer = io::writer_for_path(&path)?;
                writer.write(&result, &path)?;
                println!(
                    "{} Exported {} points -> {}",
                    "Success:".green().bold(),
                    result.points.len(),
                    path.display()
                );
            }

            if let Some(path) = plot {
                save_single_plot(&result, &ratio, &path);
            }
        }

        Commands::Mixture { ratio, ts_target } => {
            let mixture = calc_mixture_properties_with(
                ratio,
                ts_target.unwrap_or(settings.simulation.ts_target),
                simulator.substrates(),
            )?;
            print_mixture_table(&mixture);

            if let Some(set) = table.find_by_ratio(ratio) {
                println!(
                    "  Matching kinetic parameters: {} (G0 = {:.2} mL/g VS)",
                    set.name, set.g0
                );
            }
        }

        Commands::Compare {
            t_max,
            points,
            output,
        } => {
            let grid = grid_from(&settings, t_max, points)?;
            let results = simulator.clone().with_grid(grid).simulate_all()?;

            print_simulation_summary(&results);
            if settings.output.show_plots {
                print_comparison_chart(&results);
            }

            if let Some(path) = output {
                save_comparison_plot(&results, &path);
            }
        }

        Commands::Substrates => {
            print_substrate_table(simulator.substrates());
        }

        Commands::Demo => {
            run_demo(&settings)?;
        }

        Commands::Config => {
            print!("{}", settings.to_toml_string()?);
        }
    }

    Ok(())
}
