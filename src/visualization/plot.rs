use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::analysis::SimulationResult;
use crate::error::KineticsError;

const SINGLE_PLOT_SIZE: (u32, u32) = (1000, 600);
const COMPARISON_PLOT_SIZE: (u32, u32) = (1200, 700);

fn plot_error<E: std::fmt::Display>(e: E) -> KineticsError {
    KineticsError::Plot(e.to_string())
}

fn ensure_parent_dir(path: &Path) -> Result<(), KineticsError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

fn draw_curves<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    caption: &str,
    curves: &[(&SimulationResult, String)],
) -> Result<(), KineticsError> {
    root.fill(&WHITE).map_err(plot_error)?;

    let t_max = curves
        .iter()
        .filter_map(|(r, _)| r.points.last())
        .map(|p| p.time)
        .fold(0.0f64, f64::max)
        .max(1.0);
    let y_max = curves
        .iter()
        .map(|(r, _)| r.parameters.g0)
        .fold(0.0f64, f64::max)
        .max(1.0)
        * 1.1;

    let mut chart = ChartBuilder::on(root)
        .caption(caption, ("sans-serif", 26))
        .margin(20)
        .x_label_area_size(50)
        .y_label_area_size(70)
        .build_cartesian_2d(0.0..t_max, 0.0..y_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Time (days)")
        .y_desc("Cumulative Biogas (mL/g VS)")
        .light_line_style(BLACK.mix(0.05))
        .draw()
        .map_err(plot_error)?;

    for (idx, (result, label)) in curves.iter().enumerate() {
        let color = Palette99::pick(idx).to_rgba();
        chart
            .draw_series(LineSeries::new(
                result.points.iter().map(|p| (p.time, p.cumulative_yield)),
                color.stroke_width(2),
            ))
            .map_err(plot_error)?
            .label(label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::LowerRight)
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()
        .map_err(plot_error)?;

    Ok(())
}

/// Render the yield curve of one run to a PNG file.
///
/// The parent directory is created if missing.
pub fn plot_biogas(
    result: &SimulationResult,
    title: &str,
    path: impl AsRef<Path>,
) -> Result<(), KineticsError> {
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let label = format!("{} (final yield {:.1} mL/g VS)", result.ratio_name, result.final_yield());
    let root = BitMapBackend::new(path, SINGLE_PLOT_SIZE).into_drawing_area();
    draw_curves(
        &root,
        &format!("Anaerobic Digestion: {title}"),
        &[(result, label)],
    )?;
    root.present().map_err(plot_error)?;

    info!(path = %path.display(), ratio = %result.ratio_name, "saved yield plot");
    Ok(())
}

/// Render every run on a single comparison chart in a PNG file.
pub fn plot_all_ratios(
    results: &[SimulationResult],
    path: impl AsRef<Path>,
) -> Result<(), KineticsError> {
    if results.is_empty() {
        return Err(KineticsError::Plot("no simulation results to plot".to_string()));
    }
    let path = path.as_ref();
    ensure_parent_dir(path)?;

    let curves: Vec<(&SimulationResult, String)> = results
        .iter()
        .map(|r| (r, format!("{}: {:.0}% FW", r.ratio_name, r.parameters.fw_percent)))
        .collect();

    let root = BitMapBackend::new(path, COMPARISON_PLOT_SIZE).into_drawing_area();
    draw_curves(&root, "Anaerobic Digestion: All FW:CM Ratios", &curves)?;
    root.present().map_err(plot_error)?;

    info!(path = %path.display(), curves = results.len(), "saved comparison plot");
    Ok(())
}
