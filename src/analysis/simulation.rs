use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KineticsError;
use crate::models::{GompertzParameterSet, ParameterTable};

/// Default simulated digestion period (days).
pub const DEFAULT_T_MAX: f64 = 25.0;
/// Default number of evaluated time points.
pub const DEFAULT_N_POINTS: usize = 200;
/// Largest accepted number of time points.
pub const MAX_N_POINTS: usize = 1_000_000;

/// Evenly spaced time points from 0 to `t_max`, both ends included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeGrid {
    /// Last time point (days)
    pub t_max: f64,
    pub n_points: usize,
}

impl TimeGrid {
    pub fn new(t_max: f64, n_points: usize) -> Result<Self, KineticsError> {
        let grid = Self { t_max, n_points };
        grid.validate()?;
        Ok(grid)
    }

    pub fn validate(&self) -> Result<(), KineticsError> {
        if !self.t_max.is_finite() || self.t_max <= 0.0 {
            return Err(KineticsError::InvalidParameter(format!(
                "t_max must be positive, got {}",
                self.t_max
            )));
        }
        if !(2..=MAX_N_POINTS).contains(&self.n_points) {
            return Err(KineticsError::InvalidParameter(format!(
                "n_points must be in [2, {MAX_N_POINTS}], got {}",
                self.n_points
            )));
        }
        Ok(())
    }

    /// Spacing between consecutive points (days).
    pub fn step(&self) -> f64 {
        self.t_max / (self.n_points as f64 - 1.0)
    }

    /// The time points, with the last one pinned to `t_max`.
    pub fn times(&self) -> Vec<f64> {
        let step = self.step();
        let mut times: Vec<f64> = (0..self.n_points).map(|i| i as f64 * step).collect();
        if let Some(last) = times.last_mut() {
            *last = self.t_max;
        }
        times
    }
}

impl Default for TimeGrid {
    fn default() -> Self {
        Self {
            t_max: DEFAULT_T_MAX,
            n_points: DEFAULT_N_POINTS,
        }
    }
}

/// Cumulative yield at one time point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    /// Time (days)
    pub time: f64,
    /// Cumulative biogas yield (mL/g VS)
    pub cumulative_yield: f64,
}

/// The Gompertz curve of one parameter set evaluated over a time grid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationResult {
    pub ratio_name: String,
    pub parameters: GompertzParameterSet,
    /// Ordered by increasing time
    pub points: Vec<YieldPoint>,
}

impl SimulationResult {
    pub fn times(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.time).collect()
    }

    pub fn yields(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.cumulative_yield).collect()
    }

    /// Cumulative yield at the last time point.
    pub fn final_yield(&self) -> f64 {
        self.points.last().map(|p| p.cumulative_yield).unwrap_or(0.0)
    }

    /// Final yield as a percentage of the ultimate yield G0.
    pub fn percent_of_ultimate(&self) -> f64 {
        if self.parameters.g0 > 0.0 {
            self.final_yield() / self.parameters.g0 * 100.0
        } else {
            0.0
        }
    }

    /// Highest production rate observed over the grid (mL/g VS/day).
    pub fn max_production_rate(&self) -> f64 {
        let Ok(model) = self.parameters.model() else {
            return 0.0;
        };
        self.points
            .iter()
            .filter_map(|p| model.production_rate(p.time).ok())
            .fold(0.0f64, f64::max)
    }
}

/// Simulate one of the built-in literature ratios.
///
/// # Examples
///
/// ```
/// use codigestion_kinetics::analysis::{simulate, TimeGrid};
///
/// let result = simulate("Ratio-6_2", &TimeGrid::default()).unwrap();
/// assert_eq!(result.points.len(), 200);
/// assert!(result.final_yield() < 326.53);
/// ```
pub fn simulate(ratio_name: &str, grid: &TimeGrid) -> Result<SimulationResult, KineticsError> {
    simulate_with(&ParameterTable::builtin(), ratio_name, grid)
}

/// Simulate a named parameter set from a custom table.
pub fn simulate_with(
    table: &ParameterTable,
    ratio_name: &str,
    grid: &TimeGrid,
) -> Result<SimulationResult, KineticsError> {
    let parameters = table.get(ratio_name)?;
    simulate_parameters(parameters, grid)
}

/// Simulate every set in the table, in table order.
pub fn simulate_all(
    table: &ParameterTable,
    grid: &TimeGrid,
) -> Result<Vec<SimulationResult>, KineticsError> {
    table.iter().map(|set| simulate_parameters(set, grid)).collect()
}

fn simulate_parameters(
    parameters: &GompertzParameterSet,
    grid: &TimeGrid,
) -> Result<SimulationResult, KineticsError> {
    grid.validate()?;
    let model = parameters.model()?;
    let times = grid.times();
    let yields = model.evaluate_series(&times)?;

    let points: Vec<YieldPoint> = times
        .into_iter()
        .zip(yields)
        .map(|(time, cumulative_yield)| YieldPoint {
            time,
            cumulative_yield,
        })
        .collect();

    debug!(
        ratio = %parameters.name,
        t_max = grid.t_max,
        n_points = grid.n_points,
        final_yield = points.last().map(|p| p.cumulative_yield),
        "simulated biogas production"
    );

    Ok(SimulationResult {
        ratio_name: parameters.name.clone(),
        parameters: parameters.clone(),
        points,
    })
}
