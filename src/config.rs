use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::analysis::{TimeGrid, DEFAULT_N_POINTS, DEFAULT_TS_TARGET, DEFAULT_T_MAX};
use crate::error::KineticsError;
use crate::models::{GompertzParameterSet, ParameterTable, SubstrateTable};

/// Settings for a simulation session.
///
/// Loaded from a TOML file; every field is optional and falls back to the
/// literature defaults. See [`Settings::from_file`].
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub simulation: SimulationSettings,
    pub output: OutputSettings,
    /// Replaces the built-in parameter table when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameter_sets: Option<Vec<GompertzParameterSet>>,
    /// Replaces the built-in substrate characterization when present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substrates: Option<SubstrateTable>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationSettings {
    /// Simulated period (days)
    pub t_max: f64,
    pub n_points: usize,
    /// Total-solids target of the diluted feed (%)
    pub ts_target: f64,
}

impl Default for SimulationSettings {
    fn default() -> Self {
        Self {
            t_max: DEFAULT_T_MAX,
            n_points: DEFAULT_N_POINTS,
            ts_target: DEFAULT_TS_TARGET,
        }
    }
}

impl SimulationSettings {
    pub fn grid(&self) -> Result<TimeGrid, KineticsError> {
        TimeGrid::new(self.t_max, self.n_points)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Directory PNG charts are written to
    pub dir: PathBuf,
    /// Render terminal charts alongside tables
    pub show_plots: bool,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("data/output"),
            show_plots: true,
        }
    }
}

impl Settings {
    /// Load and validate settings from a TOML file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed, or if any value
    /// is out of range.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, KineticsError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, KineticsError> {
        let settings: Settings = toml::from_str(content)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_toml_string(&self) -> Result<String, KineticsError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), KineticsError> {
        self.simulation.grid()?;
        let ts = self.simulation.ts_target;
        if !ts.is_finite() || ts <= 0.0 || ts > 100.0 {
            return Err(KineticsError::InvalidParameter(format!(
                "simulation.ts_target must be in (0, 100], got {ts}"
            )));
        }
        self.parameter_table()?;
        if let Some(substrates) = &self.substrates {
            substrates.validate()?;
        }
        Ok(())
    }

    /// The configured parameter table, or the built-in one.
    pub fn parameter_table(&self) -> Result<ParameterTable, KineticsError> {
        match &self.parameter_sets {
            Some(sets) => ParameterTable::new(sets.clone()),
            None => Ok(ParameterTable::builtin()),
        }
    }

    /// The configured substrate pair, or the built-in one.
    pub fn substrate_table(&self) -> SubstrateTable {
        self.substrates.unwrap_or_else(SubstrateTable::builtin)
    }
}
