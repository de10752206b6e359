use crate::analysis::{
    calc_mixture_properties_with, simulate_all, simulate_with, MixturePropertySet,
    SimulationResult, TimeGrid, DEFAULT_TS_TARGET,
};
use crate::config::Settings;
use crate::error::KineticsError;
use crate::models::{MixingRatio, ParameterTable, SubstrateTable};

/// Unified API that groups simulation and mixture operations over one set of tables.
#[derive(Debug, Clone)]
pub struct Simulator {
    table: ParameterTable,
    substrates: SubstrateTable,
    grid: TimeGrid,
    ts_target: f64,
}

impl Simulator {
    /// Create a Simulator over the literature tables with the default grid.
    pub fn new() -> Self {
        Self {
            table: ParameterTable::builtin(),
            substrates: SubstrateTable::builtin(),
            grid: TimeGrid::default(),
            ts_target: DEFAULT_TS_TARGET,
        }
    }

    /// Create a Simulator from validated settings, honoring table overrides.
    pub fn from_settings(settings: &Settings) -> Result<Self, KineticsError> {
        Ok(Self {
            table: settings.parameter_table()?,
            substrates: settings.substrate_table(),
            grid: settings.simulation.grid()?,
            ts_target: settings.simulation.ts_target,
        })
    }

    /// Replace the parameter table.
    pub fn with_table(mut self, table: ParameterTable) -> Self {
        self.table = table;
        self
    }

    /// Replace the time grid.
    pub fn with_grid(mut self, grid: TimeGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn ts_target(&self) -> f64 {
        self.ts_target
    }

    pub fn table(&self) -> &ParameterTable {
        &self.table
    }

    pub fn substrates(&self) -> &SubstrateTable {
        &self.substrates
    }

    pub fn grid(&self) -> &TimeGrid {
        &self.grid
    }

    /// Simulate one named ratio over the grid.
    pub fn simulate(&self, ratio_name: &str) -> Result<SimulationResult, KineticsError> {
        simulate_with(&self.table, ratio_name, &self.grid)
    }

    /// Simulate every ratio in table order.
    pub fn simulate_all(&self) -> Result<Vec<SimulationResult>, KineticsError> {
        simulate_all(&self.table, &self.grid)
    }

    /// Blend the substrates for an explicit ratio.
    pub fn mixture(&self, ratio: MixingRatio) -> Result<MixturePropertySet, KineticsError> {
        calc_mixture_properties_with(ratio, self.ts_target, &self.substrates)
    }

    /// Blend the substrates for the approximate parts of a named ratio.
    pub fn mixture_for(&self, ratio_name: &str) -> Result<MixturePropertySet, KineticsError> {
        let set = self.table.get(ratio_name)?;
        self.mixture(set.mixing_ratio())
    }
}

impl Default for Simulator {
    fn default() -> Self {
        Self::new()
    }
}
