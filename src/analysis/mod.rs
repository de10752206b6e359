mod gompertz;
mod mixture;
mod simulation;
mod simulator;

pub use gompertz::{gompertz_curve, GompertzModel};
pub use mixture::{
    calc_mixture_properties, calc_mixture_properties_with, MixturePropertySet, DEFAULT_TS_TARGET,
};
pub use simulation::{
    simulate, simulate_all, simulate_with, SimulationResult, TimeGrid, YieldPoint,
    DEFAULT_N_POINTS, DEFAULT_T_MAX, MAX_N_POINTS,
};
pub use simulator::Simulator;
