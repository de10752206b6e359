pub mod analysis;
pub mod config;
pub mod error;
pub mod io;
pub mod models;
pub mod visualization;

pub use analysis::{
    calc_mixture_properties, gompertz_curve, simulate, GompertzModel, MixturePropertySet,
    SimulationResult, Simulator, TimeGrid,
};
pub use config::Settings;
pub use error::KineticsError;
pub use io::ResultWriter;
pub use models::{GompertzParameterSet, MixingRatio, ParameterTable, SubstrateProperties};
