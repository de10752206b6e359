mod parameters;
mod substrate;

pub use parameters::{GompertzParameterSet, MixingRatio, ParameterTable};
pub use substrate::{Substrate, SubstrateProperties, SubstrateTable, COW_MANURE, FOOD_WASTE};
