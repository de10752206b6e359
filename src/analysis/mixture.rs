use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::KineticsError;
use crate::models::{MixingRatio, SubstrateProperties, SubstrateTable};

/// Default total-solids content the blended feed is diluted to (%).
pub const DEFAULT_TS_TARGET: f64 = 8.0;

/// Properties of a FW:CM blend, weighted by dry-matter mass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MixturePropertySet {
    pub ratio: MixingRatio,
    /// Food waste share by part count (%)
    pub fw_percent: f64,
    /// Cow manure share by part count (%)
    pub cm_percent: f64,
    pub ph: f64,
    /// Target total solids of the diluted feed (%)
    pub ts_percent: f64,
    pub vs_percent: f64,
    pub c_n_ratio: f64,
    pub scod_g_l: f64,
    pub tcod_g_l: f64,
}

/// Blend the built-in substrate properties for the given ratio.
///
/// # Examples
///
/// ```
/// use codigestion_kinetics::analysis::calc_mixture_properties;
/// use codigestion_kinetics::models::MixingRatio;
///
/// let mix = calc_mixture_properties(MixingRatio::new(6, 2), 8.0).unwrap();
/// assert_eq!(mix.fw_percent, 75.0);
/// assert!(mix.ph > 4.9 && mix.ph < 7.4);
/// ```
pub fn calc_mixture_properties(
    ratio: MixingRatio,
    ts_target: f64,
) -> Result<MixturePropertySet, KineticsError> {
    calc_mixture_properties_with(ratio, ts_target, &SubstrateTable::builtin())
}

/// Blend a custom pair of substrates for the given ratio.
///
/// Each substrate is weighted by `parts * TS%`, i.e. by the dry matter it
/// contributes. The FW/CM percentages are by part count, not by mass.
pub fn calc_mixture_properties_with(
    ratio: MixingRatio,
    ts_target: f64,
    substrates: &SubstrateTable,
) -> Result<MixturePropertySet, KineticsError> {
    if ratio.total_parts() == 0 {
        return Err(KineticsError::InvalidRatio(format!(
            "{ratio}: at least one substrate must have non-zero parts"
        )));
    }
    if !ts_target.is_finite() || ts_target <= 0.0 || ts_target > 100.0 {
        return Err(KineticsError::InvalidParameter(format!(
            "ts_target must be in (0, 100], got {ts_target}"
        )));
    }
    substrates.validate()?;

    let fw = &substrates.food_waste;
    let cm = &substrates.cow_manure;

    let fw_mass = ratio.food_waste_parts as f64 * fw.ts_percent;
    let cm_mass = ratio.manure_parts as f64 * cm.ts_percent;
    let total_mass = fw_mass + cm_mass;
    let fw_frac = fw_mass / total_mass;
    let cm_frac = cm_mass / total_mass;

    let blend = |prop: fn(&SubstrateProperties) -> f64| fw_frac * prop(fw) + cm_frac * prop(cm);

    let total_parts = ratio.total_parts() as f64;
    let mixture = MixturePropertySet {
        ratio,
        fw_percent: ratio.food_waste_parts as f64 / total_parts * 100.0,
        cm_percent: ratio.manure_parts as f64 / total_parts * 100.0,
        ph: blend(|s| s.ph),
        ts_percent: ts_target,
        vs_percent: blend(|s| s.vs_percent),
        c_n_ratio: blend(|s| s.c_n_ratio),
        scod_g_l: blend(|s| s.scod_g_l),
        tcod_g_l: blend(|s| s.tcod_g_l),
    };

    debug!(
        ratio = %ratio,
        fw_mass_fraction = fw_frac,
        ph = mixture.ph,
        c_n = mixture.c_n_ratio,
        "computed mixture properties"
    );

    Ok(mixture)
}
