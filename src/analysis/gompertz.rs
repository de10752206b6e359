use std::f64::consts::E;

use serde::{Deserialize, Serialize};

use crate::error::KineticsError;
use crate::models::GompertzParameterSet;

/// Modified Gompertz model of cumulative biogas yield:
///
/// `G(t) = G0 * exp(-exp((k_max * e / G0) * (lambda - t) + 1))`
///
/// This is the closed-form solution; no ODE integration is involved.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GompertzModel {
    /// Ultimate biogas yield (mL/g VS)
    g0: f64,
    /// Maximum production rate (mL/g VS/day)
    k_max: f64,
    /// Lag-phase duration (days)
    lambda: f64,
}

impl GompertzModel {
    /// Build a validated model.
    ///
    /// # Errors
    /// `InvalidRatio` if `g0` is not strictly positive, `InvalidParameter` if
    /// `k_max` or `lambda` is negative or non-finite, or if `k_max * e / g0`
    /// is not finite.
    pub fn new(g0: f64, k_max: f64, lambda: f64) -> Result<Self, KineticsError> {
        if !g0.is_finite() || g0 <= 0.0 {
            return Err(KineticsError::InvalidRatio(format!(
                "G0 must be positive, got {g0}"
            )));
        }
        if !k_max.is_finite() || k_max < 0.0 {
            return Err(KineticsError::InvalidParameter(format!(
                "k_max must be non-negative, got {k_max}"
            )));
        }
        if !lambda.is_finite() || lambda < 0.0 {
            return Err(KineticsError::InvalidParameter(format!(
                "lambda must be non-negative, got {lambda}"
            )));
        }
        let rate = k_max * E / g0;
        if !rate.is_finite() {
            return Err(KineticsError::InvalidParameter(format!(
                "rate coefficient k_max * e / G0 overflows (k_max = {k_max}, G0 = {g0})"
            )));
        }
        Ok(Self { g0, k_max, lambda })
    }

    pub fn g0(&self) -> f64 {
        self.g0
    }

    pub fn k_max(&self) -> f64 {
        self.k_max
    }

    pub fn lambda(&self) -> f64 {
        self.lambda
    }

    /// Inner exponent `(k_max * e / G0) * (lambda - t) + 1`.
    fn exponent(&self, t: f64) -> f64 {
        (self.k_max * E / self.g0) * (self.lambda - t) + 1.0
    }

    /// Cumulative yield at time `t` (days), without validating `t`.
    fn yield_unchecked(&self, t: f64) -> f64 {
        self.g0 * (-self.exponent(t).exp()).exp()
    }

    /// Cumulative biogas yield (mL/g VS) at time `t` (days).
    ///
    /// # Examples
    ///
    /// ```
    /// use codigestion_kinetics::analysis::GompertzModel;
    ///
    /// let model = GompertzModel::new(326.53, 26.96, 0.43).unwrap();
    /// let at_ten_days = model.evaluate(10.0).unwrap();
    /// assert!(at_ten_days > 250.0 && at_ten_days < 326.53);
    /// ```
    pub fn evaluate(&self, t: f64) -> Result<f64, KineticsError> {
        check_time(t)?;
        Ok(self.yield_unchecked(t))
    }

    /// Evaluate the curve at every time in `times`, preserving order and length.
    pub fn evaluate_series(&self, times: &[f64]) -> Result<Vec<f64>, KineticsError> {
        times.iter().copied().try_for_each(check_time)?;
        Ok(times.iter().map(|&t| self.yield_unchecked(t)).collect())
    }

    /// Instantaneous production rate dG/dt (mL/g VS/day) at time `t`.
    ///
    /// Peaks at `k_max` at the inflection point `t = lambda + G0 / (k_max * e)`.
    pub fn production_rate(&self, t: f64) -> Result<f64, KineticsError> {
        check_time(t)?;
        let inner = self.exponent(t).exp();
        Ok(self.yield_unchecked(t) * inner * self.k_max * E / self.g0)
    }

    /// Time (days) at which the production rate peaks.
    pub fn inflection_time(&self) -> Option<f64> {
        if self.k_max > 0.0 {
            Some(self.lambda + self.g0 / (self.k_max * E))
        } else {
            None
        }
    }
}

impl TryFrom<&GompertzParameterSet> for GompertzModel {
    type Error = KineticsError;

    fn try_from(set: &GompertzParameterSet) -> Result<Self, Self::Error> {
        GompertzModel::new(set.g0, set.k_max, set.lambda)
    }
}

impl GompertzParameterSet {
    /// The validated curve described by this parameter set.
    pub fn model(&self) -> Result<GompertzModel, KineticsError> {
        GompertzModel::try_from(self)
    }
}

/// Evaluate the Modified Gompertz equation for a single time point.
pub fn gompertz_curve(t: f64, g0: f64, k_max: f64, lambda: f64) -> Result<f64, KineticsError> {
    GompertzModel::new(g0, k_max, lambda)?.evaluate(t)
}

fn check_time(t: f64) -> Result<(), KineticsError> {
    if !t.is_finite() || t < 0.0 {
        return Err(KineticsError::InvalidParameter(format!(
            "time must be finite and non-negative, got {t}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use proptest::prelude::*;

    fn optimal() -> GompertzModel {
        GompertzModel::new(326.53, 26.96, 0.43).unwrap()
    }

    #[test]
    fn test_known_value_at_25_days() {
        // exponent = 0.224443 * (0.43 - 25) + 1 = -4.5146
        assert_approx_eq!(optimal().evaluate(25.0).unwrap(), 322.97, 0.05);
    }

    #[test]
    fn test_value_at_lag_time() {
        let model = optimal();
        let at_lag = model.evaluate(0.43).unwrap();
        assert_approx_eq!(at_lag, 326.53 * (-E).exp(), 1e-9);
        assert!(at_lag < model.g0());
    }

    #[test]
    fn test_zero_lag_at_time_zero() {
        let model = GompertzModel::new(279.38, 20.98, 0.0).unwrap();
        assert_approx_eq!(model.evaluate(0.0).unwrap(), 279.38 * (-E).exp(), 1e-9);
    }

    #[test]
    fn test_approaches_g0_at_large_time() {
        let model = GompertzModel::new(139.75, 9.96, 0.77).unwrap();
        assert_approx_eq!(model.evaluate(1_000.0).unwrap(), 139.75, 1e-9);
    }

    #[test]
    fn test_zero_rate_is_flat() {
        let model = GompertzModel::new(100.0, 0.0, 1.0).unwrap();
        let early = model.evaluate(0.0).unwrap();
        let late = model.evaluate(50.0).unwrap();
        assert_eq!(early, late);
        assert_eq!(model.inflection_time(), None);
    }

    #[test]
    fn test_non_positive_g0_is_invalid_ratio() {
        assert!(matches!(
            GompertzModel::new(0.0, 10.0, 0.0),
            Err(KineticsError::InvalidRatio(_))
        ));
        assert!(matches!(
            GompertzModel::new(-5.0, 10.0, 0.0),
            Err(KineticsError::InvalidRatio(_))
        ));
        assert!(matches!(
            GompertzModel::new(f64::NAN, 10.0, 0.0),
            Err(KineticsError::InvalidRatio(_))
        ));
    }

    #[test]
    fn test_negative_rate_or_lag_is_invalid() {
        assert!(matches!(
            GompertzModel::new(100.0, -1.0, 0.0),
            Err(KineticsError::InvalidParameter(_))
        ));
        assert!(matches!(
            GompertzModel::new(100.0, 1.0, -0.5),
            Err(KineticsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_overflowing_rate_coefficient_is_invalid() {
        assert!(matches!(
            GompertzModel::new(1e-310, 1.0, 0.5),
            Err(KineticsError::InvalidParameter(_))
        ));
        assert!(matches!(
            GompertzModel::new(1.0, 1e308, 0.5),
            Err(KineticsError::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_extreme_but_finite_rate_stays_bounded() {
        let model = GompertzModel::new(1e-300, 1.0, 0.5).unwrap();
        for t in [0.0, 0.5, 1.0, 100.0] {
            let g = model.evaluate(t).unwrap();
            assert!(!g.is_nan());
            assert!(g <= model.g0());
        }
        assert!(model.evaluate(0.5).unwrap() < model.g0());
    }

    #[test]
    fn test_negative_time_rejected() {
        assert!(optimal().evaluate(-1.0).is_err());
        assert!(optimal().evaluate(f64::INFINITY).is_err());
        assert!(optimal().evaluate_series(&[0.0, 1.0, -2.0]).is_err());
    }

    #[test]
    fn test_series_matches_scalar() {
        let model = optimal();
        let times = [0.0, 2.5, 5.0, 12.0];
        let series = model.evaluate_series(&times).unwrap();
        assert_eq!(series.len(), times.len());
        for (t, g) in times.iter().zip(&series) {
            assert_eq!(*g, model.evaluate(*t).unwrap());
        }
    }

    #[test]
    fn test_empty_series() {
        assert!(optimal().evaluate_series(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_peak_rate_equals_k_max() {
        let model = optimal();
        let t_peak = model.inflection_time().unwrap();
        assert_approx_eq!(model.production_rate(t_peak).unwrap(), 26.96, 1e-9);
        assert!(model.production_rate(t_peak + 3.0).unwrap() < 26.96);
        assert!(model.production_rate(0.0).unwrap() < 26.96);
    }

    #[test]
    fn test_free_function_matches_model() {
        let direct = gompertz_curve(10.0, 326.53, 26.96, 0.43).unwrap();
        assert_eq!(direct, optimal().evaluate(10.0).unwrap());
        assert!(gompertz_curve(10.0, 0.0, 26.96, 0.43).is_err());
    }

    #[test]
    fn test_model_from_parameter_set() {
        let table = crate::models::ParameterTable::builtin();
        let model = table.get("Ratio-7_1").unwrap().model().unwrap();
        assert_eq!(model.g0(), 226.85);
        assert_eq!(model.k_max(), 19.33);
        assert_eq!(model.lambda(), 0.20);
    }

    proptest! {
        #[test]
        fn prop_non_decreasing_in_time(
            g0 in 1.0f64..1000.0,
            k_max in 0.0f64..100.0,
            lambda in 0.0f64..10.0,
            t in 0.0f64..100.0,
            dt in 0.0f64..10.0,
        ) {
            let model = GompertzModel::new(g0, k_max, lambda).unwrap();
            let a = model.evaluate(t).unwrap();
            let b = model.evaluate(t + dt).unwrap();
            prop_assert!(b >= a);
        }

        #[test]
        fn prop_bounded_by_g0(
            g0 in 1.0f64..1000.0,
            k_max in 0.0f64..100.0,
            lambda in 0.0f64..10.0,
            t in 0.0f64..1000.0,
        ) {
            let g = GompertzModel::new(g0, k_max, lambda).unwrap().evaluate(t).unwrap();
            prop_assert!(g >= 0.0);
            prop_assert!(g <= g0);
        }

        #[test]
        fn prop_below_g0_at_lag(
            g0 in 1.0f64..1000.0,
            k_max in 0.0f64..100.0,
            lambda in 0.0f64..10.0,
        ) {
            let g = GompertzModel::new(g0, k_max, lambda).unwrap().evaluate(lambda).unwrap();
            prop_assert!(g < g0);
        }
    }
}
