use serde::{Deserialize, Serialize};

use crate::error::KineticsError;

/// One of the two co-digested feedstocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Substrate {
    FoodWaste,
    CowManure,
}

impl Substrate {
    /// Short code used in ratio labels (e.g. "FW").
    pub fn code(&self) -> &'static str {
        match self {
            Substrate::FoodWaste => "FW",
            Substrate::CowManure => "CM",
        }
    }

    /// Reference properties of the pure substrate.
    pub fn properties(&self) -> SubstrateProperties {
        match self {
            Substrate::FoodWaste => FOOD_WASTE,
            Substrate::CowManure => COW_MANURE,
        }
    }
}

impl std::fmt::Display for Substrate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Substrate::FoodWaste => write!(f, "Food Waste"),
            Substrate::CowManure => write!(f, "Cow Manure"),
        }
    }
}

impl std::str::FromStr for Substrate {
    type Err = KineticsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "fw" | "ra" | "food waste" | "food_waste" => Ok(Substrate::FoodWaste),
            "cm" | "eb" | "cow manure" | "cow_manure" => Ok(Substrate::CowManure),
            _ => Err(KineticsError::ParseError(format!("Unknown substrate: '{s}'"))),
        }
    }
}

/// Physico-chemical characterization of a pure substrate.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstrateProperties {
    pub ph: f64,
    /// Total solids, % of wet mass
    pub ts_percent: f64,
    /// Volatile solids, % of total solids
    pub vs_percent: f64,
    /// Carbon-to-nitrogen ratio
    pub c_n_ratio: f64,
    /// Soluble chemical oxygen demand (g/L)
    pub scod_g_l: f64,
    /// Total chemical oxygen demand (g/L)
    pub tcod_g_l: f64,
}

/// Food waste reference values (Mohammadianroshanfekr et al., 2024, Table 1).
pub const FOOD_WASTE: SubstrateProperties = SubstrateProperties {
    ph: 4.9,
    ts_percent: 27.4,
    vs_percent: 91.20,
    c_n_ratio: 20.79,
    scod_g_l: 74.1,
    tcod_g_l: 205.8,
};

/// Cow manure reference values (Mohammadianroshanfekr et al., 2024, Table 1).
pub const COW_MANURE: SubstrateProperties = SubstrateProperties {
    ph: 7.4,
    ts_percent: 19.2,
    vs_percent: 83.07,
    c_n_ratio: 8.22,
    scod_g_l: 13.5,
    tcod_g_l: 51.2,
};

impl SubstrateProperties {
    /// Validate the characterization. Returns `KineticsError::InvalidParameter` on failure.
    ///
    /// Total solids must be strictly positive since they weight the mixture.
    pub fn validate(&self, label: &str) -> Result<(), KineticsError> {
        if !self.ts_percent.is_finite() || self.ts_percent <= 0.0 || self.ts_percent > 100.0 {
            return Err(KineticsError::InvalidParameter(format!(
                "{label}: ts_percent must be in (0, 100], got {}",
                self.ts_percent
            )));
        }
        if !(0.0..=14.0).contains(&self.ph) {
            return Err(KineticsError::InvalidParameter(format!(
                "{label}: pH must be in 0.0..=14.0, got {}",
                self.ph
            )));
        }
        let non_negative = [
            ("vs_percent", self.vs_percent),
            ("c_n_ratio", self.c_n_ratio),
            ("scod_g_l", self.scod_g_l),
            ("tcod_g_l", self.tcod_g_l),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(KineticsError::InvalidParameter(format!(
                    "{label}: {name} must be non-negative, got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// The pair of substrates blended by the mixture calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubstrateTable {
    pub food_waste: SubstrateProperties,
    pub cow_manure: SubstrateProperties,
}

impl SubstrateTable {
    /// Literature values for both substrates.
    pub fn builtin() -> Self {
        Self {
            food_waste: FOOD_WASTE,
            cow_manure: COW_MANURE,
        }
    }

    pub fn get(&self, substrate: Substrate) -> &SubstrateProperties {
        match substrate {
            Substrate::FoodWaste => &self.food_waste,
            Substrate::CowManure => &self.cow_manure,
        }
    }

    pub fn validate(&self) -> Result<(), KineticsError> {
        self.food_waste.validate("food_waste")?;
        self.cow_manure.validate("cow_manure")
    }
}

impl Default for SubstrateTable {
    fn default() -> Self {
        Self::builtin()
    }
}
