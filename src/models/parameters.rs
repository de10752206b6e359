use serde::{Deserialize, Serialize};

use crate::error::KineticsError;

/// Number of parts the literature ratios are expressed in (e.g. 6:2).
const RATIO_BASIS_PARTS: f64 = 8.0;

/// Modified Gompertz parameters fitted for one FW:CM mixing ratio
/// (Mohammadianroshanfekr et al., 2024, Table 6).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GompertzParameterSet {
    /// Lookup key, e.g. "Ratio-6_2"
    pub name: String,
    /// Ultimate biogas yield G0 (mL/g VS)
    pub g0: f64,
    /// Maximum biogas production rate (mL/g VS/day)
    pub k_max: f64,
    /// Lag-phase duration (days)
    pub lambda: f64,
    /// Share of food waste in the mixture, by parts (%)
    pub fw_percent: f64,
    pub description: String,
}

/// name, G0, k_max, lambda, FW %, description
const BUILTIN_PARAMETER_SETS: [(&str, f64, f64, f64, f64, &str); 6] = [
    ("Ratio-8_0", 139.75, 9.96, 0.77, 100.0, "Food waste only (100%)"),
    ("Ratio-7_1", 226.85, 19.33, 0.20, 87.5, "FW 87.5% + CM 12.5%"),
    ("Ratio-6_2", 326.53, 26.96, 0.43, 75.0, "Optimal: FW 75% + CM 25%"),
    ("Ratio-4_4", 279.38, 20.98, 0.00, 50.0, "Balanced: FW 50% + CM 50%"),
    ("Ratio-2_6", 240.81, 16.74, 0.00, 25.0, "FW 25% + CM 75%"),
    ("Ratio-1_7", 213.48, 12.82, 0.00, 12.5, "FW 12.5% + CM 87.5%"),
];

impl GompertzParameterSet {
    /// Share of cow manure in the mixture, by parts (%).
    pub fn cm_percent(&self) -> f64 {
        100.0 - self.fw_percent
    }

    /// Approximate FW:CM parts on the 8-part basis used by the literature ratios.
    pub fn mixing_ratio(&self) -> MixingRatio {
        let part = 100.0 / RATIO_BASIS_PARTS;
        MixingRatio {
            food_waste_parts: (self.fw_percent / part).round().max(0.0) as u32,
            manure_parts: (self.cm_percent() / part).round().max(0.0) as u32,
        }
    }

    /// Validate the kinetic constants and composition.
    ///
    /// A non-positive G0 is reported as `InvalidRatio` since the curve is undefined
    /// for that ratio; the remaining checks report `InvalidParameter`.
    pub fn validate(&self) -> Result<(), KineticsError> {
        self.model()?;
        if !(0.0..=100.0).contains(&self.fw_percent) {
            return Err(KineticsError::InvalidParameter(format!(
                "{}: fw_percent must be in 0.0..=100.0, got {}",
                self.name, self.fw_percent
            )));
        }
        Ok(())
    }
}

/// A mixing ratio expressed as integer parts of food waste and cow manure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MixingRatio {
    pub food_waste_parts: u32,
    pub manure_parts: u32,
}

impl MixingRatio {
    pub fn new(food_waste_parts: u32, manure_parts: u32) -> Self {
        Self {
            food_waste_parts,
            manure_parts,
        }
    }

    pub fn total_parts(&self) -> u64 {
        u64::from(self.food_waste_parts) + u64::from(self.manure_parts)
    }

    /// The same ratio in lowest terms, e.g. 6:2 becomes 3:1. 0:0 is unchanged.
    pub fn reduced(&self) -> Self {
        let divisor = gcd(self.food_waste_parts, self.manure_parts);
        if divisor == 0 {
            return *self;
        }
        Self::new(self.food_waste_parts / divisor, self.manure_parts / divisor)
    }
}

fn gcd(mut a: u32, mut b: u32) -> u32 {
    while b != 0 {
        (a, b) = (b, a % b);
    }
    a
}

impl std::fmt::Display for MixingRatio {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.food_waste_parts, self.manure_parts)
    }
}

impl std::str::FromStr for MixingRatio {
    type Err = KineticsError;

    /// Parse "6:2" (or "6_2") into a ratio.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_err = || {
            KineticsError::ParseError(format!(
                "Invalid mixing ratio: '{s}'. Expected FW:CM parts, e.g. 6:2"
            ))
        };
        let (fw, cm) = s
            .trim()
            .split_once([':', '_'])
            .ok_or_else(parse_err)?;
        let food_waste_parts = fw.trim().parse::<u32>().map_err(|_| parse_err())?;
        let manure_parts = cm.trim().parse::<u32>().map_err(|_| parse_err())?;
        Ok(Self::new(food_waste_parts, manure_parts))
    }
}

/// An ordered, name-indexed collection of parameter sets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterTable {
    sets: Vec<GompertzParameterSet>,
}

impl ParameterTable {
    /// The six literature parameter sets, from food waste only to mostly manure.
    pub fn builtin() -> Self {
        let sets = BUILTIN_PARAMETER_SETS
            .iter()
            .map(
                |&(name, g0, k_max, lambda, fw_percent, description)| GompertzParameterSet {
                    name: name.to_string(),
                    g0,
                    k_max,
                    lambda,
                    fw_percent,
                    description: description.to_string(),
                },
            )
            .collect();
        Self { sets }
    }

    /// Build a custom table, validating every set and rejecting duplicate names.
    pub fn new(sets: Vec<GompertzParameterSet>) -> Result<Self, KineticsError> {
        if sets.is_empty() {
            return Err(KineticsError::InvalidParameter(
                "Parameter table must contain at least one set".to_string(),
            ));
        }
        for (i, set) in sets.iter().enumerate() {
            set.validate()?;
            if sets[..i].iter().any(|other| other.name == set.name) {
                return Err(KineticsError::InvalidParameter(format!(
                    "Duplicate parameter set name: {}",
                    set.name
                )));
            }
        }
        Ok(Self { sets })
    }

    /// Look up a parameter set by name.
    ///
    /// # Examples
    ///
    /// ```
    /// use codigestion_kinetics::models::ParameterTable;
    ///
    /// let table = ParameterTable::builtin();
    /// let optimal = table.get("Ratio-6_2").unwrap();
    /// assert_eq!(optimal.g0, 326.53);
    /// assert!(table.get("Ratio-5_3").is_err());
    /// ```
    pub fn get(&self, name: &str) -> Result<&GompertzParameterSet, KineticsError> {
        self.sets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| KineticsError::UnknownRatio {
                name: name.to_string(),
                available: self.names().into_iter().map(String::from).collect(),
            })
    }

    /// Find the set whose approximate parts match the given ratio in lowest terms.
    pub fn find_by_ratio(&self, ratio: MixingRatio) -> Option<&GompertzParameterSet> {
        let target = ratio.reduced();
        self.sets.iter().find(|s| s.mixing_ratio().reduced() == target)
    }

    /// Names in table order.
    pub fn names(&self) -> Vec<&str> {
        self.sets.iter().map(|s| s.name.as_str()).collect()
    }

    /// The set with the highest ultimate yield.
    pub fn optimal(&self) -> Option<&GompertzParameterSet> {
        self.sets.iter().max_by(|a, b| a.g0.total_cmp(&b.g0))
    }

    pub fn iter(&self) -> impl Iterator<Item = &GompertzParameterSet> {
        self.sets.iter()
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Default for ParameterTable {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn custom_set(name: &str, g0: f64) -> GompertzParameterSet {
        GompertzParameterSet {
            name: name.to_string(),
            g0,
            k_max: 10.0,
            lambda: 0.5,
            fw_percent: 50.0,
            description: "test".to_string(),
        }
    }

    #[test]
    fn test_builtin_has_six_sets_in_order() {
        let table = ParameterTable::builtin();
        assert_eq!(table.len(), 6);
        assert_eq!(
            table.names(),
            vec!["Ratio-8_0", "Ratio-7_1", "Ratio-6_2", "Ratio-4_4", "Ratio-2_6", "Ratio-1_7"]
        );
    }

    #[test]
    fn test_builtin_sets_validate() {
        for set in ParameterTable::builtin().iter() {
            assert!(set.validate().is_ok(), "{} failed validation", set.name);
        }
    }

    #[test]
    fn test_get_known_ratio() {
        let table = ParameterTable::builtin();
        let set = table.get("Ratio-4_4").unwrap();
        assert!((set.g0 - 279.38).abs() < 1e-12);
        assert!((set.k_max - 20.98).abs() < 1e-12);
        assert_eq!(set.lambda, 0.0);
    }

    #[test]
    fn test_get_unknown_ratio_lists_names() {
        let table = ParameterTable::builtin();
        match table.get("Ratio-3_5") {
            Err(KineticsError::UnknownRatio { name, available }) => {
                assert_eq!(name, "Ratio-3_5");
                assert_eq!(available.len(), 6);
                assert_eq!(available[0], "Ratio-8_0");
            }
            other => panic!("expected UnknownRatio, got {other:?}"),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        assert!(ParameterTable::builtin().get("ratio-6_2").is_err());
    }

    #[test]
    fn test_mixing_ratio_from_fw_percent() {
        let table = ParameterTable::builtin();
        assert_eq!(table.get("Ratio-8_0").unwrap().mixing_ratio(), MixingRatio::new(8, 0));
        assert_eq!(table.get("Ratio-7_1").unwrap().mixing_ratio(), MixingRatio::new(7, 1));
        assert_eq!(table.get("Ratio-2_6").unwrap().mixing_ratio(), MixingRatio::new(2, 6));
        assert_eq!(table.get("Ratio-1_7").unwrap().mixing_ratio(), MixingRatio::new(1, 7));
    }

    #[test]
    fn test_cm_percent() {
        let table = ParameterTable::builtin();
        assert!((table.get("Ratio-7_1").unwrap().cm_percent() - 12.5).abs() < 1e-12);
    }

    #[test]
    fn test_find_by_ratio() {
        let table = ParameterTable::builtin();
        let set = table.find_by_ratio(MixingRatio::new(6, 2)).unwrap();
        assert_eq!(set.name, "Ratio-6_2");
        assert!(table.find_by_ratio(MixingRatio::new(3, 5)).is_none());
    }

    #[test]
    fn test_find_by_equivalent_ratio() {
        let table = ParameterTable::builtin();
        assert_eq!(table.find_by_ratio(MixingRatio::new(3, 1)).unwrap().name, "Ratio-6_2");
        assert_eq!(table.find_by_ratio(MixingRatio::new(1, 1)).unwrap().name, "Ratio-4_4");
        assert_eq!(table.find_by_ratio(MixingRatio::new(2, 0)).unwrap().name, "Ratio-8_0");
        assert_eq!(table.find_by_ratio(MixingRatio::new(14, 2)).unwrap().name, "Ratio-7_1");
    }

    #[test]
    fn test_reduced_ratio() {
        assert_eq!(MixingRatio::new(6, 2).reduced(), MixingRatio::new(3, 1));
        assert_eq!(MixingRatio::new(0, 5).reduced(), MixingRatio::new(0, 1));
        assert_eq!(MixingRatio::new(0, 0).reduced(), MixingRatio::new(0, 0));
        assert_eq!(MixingRatio::new(7, 1).reduced(), MixingRatio::new(7, 1));
    }

    #[test]
    fn test_total_parts_does_not_overflow() {
        assert_eq!(MixingRatio::new(u32::MAX, 1).total_parts(), u64::from(u32::MAX) + 1);
    }

    #[test]
    fn test_optimal_is_highest_yield() {
        let table = ParameterTable::builtin();
        assert_eq!(table.optimal().unwrap().name, "Ratio-6_2");
    }

    #[test]
    fn test_mixing_ratio_parse() {
        assert_eq!("6:2".parse::<MixingRatio>().unwrap(), MixingRatio::new(6, 2));
        assert_eq!(" 4_4 ".parse::<MixingRatio>().unwrap(), MixingRatio::new(4, 4));
        assert_eq!("0:1".parse::<MixingRatio>().unwrap(), MixingRatio::new(0, 1));
    }

    #[test]
    fn test_mixing_ratio_parse_errors() {
        assert!("6".parse::<MixingRatio>().is_err());
        assert!("a:b".parse::<MixingRatio>().is_err());
        assert!("-1:2".parse::<MixingRatio>().is_err());
        assert!("".parse::<MixingRatio>().is_err());
    }

    #[test]
    fn test_mixing_ratio_display() {
        assert_eq!(MixingRatio::new(7, 1).to_string(), "7:1");
        assert_eq!(MixingRatio::new(7, 1).total_parts(), 8);
    }

    #[test]
    fn test_custom_table_valid() {
        let table = ParameterTable::new(vec![custom_set("A", 100.0), custom_set("B", 200.0)]).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.optimal().unwrap().name, "B");
    }

    #[test]
    fn test_custom_table_rejects_empty() {
        assert!(ParameterTable::new(vec![]).is_err());
    }

    #[test]
    fn test_custom_table_rejects_duplicates() {
        let err = ParameterTable::new(vec![custom_set("A", 100.0), custom_set("A", 200.0)])
            .unwrap_err();
        assert!(err.to_string().contains("Duplicate"));
    }

    #[test]
    fn test_custom_table_rejects_non_positive_g0() {
        let err = ParameterTable::new(vec![custom_set("A", 0.0)]).unwrap_err();
        assert!(matches!(err, KineticsError::InvalidRatio(_)));
    }

    #[test]
    fn test_fw_percent_out_of_range() {
        let mut set = custom_set("A", 100.0);
        set.fw_percent = 120.0;
        assert!(matches!(set.validate(), Err(KineticsError::InvalidParameter(_))));
    }

    #[test]
    fn test_parameter_table_json_roundtrip() {
        let table = ParameterTable::builtin();
        let json = serde_json::to_string(&table).unwrap();
        assert!(json.starts_with('['));
        let deserialized: ParameterTable = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.names(), table.names());
    }
}
