use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::analysis::SimulationResult;
use crate::error::KineticsError;

/// One row of the long-format CSV export.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YieldRecord {
    pub ratio: String,
    pub time_days: f64,
    pub cumulative_yield_ml_g_vs: f64,
}

impl YieldRecord {
    fn validate(&self, row_index: usize) -> Result<(), KineticsError> {
        if !self.time_days.is_finite() || self.time_days < 0.0 {
            return Err(KineticsError::ParseError(format!(
                "Row {row_index}: time_days must be non-negative, got {}",
                self.time_days
            )));
        }
        if !self.cumulative_yield_ml_g_vs.is_finite() || self.cumulative_yield_ml_g_vs < 0.0 {
            return Err(KineticsError::ParseError(format!(
                "Row {row_index}: cumulative_yield_ml_g_vs must be non-negative, got {}",
                self.cumulative_yield_ml_g_vs
            )));
        }
        Ok(())
    }
}

fn parse_csv_records<R: Read>(rdr: &mut csv::Reader<R>) -> Result<Vec<YieldRecord>, KineticsError> {
    let mut records = Vec::new();
    for (row_index, result) in rdr.deserialize().enumerate() {
        let record: YieldRecord = result?;
        record.validate(row_index)?;
        records.push(record);
    }
    Ok(records)
}

/// Read yield records from a CSV file.
pub fn read_csv(path: impl AsRef<Path>) -> Result<Vec<YieldRecord>, KineticsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path.as_ref())?;
    parse_csv_records(&mut rdr)
}

/// Read yield records from CSV bytes.
pub fn read_csv_from_bytes(data: &[u8]) -> Result<Vec<YieldRecord>, KineticsError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(data);
    parse_csv_records(&mut rdr)
}

/// Write one or more simulation results as long-format CSV rows.
pub fn write_csv(results: &[SimulationResult], path: impl AsRef<Path>) -> Result<(), KineticsError> {
    let mut wtr = csv::Writer::from_path(path.as_ref())?;

    for result in results {
        for point in &result.points {
            wtr.serialize(YieldRecord {
                ratio: result.ratio_name.clone(),
                time_days: point.time,
                cumulative_yield_ml_g_vs: point.cumulative_yield,
            })?;
        }
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{simulate, TimeGrid};

    #[test]
    fn test_write_and_read_single_result() {
        let result = simulate("Ratio-6_2", &TimeGrid::new(25.0, 26).unwrap()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("optimal.csv");

        write_csv(std::slice::from_ref(&result), &path).unwrap();
        let records = read_csv(&path).unwrap();

        assert_eq!(records.len(), 26);
        assert!(records.iter().all(|r| r.ratio == "Ratio-6_2"));
        assert_eq!(records[0].time_days, 0.0);
        assert!((records[25].cumulative_yield_ml_g_vs - result.final_yield()).abs() < 1e-9);
    }

    #[test]
    fn test_header_row() {
        let result = simulate("Ratio-8_0", &TimeGrid::new(1.0, 2).unwrap()).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.csv");
        write_csv(&[result], &path).unwrap();

        let text = std::fs::read_to_string(&path).unwrap();
        assert!(text.starts_with("ratio,time_days,cumulative_yield_ml_g_vs"));
    }

    #[test]
    fn test_multiple_results_long_format() {
        let grid = TimeGrid::new(10.0, 5).unwrap();
        let a = simulate("Ratio-8_0", &grid).unwrap();
        let b = simulate("Ratio-1_7", &grid).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("both.csv");
        write_csv(&[a, b], &path).unwrap();

        let records = read_csv(&path).unwrap();
        assert_eq!(records.len(), 10);
        assert_eq!(records[4].ratio, "Ratio-8_0");
        assert_eq!(records[5].ratio, "Ratio-1_7");
    }

    #[test]
    fn test_read_from_bytes() {
        let data = b"ratio,time_days,cumulative_yield_ml_g_vs\nRatio-4_4, 0.0, 18.4\nRatio-4_4,1.5,60.2\n";
        let records = read_csv_from_bytes(data).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].time_days, 1.5);
    }

    #[test]
    fn test_read_rejects_negative_time() {
        let data = b"ratio,time_days,cumulative_yield_ml_g_vs\nRatio-4_4,-1.0,18.4\n";
        let err = read_csv_from_bytes(data).unwrap_err();
        assert!(matches!(err, KineticsError::ParseError(_)));
    }

    #[test]
    fn test_read_rejects_bad_number() {
        let data = b"ratio,time_days,cumulative_yield_ml_g_vs\nRatio-4_4,abc,18.4\n";
        assert!(matches!(read_csv_from_bytes(data), Err(KineticsError::Csv(_))));
    }

    #[test]
    fn test_read_missing_file() {
        assert!(read_csv("/nonexistent/yields.csv").is_err());
    }
}
