mod csv_io;
mod json_io;

use std::path::Path;

use crate::analysis::SimulationResult;
use crate::error::KineticsError;

pub use csv_io::{read_csv, read_csv_from_bytes, write_csv, YieldRecord};
pub use json_io::{read_json, read_json_from_bytes, write_json};

/// Trait for writing simulation results to a file.
pub trait ResultWriter {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), KineticsError>;
}

/// CSV format writer (long format, one row per time point).
pub struct CsvFormat;

impl ResultWriter for CsvFormat {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), KineticsError> {
        write_csv(std::slice::from_ref(result), path)
    }
}

/// JSON format writer.
#[derive(Default)]
pub struct JsonFormat {
    pub pretty: bool,
}

impl ResultWriter for JsonFormat {
    fn write(&self, result: &SimulationResult, path: &Path) -> Result<(), KineticsError> {
        write_json(result, path, self.pretty)
    }
}

/// Pick a writer from the file extension (`.csv` or `.json`).
pub fn writer_for_path(path: &Path) -> Result<Box<dyn ResultWriter>, KineticsError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    match ext.as_str() {
        "csv" => Ok(Box::new(CsvFormat)),
        "json" => Ok(Box::new(JsonFormat { pretty: true })),
        _ => Err(KineticsError::ParseError(format!(
            "Unsupported export format: .{ext}. Use .csv or .json"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{simulate, TimeGrid};

    fn sample_result() -> SimulationResult {
        simulate("Ratio-6_2", &TimeGrid::new(25.0, 11).unwrap()).unwrap()
    }

    #[test]
    fn test_csv_trait_write() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.csv");

        let writer: &dyn ResultWriter = &CsvFormat;
        writer.write(&result, &path).unwrap();

        let records = read_csv(&path).unwrap();
        assert_eq!(records.len(), result.points.len());
    }

    #[test]
    fn test_json_trait_write() {
        let result = sample_result();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.json");

        let writer: &dyn ResultWriter = &JsonFormat { pretty: true };
        writer.write(&result, &path).unwrap();

        let loaded = read_json(&path).unwrap();
        assert_eq!(loaded.ratio_name, result.ratio_name);
        assert_eq!(loaded.points.len(), result.points.len());
    }

    #[test]
    fn test_json_format_default() {
        let fmt = JsonFormat::default();
        assert!(!fmt.pretty);
    }

    #[test]
    fn test_writer_for_path() {
        assert!(writer_for_path(Path::new("out.csv")).is_ok());
        assert!(writer_for_path(Path::new("out.JSON")).is_ok());
        let err = writer_for_path(Path::new("out.xlsx")).err().unwrap();
        assert!(err.to_string().contains(".xlsx"));
        assert!(writer_for_path(Path::new("no_extension")).is_err());
    }
}
