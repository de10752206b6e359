use std::path::Path;

use crate::analysis::SimulationResult;
use crate::error::KineticsError;

fn check_result(result: &SimulationResult) -> Result<(), KineticsError> {
    result.parameters.validate()?;
    for (index, point) in result.points.iter().enumerate() {
        if !point.time.is_finite() || point.time < 0.0 {
            return Err(KineticsError::ParseError(format!(
                "Point {index}: time must be non-negative, got {}",
                point.time
            )));
        }
        if !point.cumulative_yield.is_finite() || point.cumulative_yield < 0.0 {
            return Err(KineticsError::ParseError(format!(
                "Point {index}: cumulative_yield must be non-negative, got {}",
                point.cumulative_yield
            )));
        }
    }
    if result
        .points
        .windows(2)
        .any(|pair| pair[1].time < pair[0].time)
    {
        return Err(KineticsError::ParseError(format!(
            "{}: points must be ordered by time",
            result.ratio_name
        )));
    }
    Ok(())
}

/// Read a simulation result from a JSON file.
pub fn read_json(path: impl AsRef<Path>) -> Result<SimulationResult, KineticsError> {
    let content = std::fs::read_to_string(path.as_ref())?;
    let result: SimulationResult = serde_json::from_str(&content)?;
    check_result(&result)?;
    Ok(result)
}

/// Read a simulation result from JSON bytes.
pub fn read_json_from_bytes(data: &[u8]) -> Result<SimulationResult, KineticsError> {
    let content = std::str::from_utf8(data)
        .map_err(|e| KineticsError::ParseError(format!("Invalid UTF-8: {e}")))?;
    let result: SimulationResult = serde_json::from_str(content)?;
    check_result(&result)?;
    Ok(result)
}

/// Write a simulation result to a JSON file.
pub fn write_json(
    result: &SimulationResult,
    path: impl AsRef<Path>,
    pretty: bool,
) -> Result<(), KineticsError> {
    let content = if pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };
    std::fs::write(path.as_ref(), content)?;
    Ok(())
}
