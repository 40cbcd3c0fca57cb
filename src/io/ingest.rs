//! CSV ingest.
//!
//! Turns a `S_uM,Velocity,Condition` CSV into `Measurement`s. Validation of the
//! values themselves (positivity, group sizes) belongs to
//! `data::group_by_condition`; here we only reject rows that cannot be parsed.
//!
//! Column names are matched case-sensitively; `substrate`, `velocity` and
//! `condition` are accepted as aliases.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use crate::domain::Measurement;
use crate::error::AppError;

/// Load measurements from a CSV file.
pub fn load_measurements(path: &Path) -> Result<Vec<Measurement>, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::new(2, format!("Failed to open CSV '{}': {e}", path.display())))?;
    let out = read_measurements(file)
        .map_err(|e| AppError::new(2, format!("Invalid CSV '{}': {e}", path.display())))?;
    log::info!("loaded {} measurements from {}", out.len(), path.display());
    Ok(out)
}

/// Parse measurements from any CSV reader.
pub fn read_measurements<R: Read>(reader: R) -> Result<Vec<Measurement>, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut out = Vec::new();
    for (i, record) in reader.deserialize::<Measurement>().enumerate() {
        // Line 1 is the header.
        let line = i + 2;
        let m = record.map_err(|e| AppError::new(2, format!("line {line}: {e}")))?;
        out.push(m);
    }
    if out.is_empty() {
        return Err(AppError::new(2, "no data rows"));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{CONTROL, INHIBITOR};

    #[test]
    fn reads_canonical_columns() {
        let csv = "S_uM,Velocity,Condition\n5,18,Control\n10, 30 ,Control\n5,7,Inhibitor\n";
        let data = read_measurements(csv.as_bytes()).unwrap();
        assert_eq!(data.len(), 3);
        assert_eq!(data[1], Measurement::new(10.0, 30.0, CONTROL));
        assert_eq!(data[2].condition, INHIBITOR);
    }

    #[test]
    fn reads_lowercase_aliases() {
        let csv = "condition,substrate,velocity\nControl,25,52\n";
        let data = read_measurements(csv.as_bytes()).unwrap();
        assert_eq!(data[0], Measurement::new(25.0, 52.0, CONTROL));
    }

    #[test]
    fn reports_line_of_bad_row() {
        let csv = "S_uM,Velocity,Condition\n5,18,Control\nfive,30,Control\n";
        let err = read_measurements(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 3"));
    }

    #[test]
    fn empty_file_is_an_error() {
        assert!(read_measurements("S_uM,Velocity,Condition\n".as_bytes()).is_err());
    }
}
