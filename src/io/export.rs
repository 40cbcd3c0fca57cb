//! Write measurements as CSV.
//!
//! Used by `kinetics sample`; the output reads back through `ingest`.

use std::io::Write;

use crate::domain::Measurement;
use crate::error::AppError;

pub fn write_measurements_csv<W: Write>(writer: W, measurements: &[Measurement]) -> Result<(), AppError> {
    let mut w = csv::Writer::from_writer(writer);
    for m in measurements {
        w.serialize(m)
            .map_err(|e| AppError::new(2, format!("Failed to write CSV row: {e}")))?;
    }
    w.flush()
        .map_err(|e| AppError::new(2, format!("Failed to flush CSV output: {e}")))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::demo_measurements;
    use crate::io::ingest::read_measurements;

    #[test]
    fn written_csv_reads_back() {
        let data = demo_measurements();
        let mut buf = Vec::new();
        write_measurements_csv(&mut buf, &data).unwrap();
        let text = String::from_utf8(buf.clone()).unwrap();
        assert!(text.starts_with("S_uM,Velocity,Condition\n"));
        assert_eq!(read_measurements(buf.as_slice()).unwrap(), data);
    }
}
