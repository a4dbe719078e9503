//! Export a forecast series to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets or downstream scripts.

use std::path::Path;

use crate::domain::ForecastSeries;
use crate::error::{AppError, EXIT_INPUT};

/// Write one `date,commodity,predicted_price` row per forecast day.
pub fn write_forecast_csv(path: &Path, commodity: &str, series: &ForecastSeries) -> Result<(), AppError> {
    let mut wtr = csv::Writer::from_path(path)
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to create export CSV '{}': {e}", path.display())))?;

    wtr.write_record(["date", "commodity", "predicted_price"])
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV header: {e}")))?;

    for p in series {
        let date = p.date.to_string();
        let price = format!("{:.2}", p.predicted_price);
        wtr.write_record([date.as_str(), commodity, price.as_str()])
            .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to write export CSV row: {e}")))?;
    }

    wtr.flush()
        .map_err(|e| AppError::new(EXIT_INPUT, format!("Failed to flush export CSV: {e}")))?;
    Ok(())
}
