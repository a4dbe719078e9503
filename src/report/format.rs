//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the prediction code stays clean and testable
//! - output changes are localized (golden tests below)

use crate::domain::{ForecastSeries, SowingRecommendation};
use crate::predict::ModelContext;

/// Header naming the model that produced the numbers.
pub fn format_model_header(context: &ModelContext) -> String {
    let target = context.target().unwrap_or("price");
    format!(
        "=== mandi - {} ({}, {}) ===\n",
        context.name(),
        context.model().kind(),
        target
    )
}

pub fn format_commodities(names: &[String]) -> String {
    let mut out = format!("Commodities ({}):\n", names.len());
    for (code, name) in names.iter().enumerate() {
        out.push_str(&format!("  {code:>3}  {name}\n"));
    }
    out
}

pub fn format_price(date: &str, commodity: &str, price: f64) -> String {
    format!("Predicted modal price for {commodity} on {date}: {price:.2}\n")
}

/// Day-by-day table plus a short summary line.
pub fn format_forecast_table(commodity: &str, series: &ForecastSeries) -> String {
    let mut out = String::new();

    let (Some(first), Some(last)) = (series.first_date(), series.last_date()) else {
        out.push_str(&format!("Forecast for {commodity}: no days requested.\n"));
        return out;
    };

    out.push_str(&format!(
        "Forecast for {commodity}: {first} .. {last} ({} days)\n",
        series.len()
    ));
    out.push_str(&format!("{:<12} {:>12}\n", "date", "price"));
    for p in series {
        out.push_str(&format!("{:<12} {:>12.2}\n", p.date.to_string(), p.predicted_price));
    }

    if let Some((lo, hi)) = series.price_range() {
        out.push_str(&format!("Range: min={lo:.2} max={hi:.2}\n"));
    }
    out
}

pub fn format_sowing(rec: &SowingRecommendation) -> String {
    let mut out = String::new();
    out.push_str(&format!("Sowing window for {}:\n", rec.commodity));
    out.push_str(&format!("  Best sowing date:      {}\n", rec.best_sowing_date));
    out.push_str(&format!("  Expected harvest date: {}\n", rec.expected_harvest_date));
    out.push_str(&format!("  Expected peak price:   {:.2}\n", rec.expected_peak_price));
    out.push_str(&format!("  Crop duration:         {} days\n", rec.crop_duration_days()));
    out
}
