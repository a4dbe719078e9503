//! Sowing-window search.
//!
//! Forecast one year ahead from today, take the first day with the highest
//! predicted price as the harvest date, and count the crop duration back from
//! it to get the sowing date.

use chrono::{Days, Local, NaiveDate};

use crate::domain::{ForecastPoint, ForecastSeries, SowingRecommendation};
use crate::error::PredictError;
use crate::predict::Predictor;

/// Length of the search horizon in days, starting today.
pub const FORECAST_HORIZON_DAYS: i64 = 365;

/// Crop duration used when the caller does not give one.
pub const DEFAULT_CROP_DURATION_DAYS: i64 = 90;

/// First point with the maximum predicted price (earliest date wins ties).
pub fn find_peak(series: &ForecastSeries) -> Option<&ForecastPoint> {
    series.iter().fold(None, |best: Option<&ForecastPoint>, p| match best {
        Some(b) if b.predicted_price >= p.predicted_price => Some(b),
        _ => Some(p),
    })
}

fn check_crop_duration(crop_duration_days: i64) -> Result<(), PredictError> {
    if crop_duration_days < 0 {
        return Err(PredictError::invalid_parameter(
            "crop_duration_days",
            crop_duration_days,
            "must be >= 0",
        ));
    }
    Ok(())
}

/// Build a recommendation from an already computed forecast.
pub fn recommend_from_series(
    commodity: &str,
    series: &ForecastSeries,
    crop_duration_days: i64,
) -> Result<SowingRecommendation, PredictError> {
    check_crop_duration(crop_duration_days)?;
    let peak = find_peak(series).ok_or_else(|| {
        PredictError::invalid_parameter("days", 0, "cannot search an empty forecast for a peak")
    })?;

    let best_sowing_date = peak
        .date
        .checked_sub_days(Days::new(crop_duration_days as u64))
        .ok_or_else(|| {
            PredictError::invalid_parameter(
                "crop_duration_days",
                crop_duration_days,
                format!("sowing date before {} is outside the supported calendar", peak.date),
            )
        })?;

    Ok(SowingRecommendation {
        commodity: commodity.to_string(),
        best_sowing_date,
        expected_harvest_date: peak.date,
        expected_peak_price: peak.predicted_price,
    })
}

impl Predictor {
    /// Best sowing date for `commodity` given a crop that takes
    /// `crop_duration_days` from sowing to harvest, searching from today.
    pub fn best_sowing_window(
        &self,
        commodity: &str,
        crop_duration_days: i64,
    ) -> Result<SowingRecommendation, PredictError> {
        self.best_sowing_window_on(Local::now().date_naive(), commodity, crop_duration_days)
    }

    /// Same as `best_sowing_window`, with the horizon starting at `today`.
    pub fn best_sowing_window_on(
        &self,
        today: NaiveDate,
        commodity: &str,
        crop_duration_days: i64,
    ) -> Result<SowingRecommendation, PredictError> {
        check_crop_duration(crop_duration_days)?;
        self.ensure_known(commodity)?;

        let series = self.predict_range_from(today, commodity, FORECAST_HORIZON_DAYS)?;
        let rec = recommend_from_series(commodity, &series, crop_duration_days)?;

        tracing::debug!(
            commodity,
            %today,
            sow = %rec.best_sowing_date,
            harvest = %rec.expected_harvest_date,
            peak = rec.expected_peak_price,
            "sowing window"
        );
        Ok(rec)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::domain::FeatureVector;
    use crate::features::CommodityVocabulary;
    use crate::models::Regressor;
    use crate::predict::ModelContext;

    /// Returns the month number as the price.
    #[derive(Debug)]
    struct MonthModel;

    impl Regressor for MonthModel {
        fn kind(&self) -> &'static str {
            "month"
        }

        fn predict_batch(&self, rows: &[FeatureVector]) -> Vec<f64> {
            rows.iter().map(|r| f64::from(r.month)).collect()
        }
    }

    fn predictor() -> Predictor {
        let vocab = CommodityVocabulary::new(["Tomato", "Onion"]).unwrap();
        Predictor::new(Arc::new(ModelContext::new("stub", vocab, Box::new(MonthModel))))
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn series(prices: &[f64]) -> ForecastSeries {
        ForecastSeries::new(
            ymd(2024, 1, 1)
                .iter_days()
                .zip(prices)
                .map(|(date, &predicted_price)| ForecastPoint {
                    date,
                    predicted_price,
                })
                .collect(),
        )
    }

    #[test]
    fn peak_prefers_earliest_tie() {
        let s = series(&[1.0, 5.0, 3.0, 5.0]);
        assert_eq!(find_peak(&s).unwrap().date, ymd(2024, 1, 2));
        assert!(find_peak(&ForecastSeries::default()).is_none());
    }

    #[test]
    fn harvest_is_first_december_day() {
        // Starting mid-March, the price peaks (12) on the first day of December.
        let rec = predictor()
            .best_sowing_window_on(ymd(2024, 3, 15), "Tomato", 90)
            .unwrap();
        assert_eq!(rec.expected_harvest_date, ymd(2024, 12, 1));
        assert_eq!(rec.best_sowing_date, ymd(2024, 9, 2));
        assert_eq!(rec.expected_peak_price, 12.0);
        assert_eq!(rec.crop_duration_days(), 90);
    }

    #[test]
    fn sowing_date_may_be_in_the_past() {
        let today = ymd(2024, 12, 10);
        let rec = predictor().best_sowing_window_on(today, "Onion", 120).unwrap();
        assert_eq!(rec.expected_harvest_date, today);
        assert!(rec.best_sowing_date < today);
    }

    #[test]
    fn zero_duration_sows_on_harvest_day() {
        let rec = predictor()
            .best_sowing_window_on(ymd(2024, 1, 1), "Tomato", 0)
            .unwrap();
        assert_eq!(rec.best_sowing_date, rec.expected_harvest_date);
    }

    #[test]
    fn negative_duration_is_invalid() {
        assert!(matches!(
            predictor().best_sowing_window_on(ymd(2024, 1, 1), "Tomato", -5),
            Err(PredictError::InvalidParameter {
                name: "crop_duration_days",
                ..
            })
        ));
    }

    #[test]
    fn negative_duration_is_rejected_for_a_given_series() {
        let err = recommend_from_series("Tomato", &series(&[1.0, 2.0]), -1).unwrap_err();
        assert_eq!(
            err,
            PredictError::InvalidParameter {
                name: "crop_duration_days",
                value: -1,
                reason: "must be >= 0".to_string(),
            }
        );
        assert_eq!(
            predictor().best_sowing_window_on(ymd(2024, 1, 1), "Tomato", -1),
            Err(err)
        );
    }

    #[test]
    fn unknown_commodity_is_rejected() {
        assert!(matches!(
            predictor().best_sowing_window("UnknownVeg", 90),
            Err(PredictError::UnknownCommodity { .. })
        ));
    }

    #[test]
    fn peak_matches_series_maximum() {
        let p = predictor();
        let today = ymd(2025, 6, 20);
        let rec = p.best_sowing_window_on(today, "Tomato", 45).unwrap();
        let series = p.predict_range_from(today, "Tomato", FORECAST_HORIZON_DAYS).unwrap();
        let max = series.iter().map(|pt| pt.predicted_price).fold(f64::MIN, f64::max);
        assert_eq!(rec.expected_peak_price, max);
    }
}
