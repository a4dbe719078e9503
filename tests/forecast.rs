//! End-to-end checks through the public API, starting from an artifact on disk.

use std::path::PathBuf;
use std::sync::Arc;
use std::thread;

use chrono::{Days, NaiveDate};
use mandi_forecast::io::{ArtifactSource, load_context};
use mandi_forecast::predict::FORECAST_HORIZON_DAYS;
use mandi_forecast::{PredictError, Predictor};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures").join(name)
}

fn tree_predictor() -> Predictor {
    let context = load_context(&ArtifactSource::File(fixture("tree_model.json"))).unwrap();
    Predictor::new(Arc::new(context))
}

fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// Random dates between 2015 and 2034.
fn random_dates(seed: u64, n: usize) -> Vec<NaiveDate> {
    let mut rng = StdRng::seed_from_u64(seed);
    let base = ymd(2015, 1, 1);
    (0..n)
        .map(|_| base.checked_add_days(Days::new(rng.gen_range(0..7300))).unwrap())
        .collect()
}

#[test]
fn fixture_prices() {
    let p = tree_predictor();
    assert_eq!(p.predict_price("2025-01-15", "Tomato").unwrap(), 1850.0);
    assert_eq!(p.predict_price("2024-07-04", "Potato").unwrap(), 1740.0);
    // 2024-12-31 is in ISO week 1, which the model prices differently from week 53.
    assert_eq!(p.predict_price("2024-12-31", "Onion").unwrap(), 1330.0);
}

#[test]
fn commodities_follow_artifact_order() {
    assert_eq!(tree_predictor().commodities(), ["Onion", "Potato", "Tomato"]);
}

#[test]
fn predict_price_is_deterministic() {
    let p = tree_predictor();
    for date in random_dates(7, 50) {
        let date = date.to_string();
        let first = p.predict_price(&date, "Potato").unwrap();
        let second = p.predict_price(&date, "Potato").unwrap();
        assert_eq!(first.to_bits(), second.to_bits(), "{date}");
    }
}

#[test]
fn range_is_consecutive_and_complete() {
    let p = tree_predictor();
    let mut rng = StdRng::seed_from_u64(11);
    for start in random_dates(11, 25) {
        let days = rng.gen_range(0..120);
        let series = p.predict_range(&start.to_string(), "Tomato", days).unwrap();

        assert_eq!(series.len(), days as usize);
        for (i, point) in series.iter().enumerate() {
            assert_eq!(point.date, start.checked_add_days(Days::new(i as u64)).unwrap());
        }
        assert!(series.points.windows(2).all(|w| w[0].date < w[1].date));
    }
}

#[test]
fn single_day_range_matches_predict_price() {
    let p = tree_predictor();
    for date in random_dates(3, 40) {
        let date = date.to_string();
        for commodity in ["Onion", "Potato", "Tomato"] {
            let price = p.predict_price(&date, commodity).unwrap();
            let series = p.predict_range(&date, commodity, 1).unwrap();
            assert_eq!(series.points[0].predicted_price, price, "{commodity} {date}");
        }
    }
}

#[test]
fn batched_range_matches_row_by_row() {
    let p = tree_predictor();
    let start = ymd(2024, 11, 20);
    let series = p.predict_range_from(start, "Onion", 90).unwrap();
    for point in &series {
        assert_eq!(point.predicted_price, p.predict_price_on(point.date, "Onion").unwrap());
    }
}

#[test]
fn sowing_window_hits_first_summer_day() {
    let rec = tree_predictor()
        .best_sowing_window_on(ymd(2025, 1, 1), "Tomato", 90)
        .unwrap();
    assert_eq!(rec.expected_harvest_date, ymd(2025, 5, 1));
    assert_eq!(rec.best_sowing_date, ymd(2025, 1, 31));
    assert_eq!(rec.expected_peak_price, 2060.0);
}

#[test]
fn sowing_window_properties() {
    let p = tree_predictor();
    let mut rng = StdRng::seed_from_u64(19);
    for today in random_dates(19, 12) {
        let k = rng.gen_range(0..400);
        let rec = p.best_sowing_window_on(today, "Potato", k).unwrap();

        assert_eq!((rec.expected_harvest_date - rec.best_sowing_date).num_days(), k);

        let series = p.predict_range_from(today, "Potato", FORECAST_HORIZON_DAYS).unwrap();
        let max = series.iter().map(|pt| pt.predicted_price).fold(f64::MIN, f64::max);
        assert_eq!(rec.expected_peak_price, max);
        let first_peak = series.iter().find(|pt| pt.predicted_price == max).unwrap();
        assert_eq!(rec.expected_harvest_date, first_peak.date);
    }
}

#[test]
fn best_sowing_window_starts_today() {
    let p = tree_predictor();
    let rec = p.best_sowing_window("Onion", 60).unwrap();
    let today = chrono::Local::now().date_naive();
    // The harvest lies within the one-year horizon (allowing for a date change mid-test).
    assert!(rec.expected_harvest_date >= today.pred_opt().unwrap());
    assert!(rec.expected_harvest_date <= today.checked_add_days(Days::new(366)).unwrap());
}

#[test]
fn unknown_commodity_is_an_error() {
    let p = tree_predictor();
    assert_eq!(
        p.predict_price("2024-01-01", "UnknownVeg"),
        Err(PredictError::UnknownCommodity {
            commodity: "UnknownVeg".to_string()
        })
    );
    assert!(matches!(
        p.best_sowing_window("UnknownVeg", 90),
        Err(PredictError::UnknownCommodity { .. })
    ));
}

#[test]
fn predictor_is_shared_across_threads() {
    let p = tree_predictor();
    let expected = p.predict_range("2025-03-01", "Tomato", 30).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let p = p.clone();
            thread::spawn(move || p.predict_range("2025-03-01", "Tomato", 30).unwrap())
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), expected);
    }
}
