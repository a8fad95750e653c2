#![allow(dead_code)]

use chrono::NaiveDate;
use overlay_ta::{Bar, PriceSeries};
use serde::{Deserialize, de::DeserializeOwned};

/// Daily bars: a mixed stretch, twelve flat sessions at 52.00 starting at
/// index 40, then twelve sessions of strictly rising closes from index 60.
const DAILY_PATH: &str = "tests/fixtures/data/daily.csv";

pub const FLAT_RANGE: std::ops::Range<usize> = 40..52;
pub const RISING_RANGE: std::ops::Range<usize> = 60..72;

/// Expected single-line value for one session.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub date: NaiveDate,
    pub expected: f64,
}

/// Expected MACD lines for one session.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub date: NaiveDate,
    pub dif: f64,
    pub dea: f64,
    pub histogram: f64,
}

/// Expected KDJ lines for one session.
#[derive(Debug, Deserialize)]
pub struct RefKdjValue {
    pub date: NaiveDate,
    pub k: f64,
    pub d: f64,
    pub j: f64,
}

/// Load the daily fixture as raw bars.
pub fn load_bars() -> Vec<Bar> {
    load_records(DAILY_PATH, "invalid bar record")
}

/// Load single-value reference data (MA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load MACD reference data (dif, dea, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Load KDJ reference data (k, d, j).
pub fn load_kdj_ref(path: &str) -> Vec<RefKdjValue> {
    load_records(path, "invalid KDJ reference record")
}

fn load_records<T: DeserializeOwned>(path: &str, context: &str) -> Vec<T> {
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize()
        .map(|r| r.unwrap_or_else(|e| panic!("{context}: {e}")))
        .collect()
}

/// Load the daily fixture as a validated series.
pub fn load_series() -> PriceSeries {
    PriceSeries::try_from_bars(load_bars()).expect("fixture series is well formed")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}
