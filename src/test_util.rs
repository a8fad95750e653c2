// src/test_util.rs

use chrono::{Days, NaiveDate};

use crate::{Bar, PriceSeries};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() < e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// The `n`-th day after 2024-01-01.
pub fn day(n: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(u64::from(n))
}

/// Bar with high, low and close as given; open equals close.
pub fn ohlc(high: f64, low: f64, close: f64) -> Bar {
    Bar::new(day(0), close, high, low, close, 1_000)
}

/// Convenience: bar with just a close price (OHLC all equal to close).
pub fn bar(close: f64) -> Bar {
    ohlc(close, close, close)
}

/// A series of flat bars on consecutive days with the given closes.
pub fn closes(prices: &[f64]) -> PriceSeries {
    let bars = prices.iter().zip(0..).map(|(&close, n)| {
        Bar::new(day(n), close, close, close, close, 1_000)
    });
    PriceSeries::try_from_bars(bars).unwrap()
}
