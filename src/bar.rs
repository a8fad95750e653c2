use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Ohlcv, Price};

/// One trading session.
///
/// A bar is immutable once built. Its [`change`](Bar::change) is filled in
/// when it is placed into a [`PriceSeries`](crate::PriceSeries), because it
/// depends on the previous session's close.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use overlay_ta::{Bar, PriceSeries};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 3, d).unwrap();
/// let series = PriceSeries::try_from_bars([
///     Bar::new(day(4), 10.0, 10.5, 9.8, 10.0, 1_200),
///     Bar::new(day(5), 10.0, 11.2, 9.9, 11.0, 1_500),
/// ])
/// .unwrap();
///
/// assert_eq!(series.bars()[0].change(), None);
/// assert_eq!(series.bars()[1].change(), Some(10.0));
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    date: NaiveDate,
    open: Price,
    high: Price,
    low: Price,
    close: Price,
    volume: u64,
    #[serde(default, skip_deserializing)]
    change: Option<f64>,
}

impl Bar {
    /// Builds a bar. Consistency of the prices is checked when the bar is
    /// added to a series.
    #[must_use]
    pub fn new(
        date: NaiveDate,
        open: Price,
        high: Price,
        low: Price,
        close: Price,
        volume: u64,
    ) -> Self {
        Self {
            date,
            open,
            high,
            low,
            close,
            volume,
            change: None,
        }
    }

    /// Trading day.
    #[inline]
    #[must_use]
    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// Shares traded during the session.
    #[inline]
    #[must_use]
    pub fn shares(&self) -> u64 {
        self.volume
    }

    /// Percent change of close against the previous session's close.
    ///
    /// `None` for the first bar of a series and for bars not yet placed
    /// in one.
    #[inline]
    #[must_use]
    pub fn change(&self) -> Option<f64> {
        self.change
    }

    pub(crate) fn with_change_from(mut self, prev_close: Option<Price>) -> Self {
        self.change = prev_close.map(|prev| (self.close - prev) / prev * 100.0);
        self
    }
}

impl Ohlcv for Bar {
    #[inline]
    fn open(&self) -> Price {
        self.open
    }

    #[inline]
    fn high(&self) -> Price {
        self.high
    }

    #[inline]
    fn low(&self) -> Price {
        self.low
    }

    #[inline]
    fn close(&self) -> Price {
        self.close
    }

    #[inline]
    #[allow(clippy::cast_precision_loss)]
    fn volume(&self) -> f64 {
        self.volume as f64
    }
}
