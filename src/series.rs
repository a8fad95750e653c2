use serde::{Deserialize, Serialize};

use crate::{Bar, Ohlcv, Price, SeriesError};

/// Chronologically ordered daily bars.
///
/// Dates are strictly increasing and every bar has finite, positive prices
/// with open and close inside the session's high/low range. Both
/// [`try_from_bars`](PriceSeries::try_from_bars) and
/// [`push`](PriceSeries::push) enforce this, so indicators never see
/// malformed input.
///
/// An empty series is valid: indicators over it produce empty outputs.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Bar>", into = "Vec<Bar>")]
pub struct PriceSeries {
    bars: Vec<Bar>,
}

impl PriceSeries {
    /// Creates an empty series.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a series from bars in chronological order.
    ///
    /// # Errors
    ///
    /// Returns the first [`SeriesError`] found, in bar order.
    pub fn try_from_bars(bars: impl IntoIterator<Item = Bar>) -> Result<Self, SeriesError> {
        let bars = bars.into_iter();
        let mut series = Self {
            bars: Vec::with_capacity(bars.size_hint().0),
        };

        for bar in bars {
            series.push(bar)?;
        }

        Ok(series)
    }

    /// Appends the next session.
    ///
    /// # Errors
    ///
    /// Rejects a bar that does not strictly follow the last date or whose
    /// prices are inconsistent. The series is left unchanged on error.
    pub fn push(&mut self, bar: Bar) -> Result<(), SeriesError> {
        let index = self.bars.len();
        let date = bar.date();

        if let Some(last) = self.bars.last()
            && last.date() >= date
        {
            return Err(SeriesError::OutOfOrder {
                index,
                date,
                previous: last.date(),
            });
        }

        for (field, value) in [
            ("open", bar.open()),
            ("high", bar.high()),
            ("low", bar.low()),
            ("close", bar.close()),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(SeriesError::InvalidPrice {
                    index,
                    date,
                    field,
                    value,
                });
            }
        }

        let range = bar.low()..=bar.high();
        for (field, value) in [("open", bar.open()), ("close", bar.close())] {
            if !range.contains(&value) {
                return Err(SeriesError::OutsideRange { index, date, field });
            }
        }

        let prev_close = self.bars.last().map(Ohlcv::close);
        self.bars.push(bar.with_change_from(prev_close));

        Ok(())
    }

    /// Number of bars.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.bars.len()
    }

    /// `true` when the series holds no bars.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// All bars, oldest first.
    #[inline]
    #[must_use]
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, Bar> {
        self.bars.iter()
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Bar> {
        self.bars.get(index)
    }

    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }

    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Closing prices, oldest first.
    pub fn closes(&self) -> impl Iterator<Item = Price> + '_ {
        self.bars.iter().map(Ohlcv::close)
    }
}

impl TryFrom<Vec<Bar>> for PriceSeries {
    type Error = SeriesError;

    fn try_from(bars: Vec<Bar>) -> Result<Self, Self::Error> {
        Self::try_from_bars(bars)
    }
}

impl From<PriceSeries> for Vec<Bar> {
    fn from(series: PriceSeries) -> Self {
        series.bars
    }
}

impl<'a> IntoIterator for &'a PriceSeries {
    type Item = &'a Bar;
    type IntoIter = std::slice::Iter<'a, Bar>;

    fn into_iter(self) -> Self::IntoIter {
        self.bars.iter()
    }
}
