use std::fmt::{Debug, Display};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, IndicatorKind, Ohlcv,
    Price, schema::check_field,
};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use overlay_ta::{EmaConfig, IndicatorConfig, IndicatorConfigBuilder};
///
/// let config = EmaConfig::builder().period(26).build().unwrap();
/// assert_eq!(config.period(), 26);
/// assert_eq!(config.min_len(), 1);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    period: usize,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    const KIND: IndicatorKind = IndicatorKind::Ema;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
    }

    /// The EMA is seeded from the first close, so one bar suffices.
    #[inline]
    fn min_len(&self) -> usize {
        1
    }
}

impl EmaConfig {
    pub const DEFAULT_PERIOD: usize = 12;

    pub(crate) fn with_period(period: usize) -> Self {
        Self { period }
    }

    /// Smoothing length.
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    /// Smoothing factor `2 / (period + 1)`.
    #[inline]
    #[must_use]
    pub fn alpha(&self) -> f64 {
        smoothing_factor(self.period)
    }
}

impl Default for EmaConfig {
    fn default() -> Self {
        Self::with_period(Self::DEFAULT_PERIOD)
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({})", self.period)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: period = 12.
pub struct EmaConfigBuilder {
    period: usize,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            period: EmaConfig::default().period,
        }
    }

    /// Sets the smoothing length.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    fn build(self) -> Result<EmaConfig, IndicatorError> {
        let period = check_field(EmaConfig::KIND, "period", self.period)?;

        Ok(EmaConfig::with_period(period))
    }
}

#[allow(clippy::cast_precision_loss)]
fn smoothing_factor(period: usize) -> f64 {
    2.0 / (period + 1) as f64
}

/// Single-seed exponential recurrence over an arbitrary value stream.
///
/// The first value seeds the line; every later value moves it by
/// `alpha × (value − previous)`. Shared by [`Ema`] and the MACD lines.
#[derive(Clone, Copy, Debug)]
pub(crate) struct EmaLine {
    alpha: f64,
    current: Option<f64>,
}

impl EmaLine {
    pub(crate) fn new(period: usize) -> Self {
        Self {
            alpha: smoothing_factor(period),
            current: None,
        }
    }

    #[inline]
    pub(crate) fn next(&mut self, value: f64) -> f64 {
        let next = match self.current {
            None => value,
            Some(previous) => self.alpha.mul_add(value - previous, previous),
        };
        self.current = Some(next);
        next
    }

    #[inline]
    pub(crate) fn value(&self) -> Option<f64> {
        self.current
    }
}

/// Exponential Moving Average (EMA) of close.
///
/// A weighted moving average that gives more weight to recent
/// closes, with smoothing factor `α = 2 / (period + 1)`:
///
/// ```text
/// EMA[0] = close[0]
/// EMA[i] = (close[i] − EMA[i−1]) × α + EMA[i−1]
/// ```
///
/// Seeded from the first close, so it is defined on every bar; there
/// is no warm-up gap.
///
/// # Example
///
/// ```
/// use overlay_ta::{Ema, EmaConfig, IndicatorConfig, IndicatorConfigBuilder};
/// # use overlay_ta::{Ohlcv, Price};
/// #
/// # struct Close(f64);
/// # impl Ohlcv for Close {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// # }
///
/// let mut ema = Ema::new(EmaConfig::builder().period(3).build().unwrap());
///
/// // Seeded from the first close
/// assert_eq!(ema.compute(&Close(4.0)), Some(4.0));
///
/// // EMA(3) α = 0.5: (8 − 4) × 0.5 + 4 = 6
/// assert_eq!(ema.compute(&Close(8.0)), Some(6.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    line: EmaLine,
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            line: EmaLine::new(config.period),
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        Some(self.line.next(bar.close()))
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.line.value()
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({})", self.config.period)
    }
}
