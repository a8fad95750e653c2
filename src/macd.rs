use std::fmt::{Debug, Display};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, IndicatorKind, Ohlcv,
    Price, ema::EmaLine, schema::check_field,
};

/// Configuration for the [`Macd`] indicator.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, MacdConfig};
///
/// let config = MacdConfig::builder().fast(10).slow(20).signal(5).build().unwrap();
/// assert_eq!((config.fast(), config.slow(), config.signal()), (10, 20, 5));
///
/// let standard = MacdConfig::default();
/// assert_eq!((standard.fast(), standard.slow(), standard.signal()), (12, 26, 9));
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    const KIND: IndicatorKind = IndicatorKind::Macd;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    /// All three lines are single-seed EMAs, defined from the first bar.
    #[inline]
    fn min_len(&self) -> usize {
        1
    }
}

impl MacdConfig {
    pub const DEFAULT_FAST: usize = 12;
    pub const DEFAULT_SLOW: usize = 26;
    pub const DEFAULT_SIGNAL: usize = 9;

    pub(crate) fn with_periods(fast: usize, slow: usize, signal: usize) -> Self {
        Self { fast, slow, signal }
    }

    /// Fast EMA length.
    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    /// Slow EMA length.
    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    /// Signal (DEA) EMA length.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }
}

impl Default for MacdConfig {
    fn default() -> Self {
        Self::with_periods(
            Self::DEFAULT_FAST,
            Self::DEFAULT_SLOW,
            Self::DEFAULT_SIGNAL,
        )
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MacdConfig({}, {}, {})", self.fast, self.slow, self.signal)
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: fast = 12, slow = 26, signal = 9.
pub struct MacdConfigBuilder {
    fast: usize,
    slow: usize,
    signal: usize,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        let MacdConfig { fast, slow, signal } = MacdConfig::default();
        Self { fast, slow, signal }
    }

    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: usize) -> Self {
        self.fast = fast;
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: usize) -> Self {
        self.slow = slow;
        self
    }

    #[inline]
    #[must_use]
    pub fn signal(mut self, signal: usize) -> Self {
        self.signal = signal;
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    fn build(self) -> Result<MacdConfig, IndicatorError> {
        let kind = MacdConfig::KIND;

        Ok(MacdConfig::with_periods(
            check_field(kind, "fast", self.fast)?,
            check_field(kind, "slow", self.slow)?,
            check_field(kind, "signal", self.signal)?,
        ))
    }
}

/// One MACD sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MacdValue {
    dif: Price,
    dea: Price,
    histogram: Price,
}

impl MacdValue {
    /// Fast EMA minus slow EMA.
    #[inline]
    #[must_use]
    pub fn dif(&self) -> Price {
        self.dif
    }

    /// Signal line: EMA of `dif`.
    #[inline]
    #[must_use]
    pub fn dea(&self) -> Price {
        self.dea
    }

    /// `(dif − dea) × 2`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> Price {
        self.histogram
    }
}

impl Display for MacdValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdValue(dif={}, dea={}, histogram={})",
            self.dif, self.dea, self.histogram
        )
    }
}

/// Moving Average Convergence/Divergence.
///
/// ```text
/// dif       = EMA(close, fast) − EMA(close, slow)
/// dea       = EMA(dif, signal)
/// histogram = (dif − dea) × 2
/// ```
///
/// Every EMA is seeded from its own first input, so all three lines are
/// defined from the first bar, where they are all zero.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, Macd, MacdConfig};
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
/// let config = MacdConfig::builder().fast(1).slow(3).signal(1).build().unwrap();
/// let mut macd = Macd::new(config);
///
/// assert_eq!(macd.compute(&Close(10.0)).unwrap().dif(), 0.0);
///
/// // fast EMA(1) = 14, slow EMA(3) = 10 + (14 − 10) × 0.5 = 12
/// let value = macd.compute(&Close(14.0)).unwrap();
/// assert_eq!(value.dif(), 2.0);
/// assert_eq!(value.dea(), 2.0);
/// assert_eq!(value.histogram(), 0.0);
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: EmaLine,
    slow: EmaLine,
    signal: EmaLine,
    current: Option<MacdValue>,
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: EmaLine::new(config.fast),
            slow: EmaLine::new(config.slow),
            signal: EmaLine::new(config.signal),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<MacdValue> {
        let close = bar.close();
        let dif = self.fast.next(close) - self.slow.next(close);
        let dea = self.signal.next(dif);

        self.current = Some(MacdValue {
            dif,
            dea,
            histogram: (dif - dea) * 2.0,
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<MacdValue> {
        self.current
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal
        )
    }
}
