use std::fmt::{Debug, Display};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, IndicatorKind, Ohlcv,
    Price, price_window::PriceWindow, schema::check_field,
};

/// Configuration for the Moving Average ([`Ma`]) indicator.
///
/// # Example
///
/// ```rust
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, MaConfig};
///
/// let config = MaConfig::builder().period(20).build().unwrap();
/// assert_eq!(config.period(), 20);
/// assert_eq!(MaConfig::default().period(), 5);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MaConfig {
    period: usize,
}

impl IndicatorConfig for MaConfig {
    type Builder = MaConfigBuilder;

    const KIND: IndicatorKind = IndicatorKind::Ma;

    #[inline]
    fn builder() -> Self::Builder {
        MaConfigBuilder::new()
    }

    #[inline]
    fn min_len(&self) -> usize {
        self.period
    }
}

impl MaConfig {
    pub const DEFAULT_PERIOD: usize = 5;

    pub(crate) fn with_period(period: usize) -> Self {
        Self { period }
    }

    /// Window length (number of bars).
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for MaConfig {
    fn default() -> Self {
        Self::with_period(Self::DEFAULT_PERIOD)
    }
}

impl Display for MaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MaConfig({})", self.period)
    }
}

/// Builder for [`MaConfig`].
///
/// Defaults: period = 5.
pub struct MaConfigBuilder {
    period: usize,
}

impl MaConfigBuilder {
    fn new() -> Self {
        Self {
            period: MaConfig::default().period,
        }
    }

    /// Sets the window length.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }
}

impl IndicatorConfigBuilder<MaConfig> for MaConfigBuilder {
    fn build(self) -> Result<MaConfig, IndicatorError> {
        let period = check_field(MaConfig::KIND, "period", self.period)?;

        Ok(MaConfig::with_period(period))
    }
}

/// Simple Moving Average (MA) of close.
///
/// The unweighted mean of the last `period` closes. Returns `None` until
/// the window is full, so over `n` bars exactly `max(n - period + 1, 0)`
/// samples are defined, all at the tail.
///
/// The window is re-summed on every bar, O(period), so a flat run of
/// closes averages to exactly that close.
///
/// # Example
///
/// ```rust
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, Ma, MaConfig};
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
/// let mut ma = Ma::new(MaConfig::builder().period(3).build().unwrap());
///
/// assert_eq!(ma.compute(&Close(10.0)), None);
/// assert_eq!(ma.compute(&Close(11.0)), None);
/// assert_eq!(ma.compute(&Close(12.0)), Some(11.0));
/// ```
#[derive(Clone, Debug)]
pub struct Ma {
    config: MaConfig,
    window: PriceWindow,
    current: Option<Price>,
}

impl Indicator for Ma {
    type Config = MaConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: PriceWindow::new(config.period),
            current: None,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Price> {
        self.window.add(bar.close());

        #[allow(clippy::cast_precision_loss)]
        let period = self.config.period as f64;
        self.current = self.window.sum().map(|sum| sum / period);

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Price> {
        self.current
    }
}

impl Display for Ma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MA({})", self.config.period)
    }
}
