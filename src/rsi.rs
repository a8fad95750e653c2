use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, IndicatorKind, Ohlcv,
    Price, schema::check_field,
};

/// Configuration for the Relative Strength Index ([`Rsi`]).
///
/// The first value appears on bar `period`; a shorter series has none.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, RsiConfig};
///
/// let config = RsiConfig::builder().period(6).build().unwrap();
/// assert_eq!(config.period(), 6);
/// assert_eq!(config.min_len(), 6);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    period: usize,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    const KIND: IndicatorKind = IndicatorKind::Rsi;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn min_len(&self) -> usize {
        self.period
    }
}

impl RsiConfig {
    pub const DEFAULT_PERIOD: usize = 14;

    pub(crate) fn with_period(period: usize) -> Self {
        Self { period }
    }

    /// Averaging length.
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }
}

impl Default for RsiConfig {
    fn default() -> Self {
        Self::with_period(Self::DEFAULT_PERIOD)
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({})", self.period)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: period = 14.
pub struct RsiConfigBuilder {
    period: usize,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            period: RsiConfig::DEFAULT_PERIOD,
        }
    }

    /// Sets the averaging length.
    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    fn build(self) -> Result<RsiConfig, IndicatorError> {
        let period = check_field(RsiConfig::KIND, "period", self.period)?;

        Ok(RsiConfig::with_period(period))
    }
}

#[derive(Clone, Debug)]
enum RsiState {
    Warmup {
        gain_total: f64,
        loss_total: f64,
        bars: usize,
    },
    Smoothed {
        avg_gain: f64,
        avg_loss: f64,
    },
}

/// Relative Strength Index of close, on a 0–100 scale.
///
/// Close-to-close moves inside the first `period` bars are split into
/// gains and losses, summed, and divided by `period`. That seeds both
/// averages and yields the first value on bar `period`. Later bars use
/// Wilder's smoothing:
///
/// ```text
/// avg_gain = (prev_avg_gain × (period − 1) + gain) / period
/// avg_loss = (prev_avg_loss × (period − 1) + loss) / period
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// When `avg_loss` is zero the ratio is undefined; RSI is then exactly
/// `100`, including on a perfectly flat series.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, Rsi, RsiConfig};
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
/// let mut rsi = Rsi::new(RsiConfig::builder().period(3).build().unwrap());
///
/// assert_eq!(rsi.compute(&Close(10.0)), None);
/// assert_eq!(rsi.compute(&Close(12.0)), None);
///
/// // Bar 3: changes +2, −1 → avg_gain = 2/3, avg_loss = 1/3 → RS = 2
/// let value = rsi.compute(&Close(11.0)).unwrap();
/// assert!((value - (100.0 - 100.0 / 3.0)).abs() < 1e-10);
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
    last_close: Option<Price>,
    state: RsiState,
    current: Option<Price>,
    weight: f64,
    carry: f64,
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = Price;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            last_close: None,
            state: RsiState::Warmup {
                gain_total: 0.0,
                loss_total: 0.0,
                bars: 0,
            },
            current: None,
            #[allow(clippy::cast_precision_loss)]
            weight: config.period as f64,
            #[allow(clippy::cast_precision_loss)]
            carry: (config.period - 1) as f64,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output> {
        let close = bar.close();
        let (gain, loss) = self
            .last_close
            .map_or((0.0, 0.0), |prev| Self::split_move(prev, close));
        self.last_close = Some(close);

        self.current = match &mut self.state {
            RsiState::Warmup {
                gain_total,
                loss_total,
                bars,
            } => {
                *gain_total += gain;
                *loss_total += loss;
                *bars += 1;

                if *bars == self.config.period {
                    let avg_gain = *gain_total / self.weight;
                    let avg_loss = *loss_total / self.weight;

                    self.state = RsiState::Smoothed { avg_gain, avg_loss };

                    Some(Self::index_from(avg_gain, avg_loss))
                } else {
                    None
                }
            }

            RsiState::Smoothed { avg_gain, avg_loss } => {
                *avg_gain = avg_gain.mul_add(self.carry, gain) / self.weight;
                *avg_loss = avg_loss.mul_add(self.carry, loss) / self.weight;

                Some(Self::index_from(*avg_gain, *avg_loss))
            }
        };

        self.current
    }

    #[inline]
    fn value(&self) -> Option<Self::Output> {
        self.current
    }
}

impl Rsi {
    #[inline]
    fn split_move(last_close: Price, close: Price) -> (Price, Price) {
        let delta = close - last_close;
        (delta.max(0.0), (-delta).max(0.0))
    }

    #[inline]
    fn index_from(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        }
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({})", self.config.period)
    }
}
