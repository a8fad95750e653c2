use std::{
    collections::VecDeque,
    fmt::{Debug, Display},
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, IndicatorError, IndicatorKind, Ohlcv,
    Price, schema::check_field,
};

/// Configuration for the stochastic [`Kdj`] indicator.
///
/// `period` is the high/low observation window; `k` and `d` are the
/// smoothing factors of the K and D lines.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, KdjConfig};
///
/// let config = KdjConfig::builder().period(14).build().unwrap();
/// assert_eq!((config.period(), config.k(), config.d()), (14, 3, 3));
/// assert_eq!(config.min_len(), 14);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct KdjConfig {
    period: usize,
    k: usize,
    d: usize,
}

impl IndicatorConfig for KdjConfig {
    type Builder = KdjConfigBuilder;

    const KIND: IndicatorKind = IndicatorKind::Kdj;

    #[inline]
    fn builder() -> Self::Builder {
        KdjConfigBuilder::new()
    }

    #[inline]
    fn min_len(&self) -> usize {
        self.period
    }
}

impl KdjConfig {
    pub const DEFAULT_PERIOD: usize = 9;
    pub const DEFAULT_K: usize = 3;
    pub const DEFAULT_D: usize = 3;

    pub(crate) fn with_periods(period: usize, k: usize, d: usize) -> Self {
        Self { period, k, d }
    }

    /// Observation window length.
    #[inline]
    #[must_use]
    pub fn period(&self) -> usize {
        self.period
    }

    /// K smoothing factor.
    #[inline]
    #[must_use]
    pub fn k(&self) -> usize {
        self.k
    }

    /// D smoothing factor.
    #[inline]
    #[must_use]
    pub fn d(&self) -> usize {
        self.d
    }
}

impl Default for KdjConfig {
    fn default() -> Self {
        Self::with_periods(Self::DEFAULT_PERIOD, Self::DEFAULT_K, Self::DEFAULT_D)
    }
}

impl Display for KdjConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KdjConfig({}, {}, {})", self.period, self.k, self.d)
    }
}

/// Builder for [`KdjConfig`].
///
/// Defaults: period = 9, k = 3, d = 3.
pub struct KdjConfigBuilder {
    period: usize,
    k: usize,
    d: usize,
}

impl KdjConfigBuilder {
    fn new() -> Self {
        let KdjConfig { period, k, d } = KdjConfig::default();
        Self { period, k, d }
    }

    #[inline]
    #[must_use]
    pub fn period(mut self, period: usize) -> Self {
        self.period = period;
        self
    }

    #[inline]
    #[must_use]
    pub fn k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    #[inline]
    #[must_use]
    pub fn d(mut self, d: usize) -> Self {
        self.d = d;
        self
    }
}

impl IndicatorConfigBuilder<KdjConfig> for KdjConfigBuilder {
    fn build(self) -> Result<KdjConfig, IndicatorError> {
        let kind = KdjConfig::KIND;

        Ok(KdjConfig::with_periods(
            check_field(kind, "period", self.period)?,
            check_field(kind, "k", self.k)?,
            check_field(kind, "d", self.d)?,
        ))
    }
}

/// One KDJ sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KdjValue {
    k: Price,
    d: Price,
    j: Price,
}

impl KdjValue {
    /// Smoothed raw stochastic value, in `[0, 100]`.
    #[inline]
    #[must_use]
    pub fn k(&self) -> Price {
        self.k
    }

    /// Smoothed K, in `[0, 100]`.
    #[inline]
    #[must_use]
    pub fn d(&self) -> Price {
        self.d
    }

    /// `3K − 2D`. Unbounded.
    #[inline]
    #[must_use]
    pub fn j(&self) -> Price {
        self.j
    }
}

impl Display for KdjValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "KdjValue(k={}, d={}, j={})", self.k, self.d, self.j)
    }
}

/// Raw stochastic value reported when the window's high equals its low.
const FLAT_RSV: f64 = 50.0;

/// Starting point of the K and D recurrences.
const SEED: f64 = 50.0;

/// Stochastic oscillator with K, D and J lines.
///
/// Over the last `period` bars:
///
/// ```text
/// RSV = (close − lowest low) / (highest high − lowest low) × 100
/// K   = ((k − 1) × K_prev + RSV) / k
/// D   = ((d − 1) × D_prev + K) / d
/// J   = 3K − 2D
/// ```
///
/// `K_prev` and `D_prev` start at 50. A window with no range (highest high
/// equal to lowest low) has RSV 50. Output is `None` until `period` bars
/// have been seen.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorConfig, IndicatorConfigBuilder, Kdj, KdjConfig};
/// # use overlay_ta::{Ohlcv, Price};
/// #
/// # struct Flat(f64);
/// # impl Ohlcv for Flat {
/// #     fn open(&self) -> Price { self.0 }
/// #     fn high(&self) -> Price { self.0 }
/// #     fn low(&self) -> Price { self.0 }
/// #     fn close(&self) -> Price { self.0 }
/// # }
///
/// let mut kdj = Kdj::new(KdjConfig::builder().period(2).build().unwrap());
///
/// assert_eq!(kdj.compute(&Flat(10.0)), None);
///
/// let value = kdj.compute(&Flat(10.0)).unwrap();
/// assert_eq!((value.k(), value.d(), value.j()), (50.0, 50.0, 50.0));
/// ```
#[derive(Clone, Debug)]
pub struct Kdj {
    config: KdjConfig,
    window: VecDeque<(Price, Price)>,
    prev_k: f64,
    prev_d: f64,
    current: Option<KdjValue>,
    k_weight: f64,
    d_weight: f64,
}

impl Indicator for Kdj {
    type Config = KdjConfig;
    type Output = KdjValue;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            window: VecDeque::with_capacity(config.period),
            prev_k: SEED,
            prev_d: SEED,
            current: None,
            #[allow(clippy::cast_precision_loss)]
            k_weight: config.k as f64,
            #[allow(clippy::cast_precision_loss)]
            d_weight: config.d as f64,
        }
    }

    #[inline]
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<KdjValue> {
        if self.window.len() == self.config.period {
            self.window.pop_front();
        }
        self.window.push_back((bar.high(), bar.low()));

        if self.window.len() < self.config.period {
            return None;
        }

        let rsv = self.rsv(bar.close());
        let k = (self.k_weight - 1.0).mul_add(self.prev_k, rsv) / self.k_weight;
        let d = (self.d_weight - 1.0).mul_add(self.prev_d, k) / self.d_weight;

        self.prev_k = k;
        self.prev_d = d;
        self.current = Some(KdjValue {
            k,
            d,
            j: 3.0f64.mul_add(k, -2.0 * d),
        });

        self.current
    }

    #[inline]
    fn value(&self) -> Option<KdjValue> {
        self.current
    }
}

impl Kdj {
    fn rsv(&self, close: Price) -> f64 {
        let (highest, lowest) = self.window.iter().fold(
            (f64::NEG_INFINITY, f64::INFINITY),
            |(highest, lowest), &(high, low)| (highest.max(high), lowest.min(low)),
        );

        let range = highest - lowest;
        if range > 0.0 {
            (close - lowest) / range * 100.0
        } else {
            FLAT_RSV
        }
    }
}

impl Display for Kdj {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "KDJ({}, {}, {})",
            self.config.period, self.config.k, self.config.d
        )
    }
}
