use crate::{IndicatorError, IndicatorKind, IndicatorParams, Ohlcv};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its validated
/// parameters. Configs are value types: cheap to copy, compare, and hash.
/// [`Default`] yields the kind's default parameter set.
pub trait IndicatorConfig:
    Sized + Copy + PartialEq + Eq + Hash + Display + Debug + Default + Into<IndicatorParams>
{
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// The indicator kind this config parameterizes.
    const KIND: IndicatorKind;

    /// Returns a new builder seeded with the default parameters.
    fn builder() -> Self::Builder;

    /// Number of bars needed before the first defined output.
    ///
    /// A series shorter than this yields only undefined samples.
    fn min_len(&self) -> usize;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Validates the parameters and builds the config.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] naming the first field outside
    /// its declared bounds.
    fn build(self) -> Result<Config, IndicatorError>;
}

/// A technical indicator fed one bar at a time.
///
/// Indicators hold recurrence state and update on each call to
/// [`compute`](Indicator::compute). Output is `None` while the indicator
/// lacks the history it needs.
///
/// [`batch`](Indicator::batch) runs the indicator over a whole series and
/// returns one sample per bar, aligned index-for-index with the input.
///
/// # Example
///
/// ```
/// use overlay_ta::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Ma, MaConfig};
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
/// let config = MaConfig::builder().period(3).build().unwrap();
/// let mut ma = Ma::new(config);
///
/// assert_eq!(ma.compute(&Close(10.0)), None);
/// assert_eq!(ma.compute(&Close(20.0)), None);
/// assert_eq!(ma.compute(&Close(30.0)), Some(20.0));
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. `f64` for single-line indicators,
    /// a struct for composite ones (MACD, KDJ).
    type Output: Copy + Send + Sync + Debug;

    /// Creates a new indicator from the given config.
    fn new(config: Self::Config) -> Self;

    /// Feeds the next bar and returns the updated value, or `None` if the
    /// indicator is not yet defined.
    fn compute(&mut self, bar: &impl Ohlcv) -> Option<Self::Output>;

    /// Returns the last computed value without advancing state.
    fn value(&self) -> Option<Self::Output>;

    /// Runs a fresh indicator over `bars`, one output per bar.
    fn batch(config: Self::Config, bars: &[impl Ohlcv]) -> Vec<Option<Self::Output>> {
        let mut indicator = Self::new(config);
        bars.iter().map(|bar| indicator.compute(bar)).collect()
    }
}
