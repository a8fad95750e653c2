//! Chart overlay indicators over daily price series.
//!
//! Two layers:
//!
//! - Streaming indicators ([`Ma`], [`Ema`], [`Macd`], [`Rsi`], [`Kdj`]) that
//!   accept any type implementing [`Ohlcv`] one bar at a time and return
//!   typed results. Values are `None` until enough data has been received.
//! - An overlay pipeline: validated [`IndicatorParams`], a [`Registry`]
//!   holding at most one [`IndicatorInstance`] per [`IndicatorKind`], and
//!   [`evaluate`], which turns a [`PriceSeries`] and a registry into one
//!   [`IndicatorOutput`] line per active overlay, aligned with the bars.
//!
//! Each indicator type exposes [`new`](Ma::new), [`compute`](Ma::compute),
//! [`value`](Ma::value) and [`batch`](Ma::batch) as inherent methods, no
//! trait import needed. Import [`Indicator`] only for generic code.
//!
//! # Example
//!
//! ```
//! use chrono::{Days, NaiveDate};
//! use overlay_ta::{
//!     evaluate, Bar, IndicatorInstance, IndicatorKind, ParamMap, PriceSeries, Registry,
//! };
//!
//! let start = NaiveDate::from_ymd_opt(2024, 1, 2).unwrap();
//! let series = PriceSeries::try_from_bars((0..40u32).map(|i| {
//!     let close = 100.0 + f64::from(i % 5) - f64::from(i % 3);
//!     let date = start + Days::new(u64::from(i));
//!     Bar::new(date, close, close + 1.0, close - 1.0, close, 10_000)
//! }))
//! .unwrap();
//!
//! let mut registry = Registry::new();
//! registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Ma));
//! registry
//!     .configure(IndicatorKind::Rsi, &ParamMap::from([("period".to_owned(), 6)]))
//!     .unwrap();
//!
//! let evaluation = evaluate(&series, &registry);
//! let rsi = evaluation.get(IndicatorKind::Rsi).unwrap();
//! assert_eq!(rsi.len(), 40);
//! assert!(rsi.defined().all(|(_, v)| (0.0..=100.0).contains(&v)));
//! ```

mod bar;
mod ema;
mod error;
mod evaluator;
mod indicator;
mod instance;
mod kdj;
mod kind;
mod ma;
mod macd;
mod ohlcv;
mod output;
mod params;
mod price_window;
mod registry;
mod rsi;
mod schema;
mod series;
mod zone;

pub use crate::bar::Bar;
pub use crate::error::{IndicatorError, ParamProblem, SeriesError};
pub use crate::evaluator::{Evaluation, evaluate, evaluate_one};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::instance::{Color, IndicatorInstance};
pub use crate::kind::IndicatorKind;
pub use crate::ohlcv::{Ohlcv, Price};
pub use crate::output::IndicatorOutput;
pub use crate::params::{IndicatorParams, ParamMap, validate};
pub use crate::registry::{Registry, Upsert};
pub use crate::schema::{KindSchema, MAX_PARAM, MIN_PARAM, ParamSpec, Preset};
pub use crate::series::PriceSeries;
pub use crate::zone::{Zone, Zones};

pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder};
pub use crate::kdj::{Kdj, KdjConfig, KdjConfigBuilder, KdjValue};
pub use crate::ma::{Ma, MaConfig, MaConfigBuilder};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdValue};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder};

macro_rules! impl_indicator_methods {
    ($type:ty, $config:ty, $output:ty) => {
        impl $type {
            /// See [`Indicator::new`].
            #[must_use]
            pub fn new(config: $config) -> Self {
                <Self as Indicator>::new(config)
            }

            /// See [`Indicator::compute`].
            #[inline]
            pub fn compute(&mut self, bar: &impl Ohlcv) -> Option<$output> {
                <Self as Indicator>::compute(self, bar)
            }

            /// See [`Indicator::value`].
            #[must_use]
            #[inline]
            pub fn value(&self) -> Option<$output> {
                <Self as Indicator>::value(self)
            }

            /// See [`Indicator::batch`].
            #[must_use]
            pub fn batch(config: $config, bars: &[impl Ohlcv]) -> Vec<Option<$output>> {
                <Self as Indicator>::batch(config, bars)
            }
        }
    };
}

impl_indicator_methods!(Ma, MaConfig, Price);
impl_indicator_methods!(Ema, EmaConfig, Price);
impl_indicator_methods!(Macd, MacdConfig, MacdValue);
impl_indicator_methods!(Rsi, RsiConfig, Price);
impl_indicator_methods!(Kdj, KdjConfig, KdjValue);

#[cfg(test)]
mod test_util;
