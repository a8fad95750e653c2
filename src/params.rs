use std::{collections::BTreeMap, fmt::Display};

use serde::{Deserialize, Serialize};

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorError, IndicatorKind, IndicatorOutput,
    Kdj, KdjConfig, Ma, MaConfig, Macd, MacdConfig, Ohlcv, ParamProblem, Rsi, RsiConfig,
};

/// Untyped parameters as posted by a settings form: field name to value.
pub type ParamMap = BTreeMap<String, i64>;

/// Validates untyped settings for `kind` into typed parameters.
///
/// Every declared field must be present and within its bounds; fields the
/// kind does not declare are rejected as well.
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] naming the offending field.
///
/// # Example
///
/// ```
/// use overlay_ta::{validate, IndicatorKind, ParamMap};
///
/// let map = ParamMap::from([("period".to_owned(), 20)]);
/// let params = validate(IndicatorKind::Ma, &map).unwrap();
/// assert_eq!(params.to_string(), "MA(20)");
///
/// let bad = ParamMap::from([("period".to_owned(), 0)]);
/// let err = validate(IndicatorKind::Rsi, &bad).unwrap_err();
/// assert_eq!(err.to_string(), "invalid RSI parameter `period`: 0 is outside 1..=250");
/// ```
pub fn validate(kind: IndicatorKind, params: &ParamMap) -> Result<IndicatorParams, IndicatorError> {
    let schema = kind.schema();

    if let Some(name) = params.keys().find(|name| schema.param(name).is_none()) {
        return Err(IndicatorError::invalid(kind, name, ParamProblem::Undeclared));
    }

    let field = |name: &str| -> Result<usize, IndicatorError> {
        let spec = schema
            .param(name)
            .ok_or_else(|| IndicatorError::invalid(kind, name, ParamProblem::Undeclared))?;
        let value = params
            .get(name)
            .ok_or_else(|| IndicatorError::invalid(kind, name, ParamProblem::Missing))?;
        spec.check(kind, *value)
    };

    Ok(match kind {
        IndicatorKind::Ma => MaConfig::with_period(field("period")?).into(),
        IndicatorKind::Ema => EmaConfig::with_period(field("period")?).into(),
        IndicatorKind::Rsi => RsiConfig::with_period(field("period")?).into(),
        IndicatorKind::Macd => {
            MacdConfig::with_periods(field("fast")?, field("slow")?, field("signal")?).into()
        }
        IndicatorKind::Kdj => {
            KdjConfig::with_periods(field("period")?, field("k")?, field("d")?).into()
        }
    })
}

/// Validated parameters for one indicator, tagged by kind.
///
/// Serializes in the dashboard's shape,
/// `{"type": "MACD", "params": {"fast": 12, "slow": 26, "signal": 9}}`,
/// and deserializing runs [`validate`].
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(try_from = "RawParams", into = "RawParams")]
pub enum IndicatorParams {
    Ma(MaConfig),
    Ema(EmaConfig),
    Macd(MacdConfig),
    Rsi(RsiConfig),
    Kdj(KdjConfig),
}

impl IndicatorParams {
    /// Default parameters for `kind`.
    #[must_use]
    pub fn default_for(kind: IndicatorKind) -> Self {
        match kind {
            IndicatorKind::Ma => MaConfig::default().into(),
            IndicatorKind::Ema => EmaConfig::default().into(),
            IndicatorKind::Macd => MacdConfig::default().into(),
            IndicatorKind::Rsi => RsiConfig::default().into(),
            IndicatorKind::Kdj => KdjConfig::default().into(),
        }
    }

    #[must_use]
    pub fn kind(&self) -> IndicatorKind {
        match self {
            Self::Ma(_) => MaConfig::KIND,
            Self::Ema(_) => EmaConfig::KIND,
            Self::Macd(_) => MacdConfig::KIND,
            Self::Rsi(_) => RsiConfig::KIND,
            Self::Kdj(_) => KdjConfig::KIND,
        }
    }

    /// Bars needed before the overlay has its first defined sample.
    #[must_use]
    pub fn min_len(&self) -> usize {
        match self {
            Self::Ma(c) => c.min_len(),
            Self::Ema(c) => c.min_len(),
            Self::Macd(c) => c.min_len(),
            Self::Rsi(c) => c.min_len(),
            Self::Kdj(c) => c.min_len(),
        }
    }

    /// Field values in schema order.
    #[must_use]
    pub fn fields(&self) -> Vec<(&'static str, usize)> {
        match self {
            Self::Ma(c) => vec![("period", c.period())],
            Self::Ema(c) => vec![("period", c.period())],
            Self::Rsi(c) => vec![("period", c.period())],
            Self::Macd(c) => vec![("fast", c.fast()), ("slow", c.slow()), ("signal", c.signal())],
            Self::Kdj(c) => vec![("period", c.period()), ("k", c.k()), ("d", c.d())],
        }
    }

    /// Untyped form of these parameters.
    #[must_use]
    pub fn to_map(&self) -> ParamMap {
        self.fields()
            .into_iter()
            .map(|(name, value)| (name.to_owned(), i64::try_from(value).unwrap_or(i64::MAX)))
            .collect()
    }

    /// Computes the overlay line for these parameters.
    ///
    /// Composite indicators are reduced to the one line a price chart
    /// overlays: MACD shows `dif`, KDJ shows `K`. MA, EMA and RSI show
    /// their only line. The output has one sample per bar.
    #[must_use]
    pub fn overlay(&self, bars: &[impl Ohlcv]) -> IndicatorOutput {
        match *self {
            Self::Ma(config) => Ma::batch(config, bars).into_iter().collect(),
            Self::Ema(config) => Ema::batch(config, bars).into_iter().collect(),
            Self::Rsi(config) => Rsi::batch(config, bars).into_iter().collect(),
            Self::Macd(config) => Macd::batch(config, bars)
                .into_iter()
                .map(|value| value.map(|v| v.dif()))
                .collect(),
            Self::Kdj(config) => Kdj::batch(config, bars)
                .into_iter()
                .map(|value| value.map(|v| v.k()))
                .collect(),
        }
    }
}

impl Display for IndicatorParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}(", self.kind())?;
        for (i, (_, value)) in self.fields().into_iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{value}")?;
        }
        f.write_str(")")
    }
}

macro_rules! impl_from_config {
    ($variant:ident, $config:ty) => {
        impl From<$config> for IndicatorParams {
            fn from(config: $config) -> Self {
                Self::$variant(config)
            }
        }
    };
}

impl_from_config!(Ma, MaConfig);
impl_from_config!(Ema, EmaConfig);
impl_from_config!(Macd, MacdConfig);
impl_from_config!(Rsi, RsiConfig);
impl_from_config!(Kdj, KdjConfig);

#[derive(Serialize, Deserialize)]
struct RawParams {
    #[serde(rename = "type")]
    kind: IndicatorKind,
    params: ParamMap,
}

impl TryFrom<RawParams> for IndicatorParams {
    type Error = IndicatorError;

    fn try_from(raw: RawParams) -> Result<Self, Self::Error> {
        validate(raw.kind, &raw.params)
    }
}

impl From<IndicatorParams> for RawParams {
    fn from(params: IndicatorParams) -> Self {
        Self {
            kind: params.kind(),
            params: params.to_map(),
        }
    }
}
