//! Static description of each indicator kind's parameters, consumed by a
//! settings UI: field names, bounds, defaults and named presets.

use serde::Serialize;

use crate::{
    EmaConfig, IndicatorError, IndicatorKind, IndicatorParams, KdjConfig, MaConfig, MacdConfig,
    ParamMap, ParamProblem, Price, RsiConfig, Zone, Zones,
};

/// Smallest accepted value for any parameter.
pub const MIN_PARAM: usize = 1;

/// Largest accepted value for any parameter.
pub const MAX_PARAM: usize = 250;

/// One declared parameter of an indicator kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub default: usize,
    pub min: usize,
    pub max: usize,
}

impl ParamSpec {
    const fn new(name: &'static str, description: &'static str, default: usize) -> Self {
        Self {
            name,
            description,
            default,
            min: MIN_PARAM,
            max: MAX_PARAM,
        }
    }

    /// Checks `value` against this field's bounds.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] with
    /// [`ParamProblem::OutOfRange`] naming this field.
    pub fn check(&self, kind: IndicatorKind, value: i64) -> Result<usize, IndicatorError> {
        usize::try_from(value)
            .ok()
            .filter(|v| (self.min..=self.max).contains(v))
            .ok_or_else(|| {
                IndicatorError::invalid(
                    kind,
                    self.name,
                    ParamProblem::OutOfRange {
                        value,
                        min: self.min,
                        max: self.max,
                    },
                )
            })
    }
}

/// Checks a typed builder field against its declared bounds.
pub(crate) fn check_field(
    kind: IndicatorKind,
    name: &str,
    value: usize,
) -> Result<usize, IndicatorError> {
    let spec = kind
        .schema()
        .param(name)
        .ok_or_else(|| IndicatorError::invalid(kind, name, ParamProblem::Undeclared))?;

    spec.check(kind, i64::try_from(value).unwrap_or(i64::MAX))
}

/// A named parameter combination offered as a shortcut.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct Preset {
    pub label: &'static str,
    pub values: &'static [(&'static str, usize)],
}

impl Preset {
    /// Typed parameters for this preset.
    ///
    /// # Errors
    ///
    /// Never for the built-in presets; kept fallible because presets go
    /// through the same validation as user input.
    pub fn params(&self, kind: IndicatorKind) -> Result<IndicatorParams, IndicatorError> {
        let map: ParamMap = self
            .values
            .iter()
            .map(|&(name, value)| (name.to_owned(), i64::try_from(value).unwrap_or(i64::MAX)))
            .collect();

        crate::validate(kind, &map)
    }
}

/// Everything a settings dialog needs to know about one kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct KindSchema {
    pub kind: IndicatorKind,
    pub name: &'static str,
    pub description: &'static str,
    pub params: &'static [ParamSpec],
    pub presets: &'static [Preset],
    /// Overbought/oversold thresholds of the overlay line, for oscillators.
    pub zones: Option<Zones>,
}

impl KindSchema {
    /// Looks up a declared parameter by name.
    #[must_use]
    pub fn param(&self, name: &str) -> Option<&'static ParamSpec> {
        self.params.iter().find(|spec| spec.name == name)
    }

    /// The default parameters as an untyped map.
    #[must_use]
    pub fn defaults(&self) -> ParamMap {
        self.params
            .iter()
            .map(|spec| {
                (
                    spec.name.to_owned(),
                    i64::try_from(spec.default).unwrap_or(i64::MAX),
                )
            })
            .collect()
    }

    /// Zone of an overlay sample, or `None` for kinds without thresholds.
    #[must_use]
    pub fn zone(&self, value: Price) -> Option<Zone> {
        self.zones.map(|zones| zones.classify(value))
    }
}

const fn single(label: &'static str, values: &'static [(&'static str, usize)]) -> Preset {
    Preset { label, values }
}

static MA: KindSchema = KindSchema {
    kind: IndicatorKind::Ma,
    name: "Moving Average",
    description: "Simple moving average of close; tracks trend and support/resistance.",
    params: &[ParamSpec::new(
        "period",
        "Window length, commonly 5, 10, 20 or 60",
        MaConfig::DEFAULT_PERIOD,
    )],
    presets: &[
        single("5", &[("period", 5)]),
        single("10", &[("period", 10)]),
        single("20", &[("period", 20)]),
        single("60", &[("period", 60)]),
        single("120", &[("period", 120)]),
        single("250", &[("period", 250)]),
    ],
    zones: None,
};

static EMA: KindSchema = KindSchema {
    kind: IndicatorKind::Ema,
    name: "Exponential Moving Average",
    description: "Moving average weighted toward recent closes; reacts faster than MA.",
    params: &[ParamSpec::new(
        "period",
        "Smoothing length, commonly 12 or 26",
        EmaConfig::DEFAULT_PERIOD,
    )],
    presets: &[
        single("12", &[("period", 12)]),
        single("26", &[("period", 26)]),
        single("50", &[("period", 50)]),
        single("100", &[("period", 100)]),
        single("200", &[("period", 200)]),
    ],
    zones: None,
};

static MACD: KindSchema = KindSchema {
    kind: IndicatorKind::Macd,
    name: "MACD",
    description: "Spread between a fast and a slow EMA with a signal line.",
    params: &[
        ParamSpec::new("fast", "Fast EMA length, usually 12", MacdConfig::DEFAULT_FAST),
        ParamSpec::new("slow", "Slow EMA length, usually 26", MacdConfig::DEFAULT_SLOW),
        ParamSpec::new(
            "signal",
            "Signal EMA length, usually 9",
            MacdConfig::DEFAULT_SIGNAL,
        ),
    ],
    presets: &[
        single("standard", &[("fast", 12), ("slow", 26), ("signal", 9)]),
        single("fast", &[("fast", 10), ("slow", 20), ("signal", 5)]),
        single("adaptive", &[("fast", 5), ("slow", 35), ("signal", 5)]),
    ],
    zones: None,
};

static RSI: KindSchema = KindSchema {
    kind: IndicatorKind::Rsi,
    name: "Relative Strength Index",
    description: "Momentum oscillator on a 0-100 scale; above 70 overbought, below 30 oversold.",
    params: &[ParamSpec::new(
        "period",
        "Averaging length, commonly 6, 14 or 24",
        RsiConfig::DEFAULT_PERIOD,
    )],
    presets: &[
        single("6", &[("period", 6)]),
        single("14", &[("period", 14)]),
        single("24", &[("period", 24)]),
    ],
    zones: Some(Zones::RSI),
};

static KDJ: KindSchema = KindSchema {
    kind: IndicatorKind::Kdj,
    name: "Stochastic KDJ",
    description: "Position of close within the recent high/low range, smoothed into K, D and J.",
    params: &[
        ParamSpec::new(
            "period",
            "Observation window, usually 9",
            KdjConfig::DEFAULT_PERIOD,
        ),
        ParamSpec::new("k", "K smoothing factor, usually 3", KdjConfig::DEFAULT_K),
        ParamSpec::new("d", "D smoothing factor, usually 3", KdjConfig::DEFAULT_D),
    ],
    presets: &[
        single("standard", &[("period", 9), ("k", 3), ("d", 3)]),
        single("long", &[("period", 14), ("k", 3), ("d", 3)]),
        single("short", &[("period", 5), ("k", 3), ("d", 3)]),
    ],
    zones: Some(Zones::KDJ),
};

impl IndicatorKind {
    /// Parameter schema for this kind.
    #[must_use]
    pub fn schema(self) -> &'static KindSchema {
        match self {
            Self::Ma => &MA,
            Self::Ema => &EMA,
            Self::Macd => &MACD,
            Self::Rsi => &RSI,
            Self::Kdj => &KDJ,
        }
    }
}
