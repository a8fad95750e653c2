use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::IndicatorError;

/// The closed set of indicator kinds that can be overlaid on a chart.
///
/// The kind is the identity of an overlay: a [`Registry`](crate::Registry)
/// holds at most one active instance per kind.
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum IndicatorKind {
    /// Simple moving average of close.
    #[serde(rename = "MA")]
    Ma,
    /// Exponential moving average of close.
    #[serde(rename = "EMA")]
    Ema,
    /// Moving average convergence/divergence.
    #[serde(rename = "MACD")]
    Macd,
    /// Relative strength index.
    #[serde(rename = "RSI")]
    Rsi,
    /// Stochastic K/D/J oscillator.
    #[serde(rename = "KDJ")]
    Kdj,
}

impl IndicatorKind {
    /// Every kind, in menu order.
    pub const ALL: [IndicatorKind; 5] = [Self::Ma, Self::Ema, Self::Macd, Self::Rsi, Self::Kdj];

    /// Short uppercase code used on the wire and in chart legends.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::Ma => "MA",
            Self::Ema => "EMA",
            Self::Macd => "MACD",
            Self::Rsi => "RSI",
            Self::Kdj => "KDJ",
        }
    }
}

impl Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.code().eq_ignore_ascii_case(s))
            .ok_or_else(|| IndicatorError::UnknownKind(s.to_owned()))
    }
}
