use std::fmt::Display;

use serde::Serialize;

use crate::Price;

/// Reading of a bounded oscillator against its thresholds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Zone {
    Overbought,
    Oversold,
    Neutral,
}

impl Display for Zone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Overbought => "overbought",
            Self::Oversold => "oversold",
            Self::Neutral => "neutral",
        })
    }
}

/// Overbought and oversold thresholds on a 0–100 scale.
///
/// Both comparisons are strict: a value sitting exactly on a threshold is
/// [`Zone::Neutral`].
///
/// # Example
///
/// ```
/// use overlay_ta::{Zone, Zones};
///
/// assert_eq!(Zones::RSI.classify(70.0), Zone::Neutral);
/// assert_eq!(Zones::RSI.classify(70.5), Zone::Overbought);
/// assert_eq!(Zones::KDJ.classify(19.9), Zone::Oversold);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Zones {
    pub overbought: u8,
    pub oversold: u8,
}

impl Zones {
    pub const RSI: Self = Self {
        overbought: 70,
        oversold: 30,
    };

    pub const KDJ: Self = Self {
        overbought: 80,
        oversold: 20,
    };

    /// Classifies `value`. NaN reads as neutral.
    #[must_use]
    pub fn classify(self, value: Price) -> Zone {
        if value > f64::from(self.overbought) {
            Zone::Overbought
        } else if value < f64::from(self.oversold) {
            Zone::Oversold
        } else {
            Zone::Neutral
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod rsi {
        use super::*;

        #[test]
        fn thresholds_are_neutral() {
            assert_eq!(Zones::RSI.classify(70.0), Zone::Neutral);
            assert_eq!(Zones::RSI.classify(30.0), Zone::Neutral);
        }

        #[test]
        fn just_past_thresholds() {
            assert_eq!(Zones::RSI.classify(70.000_001), Zone::Overbought);
            assert_eq!(Zones::RSI.classify(29.999_999), Zone::Oversold);
        }

        #[test]
        fn scale_ends() {
            assert_eq!(Zones::RSI.classify(100.0), Zone::Overbought);
            assert_eq!(Zones::RSI.classify(0.0), Zone::Oversold);
            assert_eq!(Zones::RSI.classify(50.0), Zone::Neutral);
        }
    }

    mod kdj {
        use super::*;

        #[test]
        fn thresholds_are_neutral() {
            assert_eq!(Zones::KDJ.classify(80.0), Zone::Neutral);
            assert_eq!(Zones::KDJ.classify(20.0), Zone::Neutral);
        }

        #[test]
        fn just_past_thresholds() {
            assert_eq!(Zones::KDJ.classify(80.01), Zone::Overbought);
            assert_eq!(Zones::KDJ.classify(19.99), Zone::Oversold);
        }

        #[test]
        fn rsi_band_is_neutral_for_kdj() {
            assert_eq!(Zones::KDJ.classify(75.0), Zone::Neutral);
            assert_eq!(Zones::KDJ.classify(25.0), Zone::Neutral);
        }
    }

    #[test]
    fn nan_is_neutral() {
        assert_eq!(Zones::RSI.classify(f64::NAN), Zone::Neutral);
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_value(Zone::Overbought).unwrap(), "overbought");
        assert_eq!(Zone::Oversold.to_string(), "oversold");
        assert_eq!(
            serde_json::to_value(Zones::KDJ).unwrap(),
            serde_json::json!({"overbought": 80, "oversold": 20})
        );
    }
}
