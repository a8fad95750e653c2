use serde::{Serialize, ser::SerializeMap};
use tracing::{debug, trace};

use crate::{IndicatorKind, IndicatorOutput, IndicatorParams, PriceSeries, Registry, Zone};

/// Overlay lines for every active indicator, in registry order.
///
/// Each line has exactly [`series_len`](Evaluation::series_len) samples.
/// Serializes as a JSON object keyed by indicator code.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Evaluation {
    series_len: usize,
    outputs: Vec<(IndicatorKind, IndicatorOutput)>,
}

impl Evaluation {
    /// The line computed for `kind`, if it is active.
    #[must_use]
    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorOutput> {
        self.outputs
            .iter()
            .find_map(|(k, output)| (*k == kind).then_some(output))
    }

    /// Zone of the last sample of `kind`'s line.
    ///
    /// `None` when the kind is inactive, has no thresholds, or its last
    /// sample is undefined.
    #[must_use]
    pub fn latest_zone(&self, kind: IndicatorKind) -> Option<Zone> {
        let value = self.get(kind)?.latest()?;
        kind.schema().zone(value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (IndicatorKind, &IndicatorOutput)> + '_ {
        self.outputs.iter().map(|(kind, output)| (*kind, output))
    }

    /// Number of lines.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.outputs.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outputs.is_empty()
    }

    /// Length of the series the lines were computed over.
    #[inline]
    #[must_use]
    pub fn series_len(&self) -> usize {
        self.series_len
    }
}

impl Serialize for Evaluation {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.outputs.len() + 1))?;
        map.serialize_entry("series_len", &self.series_len)?;
        for (kind, output) in &self.outputs {
            map.serialize_entry(kind.code(), output)?;
        }
        map.end()
    }
}

/// Computes one overlay line over `series`.
///
/// A series shorter than the indicator's minimum length yields an
/// all-undefined line of the same length rather than an error.
///
/// # Example
///
/// ```
/// use chrono::NaiveDate;
/// use overlay_ta::{evaluate_one, Bar, IndicatorKind, IndicatorParams, PriceSeries};
///
/// let day = |d| NaiveDate::from_ymd_opt(2024, 5, d).unwrap();
/// let series = PriceSeries::try_from_bars([
///     Bar::new(day(1), 10.0, 10.0, 10.0, 10.0, 100),
///     Bar::new(day(2), 11.0, 11.0, 11.0, 11.0, 100),
/// ])
/// .unwrap();
///
/// let rsi = IndicatorParams::default_for(IndicatorKind::Rsi);
/// let output = evaluate_one(&series, &rsi);
/// assert_eq!(output.len(), 2);
/// assert_eq!(output.defined_count(), 0);
/// ```
#[must_use]
pub fn evaluate_one(series: &PriceSeries, params: &IndicatorParams) -> IndicatorOutput {
    let min_len = params.min_len();
    if series.len() < min_len {
        trace!(%params, bars = series.len(), min_len, "series too short");
        return IndicatorOutput::undefined(series.len());
    }

    let output = params.overlay(series.bars());
    debug!(
        %params,
        bars = series.len(),
        defined = output.defined_count(),
        "indicator evaluated"
    );

    output
}

/// Computes every active overlay in `registry` over `series`.
///
/// Evaluation is pure: the same series and registry always give
/// identical lines.
///
/// # Example
///
/// ```
/// use chrono::{Days, NaiveDate};
/// use overlay_ta::{evaluate, Bar, IndicatorInstance, IndicatorKind, PriceSeries, Registry};
///
/// let start = NaiveDate::from_ymd_opt(2024, 5, 1).unwrap();
/// let series = PriceSeries::try_from_bars((0..30u32).map(|i| {
///     let close = 20.0 + f64::from(i % 7);
///     let date = start + Days::new(u64::from(i));
///     Bar::new(date, close, close + 0.5, close - 0.5, close, 1_000)
/// }))
/// .unwrap();
///
/// let registry: Registry = IndicatorKind::ALL
///     .into_iter()
///     .map(IndicatorInstance::with_defaults)
///     .collect();
///
/// let evaluation = evaluate(&series, &registry);
/// assert_eq!(evaluation.len(), 5);
/// assert!(evaluation.iter().all(|(_, line)| line.len() == 30));
/// assert_eq!(evaluation.get(IndicatorKind::Ma).unwrap().defined_count(), 26);
/// ```
#[must_use]
pub fn evaluate(series: &PriceSeries, registry: &Registry) -> Evaluation {
    debug!(
        bars = series.len(),
        indicators = registry.len(),
        revision = registry.revision(),
        "evaluating overlays"
    );

    Evaluation {
        series_len: series.len(),
        outputs: registry
            .iter()
            .map(|instance| (instance.kind(), evaluate_one(series, instance.params())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{IndicatorInstance, MaConfig, RsiConfig, test_util::closes};

    fn full_registry() -> Registry {
        IndicatorKind::ALL
            .into_iter()
            .map(IndicatorInstance::with_defaults)
            .collect()
    }

    mod gating {
        use super::*;

        #[test]
        fn short_series_is_all_undefined() {
            let series = closes(&[10.0, 11.0, 12.0, 13.0]);
            let output = evaluate_one(&series, &MaConfig::with_period(5).into());
            assert_eq!(output, IndicatorOutput::undefined(4));
        }

        #[test]
        fn series_at_min_len_has_one_sample() {
            let series = closes(&[10.0, 11.0, 12.0, 13.0, 14.0]);
            let output = evaluate_one(&series, &MaConfig::with_period(5).into());
            assert_eq!(output.defined_count(), 1);
            assert_eq!(output.latest(), Some(12.0));
        }

        #[test]
        fn empty_series_gives_empty_lines() {
            let evaluation = evaluate(&PriceSeries::new(), &full_registry());
            assert_eq!(evaluation.len(), 5);
            assert_eq!(evaluation.series_len(), 0);
            assert!(evaluation.iter().all(|(_, line)| line.is_empty()));
        }
    }

    mod alignment {
        use super::*;

        #[test]
        fn every_line_matches_series_length() {
            let series = closes(&[10.0, 11.0, 12.0, 11.0, 13.0, 12.0, 14.0, 15.0, 13.0, 16.0]);
            let evaluation = evaluate(&series, &full_registry());
            for (kind, line) in evaluation.iter() {
                assert_eq!(line.len(), series.len(), "{kind}");
            }
        }

        #[test]
        fn follows_registry_order() {
            let mut registry = Registry::new();
            registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Rsi));
            registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Ema));

            let evaluation = evaluate(&closes(&[1.0, 2.0]), &registry);
            let kinds: Vec<_> = evaluation.iter().map(|(kind, _)| kind).collect();
            assert_eq!(kinds, [IndicatorKind::Rsi, IndicatorKind::Ema]);
            assert!(evaluation.get(IndicatorKind::Macd).is_none());
        }
    }

    mod purity {
        use super::*;

        #[test]
        fn repeated_evaluation_is_bit_identical() {
            let series = closes(&[10.0, 10.4, 9.8, 11.2, 11.0, 12.5, 12.1, 11.7, 13.0, 12.2]);
            let mut registry = full_registry();
            registry.add_or_replace(IndicatorInstance::new(RsiConfig::with_period(3)));

            let first = evaluate(&series, &registry);
            let second = evaluate(&series, &registry);

            for ((_, a), (_, b)) in first.iter().zip(second.iter()) {
                let a: Vec<_> = a.values().iter().map(|v| v.map(f64::to_bits)).collect();
                let b: Vec<_> = b.values().iter().map(|v| v.map(f64::to_bits)).collect();
                assert_eq!(a, b);
            }
        }

        #[test]
        fn replacing_parameters_recomputes_line() {
            let series = closes(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
            let mut registry = Registry::new();
            registry.add_or_replace(IndicatorInstance::new(MaConfig::with_period(5)));
            let before = evaluate(&series, &registry);

            registry.add_or_replace(IndicatorInstance::new(MaConfig::with_period(2)));
            let after = evaluate(&series, &registry);

            assert_eq!(before.get(IndicatorKind::Ma).unwrap().defined_count(), 2);
            assert_eq!(after.get(IndicatorKind::Ma).unwrap().defined_count(), 5);
        }
    }

    mod zones {
        use super::*;

        #[test]
        fn rising_closes_read_overbought() {
            let series = closes(&[10.0, 11.0, 12.0, 13.0, 14.0, 15.0]);
            let mut registry = full_registry();
            registry.add_or_replace(IndicatorInstance::new(RsiConfig::with_period(3)));

            let evaluation = evaluate(&series, &registry);

            assert_eq!(evaluation.latest_zone(IndicatorKind::Rsi), Some(Zone::Overbought));
            assert_eq!(evaluation.latest_zone(IndicatorKind::Ma), None);
            assert_eq!(evaluation.latest_zone(IndicatorKind::Macd), None);
        }

        #[test]
        fn falling_closes_read_oversold() {
            let series = closes(&[15.0, 14.0, 13.0, 12.0, 11.0, 10.0]);
            let mut registry = Registry::new();
            registry.add_or_replace(IndicatorInstance::new(RsiConfig::with_period(3)));

            let evaluation = evaluate(&series, &registry);
            assert_eq!(evaluation.latest_zone(IndicatorKind::Rsi), Some(Zone::Oversold));
        }

        #[test]
        fn undefined_or_inactive_has_no_zone() {
            let series = closes(&[10.0, 11.0]);
            let mut registry = Registry::new();
            registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Rsi));

            let evaluation = evaluate(&series, &registry);
            assert_eq!(evaluation.latest_zone(IndicatorKind::Rsi), None);
            assert_eq!(evaluation.latest_zone(IndicatorKind::Kdj), None);
        }
    }

    mod wire {
        use super::*;

        #[test]
        fn serializes_keyed_by_code() {
            let mut registry = Registry::new();
            registry.add_or_replace(IndicatorInstance::new(MaConfig::with_period(2)));
            let evaluation = evaluate(&closes(&[10.0, 12.0]), &registry);

            assert_eq!(
                serde_json::to_value(&evaluation).unwrap(),
                serde_json::json!({"series_len": 2, "MA": [null, 11.0]})
            );
        }
    }
}
