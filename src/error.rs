use chrono::NaiveDate;
use thiserror::Error;

use crate::IndicatorKind;

/// Errors raised while configuring indicators.
///
/// Evaluation itself never fails: short history is reported as undefined
/// samples, not as an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    /// A parameter is missing, out of range, or not declared for the kind.
    #[error("invalid {kind} parameter `{field}`: {problem}")]
    InvalidParameter {
        kind: IndicatorKind,
        field: String,
        problem: ParamProblem,
    },

    /// The indicator code does not name a known kind.
    #[error("unknown indicator kind `{0}`")]
    UnknownKind(String),

    /// A colour string is not of the form `#rrggbb`.
    #[error("invalid color `{0}`, expected #rrggbb")]
    InvalidColor(String),
}

impl IndicatorError {
    pub(crate) fn invalid(kind: IndicatorKind, field: &str, problem: ParamProblem) -> Self {
        Self::InvalidParameter {
            kind,
            field: field.to_owned(),
            problem,
        }
    }
}

/// What is wrong with a single indicator parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ParamProblem {
    #[error("value is missing")]
    Missing,

    #[error("{value} is outside {min}..={max}")]
    OutOfRange { value: i64, min: usize, max: usize },

    #[error("not a parameter of this indicator")]
    Undeclared,
}

/// Errors raised while assembling a [`PriceSeries`](crate::PriceSeries).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    /// Dates must be strictly increasing.
    #[error("bar {index} dated {date} does not follow {previous}")]
    OutOfOrder {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    /// Prices must be finite and positive.
    #[error("bar {index} dated {date} has invalid {field}: {value}")]
    InvalidPrice {
        index: usize,
        date: NaiveDate,
        field: &'static str,
        value: f64,
    },

    /// Open and close must lie within `[low, high]`.
    #[error("bar {index} dated {date} has {field} outside its high/low range")]
    OutsideRange {
        index: usize,
        date: NaiveDate,
        field: &'static str,
    },
}
