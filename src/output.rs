use serde::{Deserialize, Serialize};

use crate::Price;

/// One overlay line, aligned index-for-index with its price series.
///
/// Samples are `None` where the indicator is undefined (before its window
/// fills). Every defined sample is finite. Serializes as a plain JSON
/// array with `null` for undefined samples.
///
/// # Example
///
/// ```
/// use overlay_ta::IndicatorOutput;
///
/// let output: IndicatorOutput = [None, Some(10.5), Some(11.0)].into_iter().collect();
/// assert_eq!(output.len(), 3);
/// assert_eq!(output.defined_count(), 2);
/// assert_eq!(output.latest(), Some(11.0));
/// ```
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IndicatorOutput(Vec<Option<Price>>);

impl IndicatorOutput {
    /// An all-undefined line of `len` samples.
    #[must_use]
    pub fn undefined(len: usize) -> Self {
        Self(vec![None; len])
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sample at `index`; `None` when undefined or out of bounds.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Price> {
        self.0.get(index).copied().flatten()
    }

    /// All samples, oldest first.
    #[inline]
    #[must_use]
    pub fn values(&self) -> &[Option<Price>] {
        &self.0
    }

    /// Defined samples with their bar index.
    pub fn defined(&self) -> impl Iterator<Item = (usize, Price)> + '_ {
        self.0
            .iter()
            .enumerate()
            .filter_map(|(i, value)| value.map(|v| (i, v)))
    }

    #[must_use]
    pub fn defined_count(&self) -> usize {
        self.0.iter().filter(|value| value.is_some()).count()
    }

    /// The most recent sample, if defined.
    #[must_use]
    pub fn latest(&self) -> Option<Price> {
        self.0.last().copied().flatten()
    }

    #[must_use]
    pub fn into_inner(self) -> Vec<Option<Price>> {
        self.0
    }
}

impl FromIterator<Option<Price>> for IndicatorOutput {
    fn from_iter<I: IntoIterator<Item = Option<Price>>>(iter: I) -> Self {
        let values: Vec<_> = iter.into_iter().collect();
        debug_assert!(
            values.iter().flatten().all(|v| v.is_finite()),
            "indicator produced a non-finite sample"
        );
        Self(values)
    }
}
