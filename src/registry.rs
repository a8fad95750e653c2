use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{IndicatorError, IndicatorInstance, IndicatorKind, ParamMap};

/// Outcome of [`Registry::add_or_replace`].
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Upsert {
    /// No instance of the kind existed; the new one was appended.
    Inserted,
    /// The existing instance of the kind was replaced in place.
    Updated,
}

/// The overlays currently selected for one chart, at most one per kind,
/// in the order they were first added.
///
/// The registry is owned by a single session; it does no locking of its
/// own. Every effective mutation bumps [`revision`](Registry::revision), so
/// `(series, revision)` identifies an evaluation result for caching.
///
/// # Example
///
/// ```
/// use overlay_ta::{IndicatorInstance, IndicatorKind, ParamMap, Registry, Upsert};
///
/// let mut registry = Registry::new();
/// registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Ma));
/// registry.add_or_replace(IndicatorInstance::with_defaults(IndicatorKind::Rsi));
///
/// let ma60 = ParamMap::from([("period".to_owned(), 60)]);
/// assert_eq!(registry.configure(IndicatorKind::Ma, &ma60).unwrap(), Upsert::Updated);
///
/// let names: Vec<_> = registry.list().map(|i| i.name()).collect();
/// assert_eq!(names, ["MA(60)", "RSI(14)"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<IndicatorInstance>", into = "Vec<IndicatorInstance>")]
pub struct Registry {
    instances: Vec<IndicatorInstance>,
    revision: u64,
}

impl Registry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `instance`, or replaces the active instance of the same kind
    /// while keeping its position.
    pub fn add_or_replace(&mut self, instance: IndicatorInstance) -> Upsert {
        let kind = instance.kind();
        self.revision += 1;

        if let Some(slot) = self.instances.iter_mut().find(|i| i.kind() == kind) {
            debug!(%kind, params = %instance.params(), "indicator updated");
            *slot = instance;
            Upsert::Updated
        } else {
            debug!(%kind, params = %instance.params(), "indicator added");
            self.instances.push(instance);
            Upsert::Inserted
        }
    }

    /// Applies settings posted for `kind`. An existing overlay keeps its
    /// colour; its name follows the new parameters.
    ///
    /// # Errors
    ///
    /// Invalid settings leave the registry untouched.
    pub fn configure(
        &mut self,
        kind: IndicatorKind,
        params: &ParamMap,
    ) -> Result<Upsert, IndicatorError> {
        let mut instance = IndicatorInstance::from_settings(kind, params)?;
        if let Some(existing) = self.get(kind) {
            instance = instance.with_color(existing.color());
        }

        Ok(self.add_or_replace(instance))
    }

    /// Removes the active instance of `kind`. Absent kinds are a no-op.
    pub fn remove(&mut self, kind: IndicatorKind) -> Option<IndicatorInstance> {
        let position = self.instances.iter().position(|i| i.kind() == kind)?;

        self.revision += 1;
        debug!(%kind, "indicator removed");

        Some(self.instances.remove(position))
    }

    /// Removes every instance.
    pub fn clear(&mut self) {
        if !self.instances.is_empty() {
            self.revision += 1;
            debug!(count = self.instances.len(), "indicators cleared");
            self.instances.clear();
        }
    }

    #[must_use]
    pub fn get(&self, kind: IndicatorKind) -> Option<&IndicatorInstance> {
        self.instances.iter().find(|i| i.kind() == kind)
    }

    #[must_use]
    pub fn contains(&self, kind: IndicatorKind) -> bool {
        self.get(kind).is_some()
    }

    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.instances.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Active instances in insertion order.
    #[inline]
    pub fn iter(&self) -> std::slice::Iter<'_, IndicatorInstance> {
        self.instances.iter()
    }

    /// Same as [`iter`](Registry::iter); each call starts a fresh pass.
    #[inline]
    pub fn list(&self) -> std::slice::Iter<'_, IndicatorInstance> {
        self.iter()
    }

    /// Number of effective mutations so far.
    #[inline]
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }
}

impl<'a> IntoIterator for &'a Registry {
    type Item = &'a IndicatorInstance;
    type IntoIter = std::slice::Iter<'a, IndicatorInstance>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromIterator<IndicatorInstance> for Registry {
    fn from_iter<I: IntoIterator<Item = IndicatorInstance>>(iter: I) -> Self {
        let mut registry = Self::new();
        for instance in iter {
            registry.add_or_replace(instance);
        }
        registry
    }
}

impl From<Vec<IndicatorInstance>> for Registry {
    fn from(instances: Vec<IndicatorInstance>) -> Self {
        instances.into_iter().collect()
    }
}

impl From<Registry> for Vec<IndicatorInstance> {
    fn from(registry: Registry) -> Self {
        registry.instances
    }
}
