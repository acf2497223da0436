use super::{Metric, ValidationError};

/// An ordered collection of metrics.
///
/// Insertion order is kept; lookups scan linearly and return the first hit.
#[derive(Debug, Clone, Default)]
pub struct Metrics {
    metrics: Vec<Metric>,
}

impl Metrics {
    #[must_use]
    pub const fn new() -> Self {
        Self { metrics: Vec::new() }
    }

    pub fn push(&mut self, metric: Metric) {
        self.metrics.push(metric);
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.metrics.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.metrics.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Metric> {
        self.metrics.iter()
    }

    /// The first metric called `name`; when `tag_match` is a `key=value` pair, the first one that
    /// also carries that pair.
    ///
    /// Callers that need a unique answer must make sure the collection holds one candidate.
    #[must_use]
    pub fn find_metric(&self, name: &str, tag_match: &str) -> Option<&Metric> {
        self.metrics.iter().find(|metric| metric.matches(name, tag_match))
    }

    /// Find a metric and check its value against `predicate`.
    ///
    /// A missing metric and a failing value are reported as different errors.
    pub fn check_metric(&self, name: &str, tag_match: &str, predicate: impl Fn(f64) -> bool) -> Result<(), ValidationError> {
        let Some(metric) = self.find_metric(name, tag_match) else {
            return Err(ValidationError::MissingMetric {
                name: name.to_string(),
                tag_match: tag_match.to_string(),
            });
        };

        if predicate(metric.value) {
            Ok(())
        } else {
            Err(ValidationError::CheckFailed {
                name: name.to_string(),
                tag_match: tag_match.to_string(),
                value: metric.value,
            })
        }
    }

    /// One error for every metric whose tag set does not have exactly `expected` keys.
    ///
    /// `field` names the tag used to identify the offending entity in the message.
    #[must_use]
    pub fn tag_completeness(&self, expected: usize, field: &str) -> Vec<ValidationError> {
        self.metrics
            .iter()
            .filter(|metric| metric.tag_count() != expected)
            .map(|metric| ValidationError::IncompleteTags {
                name: metric.name.clone(),
                entity: metric.tag(field).unwrap_or_default().to_string(),
                found: metric.tag_count(),
                expected,
            })
            .collect()
    }
}

impl Extend<Metric> for Metrics {
    fn extend<I: IntoIterator<Item = Metric>>(&mut self, iter: I) {
        self.metrics.extend(iter);
    }
}

impl FromIterator<Metric> for Metrics {
    fn from_iter<I: IntoIterator<Item = Metric>>(iter: I) -> Self {
        Self {
            metrics: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<Metric>> for Metrics {
    fn from(metrics: Vec<Metric>) -> Self {
        Self { metrics }
    }
}

impl IntoIterator for Metrics {
    type Item = Metric;
    type IntoIter = std::vec::IntoIter<Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.into_iter()
    }
}

impl<'a> IntoIterator for &'a Metrics {
    type Item = &'a Metric;
    type IntoIter = core::slice::Iter<'a, Metric>;

    fn into_iter(self) -> Self::IntoIter {
        self.metrics.iter()
    }
}
