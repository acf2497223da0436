use super::Tags;

/// One named, optionally tagged measurement.
///
/// Deliberately not `PartialEq`: metrics are identified by name plus a tag subset, see
/// [`Metric::matches`].
#[derive(Debug, Clone)]
pub struct Metric {
    pub name: String,
    pub tags: Option<Tags>,
    pub value: f64,
}

impl Metric {
    /// An untagged metric.
    #[must_use]
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            tags: None,
            value,
        }
    }

    #[must_use]
    pub fn tagged(name: impl Into<String>, tags: Tags, value: f64) -> Self {
        Self {
            name: name.into(),
            tags: Some(tags),
            value,
        }
    }

    /// The value of tag `key`, if the metric carries it.
    #[must_use]
    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.as_ref().and_then(|tags| tags.get(key))
    }

    /// Number of tag keys; an untagged metric has none.
    #[must_use]
    pub fn tag_count(&self) -> usize {
        self.tags.as_ref().map_or(0, Tags::len)
    }

    /// Whether this metric is called `name` and, unless `tag_match` is empty, carries the
    /// `key=value` pair it names.
    #[must_use]
    pub fn matches(&self, name: &str, tag_match: &str) -> bool {
        if self.name != name {
            return false;
        }

        tag_match.is_empty() || self.tags.as_ref().is_some_and(|tags| tags.contains_pair(tag_match))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matches_name_only() {
        let metric = Metric::new("cov19_tests", 5026.0);
        assert!(metric.matches("cov19_tests", ""));
        assert!(!metric.matches("cov19_confirmed", ""));
    }

    #[test]
    fn test_untagged_never_matches_a_pair() {
        let metric = Metric::new("cov19_tests", 5026.0);
        assert!(!metric.matches("cov19_tests", "country=Austria"));
    }

    #[test]
    fn test_matches_tag_pair() {
        let metric = Metric::tagged("cov19_detail", Tags::new().with("province", "Wien"), 500.0);
        assert!(metric.matches("cov19_detail", "province=Wien"));
        assert!(!metric.matches("cov19_detail", "province=Tirol"));
        assert_eq!(metric.tag("province"), Some("Wien"));
        assert_eq!(metric.tag_count(), 1);
    }
}
