use serde::Serialize;
use std::collections::BTreeMap;

/// The key/value annotations of one metric. Keys are unique.
///
/// Keys iterate in sorted order so rendering is stable, but nothing should depend on where a key
/// lands in that order; query by key instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tags(BTreeMap<String, String>);

impl Tags {
    #[must_use]
    pub const fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or replace the value for `key`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let _ = self.0.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Whether the set holds the exact pair described by `tag_match`, written as `key=value`.
    ///
    /// A `tag_match` without `=` never matches.
    #[must_use]
    pub fn contains_pair(&self, tag_match: &str) -> bool {
        tag_match
            .split_once('=')
            .is_some_and(|(key, value)| self.get(key) == Some(value))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Tags {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        let tags = Tags::new().with("country", "Austria").with("country", "Germany");
        assert_eq!(tags.len(), 1);
        assert_eq!(tags.get("country"), Some("Germany"));
    }

    #[test]
    fn test_contains_pair() {
        let tags: Tags = [("country", "Austria"), ("province", "Wien")].into_iter().collect();

        assert!(tags.contains_pair("province=Wien"));
        assert!(tags.contains_pair("country=Austria"));
        assert!(!tags.contains_pair("province=Tirol"));
        assert!(!tags.contains_pair("bezirk=Wien"));
        assert!(!tags.contains_pair("province"));
        assert!(!tags.contains_pair(""));
    }

    #[test]
    fn test_contains_pair_value_with_equals_sign() {
        let tags = Tags::new().with("group", "a=b");
        assert!(tags.contains_pair("group=a=b"));
    }
}
