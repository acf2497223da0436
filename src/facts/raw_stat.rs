use serde::Serialize;

/// An unvalidated, source-native fact about one location.
///
/// Fields a source cannot provide stay zero. The key keeps the source's own spelling; joining it
/// with metadata goes through [`normalize`](super::normalize).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RawStat {
    pub location_key: String,
    pub infected: u64,
    pub deaths: u64,
    pub hospitalized: u64,
    pub intensive_care: u64,
}

impl RawStat {
    #[must_use]
    pub fn new(location_key: impl Into<String>) -> Self {
        Self {
            location_key: location_key.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn infected(location_key: impl Into<String>, infected: u64) -> Self {
        Self {
            infected,
            ..Self::new(location_key)
        }
    }
}

/// Insertion-ordered set of [`RawStat`] keyed by location.
///
/// Later extraction passes patch entries found by earlier ones, or append a fresh entry when the
/// location was not seen yet. Order of first appearance is preserved.
#[derive(Debug, Clone, Default)]
pub struct RawStats {
    stats: Vec<RawStat>,
}

impl RawStats {
    #[must_use]
    pub const fn new() -> Self {
        Self { stats: Vec::new() }
    }

    /// The entry for `location_key`, inserted with all counts at zero if missing.
    pub fn entry(&mut self, location_key: &str) -> &mut RawStat {
        let index = match self.stats.iter().position(|s| s.location_key == location_key) {
            Some(index) => index,
            None => {
                self.stats.push(RawStat::new(location_key));
                self.stats.len() - 1
            }
        };

        &mut self.stats[index]
    }

    #[must_use]
    pub fn get(&self, location_key: &str) -> Option<&RawStat> {
        self.stats.iter().find(|s| s.location_key == location_key)
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.stats.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RawStat> {
        self.stats.iter()
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<RawStat> {
        self.stats
    }
}

impl IntoIterator for RawStats {
    type Item = RawStat;
    type IntoIter = std::vec::IntoIter<RawStat>;

    fn into_iter(self) -> Self::IntoIter {
        self.stats.into_iter()
    }
}
