//! Reference data about places: population and coordinates.
//!
//! A registry is loaded once from a headerless CSV file with rows of
//! `name,population,latitude,longitude` and is read-only afterwards. Lookups go through
//! [`normalize`], so any spelling that normalizes to the same key finds the record.

use super::normalize::normalize;
use super::numeric::{parse_count, parse_float};
use crate::Result;
use camino::Utf8Path;
use ohno::IntoAppError;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;

const LOG_TARGET: &str = "  metadata";

/// Geographic position of a place.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
}

/// Everything the registry knows about one place.
#[derive(Debug, Clone, PartialEq)]
pub struct MetadataRecord {
    pub canonical_name: String,

    /// Number of inhabitants, 0 when unknown.
    pub population: u64,

    pub location: Location,
}

/// Read access to place metadata by free-text name.
pub trait MetadataLookup {
    /// The record for `name`, if the place is known.
    fn lookup(&self, name: &str) -> Option<&MetadataRecord>;
}

#[derive(Debug, Clone, Default)]
pub struct MetadataRegistry {
    records: HashMap<String, MetadataRecord>,
}

impl MetadataRegistry {
    /// Build a registry from already parsed records. Later records win on key collisions.
    #[must_use]
    pub fn from_records(records: impl IntoIterator<Item = MetadataRecord>) -> Self {
        let mut map = HashMap::new();
        for record in records {
            let _ = map.insert(normalize(&record.canonical_name), record);
        }

        Self { records: map }
    }

    /// Parse CSV rows of `name,population,latitude,longitude` without a header line.
    ///
    /// Unparsable numbers degrade to zero; rows with a different field count fail the whole load.
    pub fn from_reader(reader: impl Read) -> core::result::Result<Self, csv::Error> {
        let mut csv_reader = csv::ReaderBuilder::new().has_headers(false).trim(csv::Trim::All).from_reader(reader);

        let mut records = Vec::new();
        for row in csv_reader.records() {
            let row = row?;
            let field = |index| row.get(index).unwrap_or_default();

            records.push(MetadataRecord {
                canonical_name: field(0).to_string(),
                population: parse_count(field(1)),
                location: Location {
                    latitude: parse_float(field(2)),
                    longitude: parse_float(field(3)),
                },
            });
        }

        Ok(Self::from_records(records))
    }

    /// Load a registry from a CSV file.
    pub fn load(path: &Utf8Path) -> Result<Self> {
        let file = File::open(path).into_app_err_with(|| format!("opening metadata file '{path}'"))?;
        let registry = Self::from_reader(file).into_app_err_with(|| format!("parsing metadata file '{path}'"))?;

        log::debug!(target: LOG_TARGET, "Loaded {} places from '{path}'", registry.len());
        Ok(registry)
    }

    #[must_use]
    pub fn location(&self, name: &str) -> Option<Location> {
        self.lookup(name).map(|record| record.location)
    }

    /// Population of `name`, 0 when the place is unknown.
    #[must_use]
    pub fn population(&self, name: &str) -> u64 {
        self.lookup(name).map_or(0, |record| record.population)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl MetadataLookup for MetadataRegistry {
    fn lookup(&self, name: &str) -> Option<&MetadataRecord> {
        self.records.get(&normalize(name))
    }
}
