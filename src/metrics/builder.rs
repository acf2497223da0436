//! Turning raw per-location facts into metrics.
//!
//! A [`MetricFamily`] names the metrics derived from one kind of entity (province, district,
//! country) and decides which derived figures exist for it. Building joins every [`RawStat`]
//! with place metadata: coordinates become tags, population feeds the per-capita rates.

use super::{Metric, Tags};
use crate::facts::numeric::{fatality_rate, format_coordinate, infected_per_100k, infection_rate};
use crate::facts::{MetadataLookup, RawStat};

/// Country tag value for every Austrian entity.
pub const AUSTRIA: &str = "Austria";

/// The metric names produced for one kind of entity.
///
/// A `None` name means the family has no such metric.
#[derive(Debug, Clone, Copy)]
pub struct MetricFamily {
    pub infected: Option<&'static str>,
    pub infection_rate: Option<&'static str>,
    pub infected_per_100k: Option<&'static str>,
    pub dead: Option<&'static str>,
    pub fatality_rate: Option<&'static str>,
    pub hospitalized: Option<&'static str>,
    pub intensive_care: Option<&'static str>,

    /// Fixed `country` tag for sub-national entities.
    pub country: Option<&'static str>,

    /// Tag key carrying the entity's own name.
    pub entity_key: &'static str,
}

impl MetricFamily {
    const EMPTY: Self = Self {
        infected: None,
        infection_rate: None,
        infected_per_100k: None,
        dead: None,
        fatality_rate: None,
        hospitalized: None,
        intensive_care: None,
        country: None,
        entity_key: "",
    };

    /// Austrian provinces as reported by the ministry page and the health ministry.
    pub const PROVINCES: Self = Self {
        infected: Some("cov19_detail"),
        infection_rate: Some("cov19_detail_infection_rate"),
        infected_per_100k: Some("cov19_detail_infected_per_100k"),
        dead: Some("cov19_detail_dead"),
        fatality_rate: Some("cov19_detail_fatality_rate"),
        country: Some(AUSTRIA),
        entity_key: "province",
        ..Self::EMPTY
    };

    /// Hospital occupancy per Austrian province.
    pub const HOSPITALS: Self = Self {
        hospitalized: Some("cov19_hospitalized_detail"),
        intensive_care: Some("cov19_intensive_care_detail"),
        country: Some(AUSTRIA),
        entity_key: "province",
        ..Self::EMPTY
    };

    /// Austrian districts.
    pub const DISTRICTS: Self = Self {
        infected: Some("cov19_bezirk_infected"),
        infected_per_100k: Some("cov19_bezirk_infected_per_100k"),
        country: Some(AUSTRIA),
        entity_key: "bezirk",
        ..Self::EMPTY
    };

    /// Countries of the world. Callers add the `continent` tag.
    pub const WORLD: Self = Self {
        infected: Some("cov19_world_infected"),
        infection_rate: Some("cov19_world_infection_rate"),
        infected_per_100k: Some("cov19_world_infected_per_100k"),
        dead: Some("cov19_world_death"),
        fatality_rate: Some("cov19_world_fatality_rate"),
        entity_key: "country",
        ..Self::EMPTY
    };

    /// The identifying tags of an entity before any metadata is joined in.
    #[must_use]
    pub fn base_tags(&self, location_key: &str) -> Tags {
        let tags = Tags::new().with(self.entity_key, location_key);
        match self.country {
            Some(country) => tags.with("country", country),
            None => tags,
        }
    }

    /// Build the metrics of every stat, tagged with [`base_tags`](Self::base_tags).
    pub fn build<'a, L>(&self, stats: impl IntoIterator<Item = &'a RawStat>, lookup: &L) -> Vec<Metric>
    where
        L: MetadataLookup + ?Sized,
    {
        stats
            .into_iter()
            .flat_map(|stat| self.build_entity(stat, self.base_tags(&stat.location_key), lookup))
            .collect()
    }

    /// Build the metrics of one stat on top of caller-supplied identifying tags.
    ///
    /// Coordinates are added when `lookup` knows the location, so every metric of the entity
    /// carries the same tag keys.
    pub fn build_entity<L>(&self, stat: &RawStat, base: Tags, lookup: &L) -> Vec<Metric>
    where
        L: MetadataLookup + ?Sized,
    {
        let record = lookup.lookup(&stat.location_key);
        let population = record.map_or(0, |record| record.population);

        let mut tags = base;
        if let Some(record) = record {
            tags.insert("latitude", format_coordinate(record.location.latitude));
            tags.insert("longitude", format_coordinate(record.location.longitude));
        }

        let mut metrics = Vec::new();
        let mut emit = |name: Option<&'static str>, value: f64| {
            if let Some(name) = name {
                metrics.push(Metric::tagged(name, tags.clone(), value));
            }
        };

        emit(self.infected, count(stat.infected));

        if population > 0 {
            emit(self.infection_rate, infection_rate(stat.infected, population));
            emit(self.infected_per_100k, infected_per_100k(stat.infected, population));
        }

        if stat.deaths > 0 {
            emit(self.dead, count(stat.deaths));
            if population > 0 && stat.infected > 0 {
                emit(self.fatality_rate, fatality_rate(stat.infected, stat.deaths));
            }
        }

        emit(self.hospitalized, count(stat.hospitalized));
        emit(self.intensive_care, count(stat.intensive_care));

        metrics
    }
}

/// One metric per category of a distribution, tagged `{country, <category_key>}`.
pub fn distribution<S: Into<String>>(name: &str, category_key: &str, entries: impl IntoIterator<Item = (S, u64)>) -> Vec<Metric> {
    entries
        .into_iter()
        .map(|(label, value)| {
            let tags = Tags::new().with("country", AUSTRIA).with(category_key, label);
            Metric::tagged(name, tags, count(value))
        })
        .collect()
}

#[expect(clippy::cast_precision_loss, reason = "case counts are far below 2^52")]
const fn count(value: u64) -> f64 {
    value as f64
}
