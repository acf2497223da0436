use crate::facts::health_ministry::LabelledValue;
use crate::facts::ministry::HospitalStats;
use crate::facts::{Location, MetadataRegistry, RawStats, normalize};
use serde::Serialize;
use std::collections::BTreeMap;

/// Coordinates as published in the JSON views.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct ApiLocation {
    pub lat: f64,
    pub long: f64,
}

impl From<Location> for ApiLocation {
    fn from(location: Location) -> Self {
        Self {
            lat: location.latitude,
            long: location.longitude,
        }
    }
}

/// One Austrian province.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BundeslandStat {
    pub name: String,
    pub location: ApiLocation,
    pub population: u64,
    pub infected: u64,
    pub dead: u64,
    pub hospitalized: u64,
    pub intensive_care: u64,
}

/// One Austrian district.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct BezirkStat {
    pub name: String,
    pub location: ApiLocation,
    pub population: u64,
    pub infected: u64,
}

/// National totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct OverallStat {
    pub total_infected: u64,
    pub total_dead: u64,
    pub total_hospitalized: u64,
    pub total_intensive_care: u64,
    pub age_distribution_infection: BTreeMap<String, u64>,
}

/// Join province cases and deaths with hospital occupancy and province metadata.
///
/// Provinces missing from the hospital table get zero occupancy; unknown provinces get zero
/// population and the origin as location.
#[must_use]
pub fn bundesland_stats(provinces: &RawStats, hospitals: &HospitalStats, metadata: &MetadataRegistry) -> Vec<BundeslandStat> {
    provinces
        .iter()
        .map(|stat| {
            let key = normalize(&stat.location_key);
            let occupancy = hospitals.provinces.iter().find(|h| normalize(&h.location_key) == key);

            BundeslandStat {
                name: stat.location_key.clone(),
                location: metadata.location(&stat.location_key).map(ApiLocation::from).unwrap_or_default(),
                population: metadata.population(&stat.location_key),
                infected: stat.infected,
                dead: stat.deaths,
                hospitalized: occupancy.map_or(0, |h| h.hospitalized),
                intensive_care: occupancy.map_or(0, |h| h.intensive_care),
            }
        })
        .collect()
}

#[must_use]
pub fn bezirk_stats(districts: &[LabelledValue], metadata: &MetadataRegistry) -> Vec<BezirkStat> {
    districts
        .iter()
        .map(|value| {
            let name = value.label.trim();
            BezirkStat {
                name: name.to_string(),
                location: metadata.location(name).map(ApiLocation::from).unwrap_or_default(),
                population: metadata.population(name),
                infected: value.y,
            }
        })
        .collect()
}

/// Sum the province figures; `confirmed`, when known, replaces the summed infections.
#[must_use]
pub fn overall_stat(provinces: &[BundeslandStat], ages: &[LabelledValue], confirmed: Option<u64>) -> OverallStat {
    let sum = |field: fn(&BundeslandStat) -> u64| provinces.iter().map(field).sum::<u64>();

    OverallStat {
        total_infected: confirmed.unwrap_or_else(|| sum(|p| p.infected)),
        total_dead: sum(|p| p.dead),
        total_hospitalized: sum(|p| p.hospitalized),
        total_intensive_care: sum(|p| p.intensive_care),
        age_distribution_infection: ages.iter().map(|age| (age.label.clone(), age.y)).collect(),
    }
}
