//! JSON views over the extracted facts.
//!
//! These are the per-province, per-district and national payloads, built directly from the
//! ministry and health ministry providers rather than from the metric collection, so they carry
//! plain counts instead of tagged figures.

mod stats;

use crate::facts::{ExtractError, MetadataRegistry, health_ministry, ministry};
use std::sync::Arc;

pub use stats::{ApiLocation, BezirkStat, BundeslandStat, OverallStat, bezirk_stats, bundesland_stats, overall_stat};

const LOG_TARGET: &str = "       api";

#[derive(Debug, Clone)]
pub struct Api {
    ministry: Arc<ministry::Provider>,
    health_ministry: Arc<health_ministry::Provider>,
    provinces: Arc<MetadataRegistry>,
}

impl Api {
    #[must_use]
    pub const fn new(
        ministry: Arc<ministry::Provider>,
        health_ministry: Arc<health_ministry::Provider>,
        provinces: Arc<MetadataRegistry>,
    ) -> Self {
        Self {
            ministry,
            health_ministry,
            provinces,
        }
    }

    /// Cases, deaths and hospital occupancy per province.
    pub async fn bundesland(&self) -> Result<Vec<BundeslandStat>, ExtractError> {
        let (provinces, hospitals) = futures::join!(self.ministry.province_stats(), self.ministry.hospital_stats());
        Ok(bundesland_stats(&provinces?, &hospitals?, &self.provinces))
    }

    /// Cases per district.
    pub async fn bezirk(&self) -> Result<Vec<BezirkStat>, ExtractError> {
        let districts = self.health_ministry.district_values().await?;
        Ok(bezirk_stats(&districts, self.health_ministry.district_metadata()))
    }

    /// National totals.
    ///
    /// The age distribution and the confirmed count are required. Province sums degrade to zero
    /// when the ministry page cannot be read.
    pub async fn total(&self) -> Result<OverallStat, ExtractError> {
        let (ages, confirmed, provinces) = futures::join!(
            self.health_ministry.age_distribution(),
            self.health_ministry.confirmed(),
            self.bundesland()
        );

        let provinces = provinces.unwrap_or_else(|e| {
            log::warn!(target: LOG_TARGET, "Province figures unavailable, totals exclude them: {e}");
            Vec::new()
        });

        Ok(overall_stat(&provinces, &ages?, Some(confirmed?)))
    }
}
