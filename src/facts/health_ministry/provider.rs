use super::{JsVariable, LabelledArray, LabelledValue, province_name};
use crate::Result;
use crate::config::HealthMinistryConfig;
use crate::facts::http::{build_client, get_text};
use crate::facts::{ExtractError, Extraction, MetadataRegistry, RawStat};
use crate::health::{Exporter, settle_parts};
use crate::metrics::{Metric, MetricFamily, Metrics, distribution};
use core::time::Duration;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;

const LOG_TARGET: &str = " hministry";

pub const NAME: &str = "health ministry";

const CONFIRMED_VARIABLE: &str = "Erkrankungen";

/// The health ministry's dashboard data scripts.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Arc<reqwest::Client>,
    base_url: String,
    thresholds: Thresholds,
    provinces: Arc<MetadataRegistry>,
    districts: Arc<MetadataRegistry>,
}

#[derive(Debug, Clone, Copy)]
struct Thresholds {
    min_districts: usize,
    province_metrics: usize,
    min_age_groups: usize,
    sex_groups: usize,
}

/// Outcome of every data script, fetched together.
struct Parts {
    confirmed: Result<Metrics, ExtractError>,
    ages: Result<Metrics, ExtractError>,
    sexes: Result<Metrics, ExtractError>,
    provinces: Result<Metrics, ExtractError>,
    districts: Result<Metrics, ExtractError>,
}

impl Provider {
    pub fn new(config: &HealthMinistryConfig, provinces: Arc<MetadataRegistry>, districts: Arc<MetadataRegistry>) -> Result<Self> {
        Ok(Self {
            client: Arc::new(build_client(Duration::from_secs(config.timeout_secs))?),
            base_url: config.url.trim_end_matches('/').to_string(),
            thresholds: Thresholds {
                min_districts: config.min_districts,
                province_metrics: config.province_metrics,
                min_age_groups: config.min_age_groups,
                sex_groups: config.sex_groups,
            },
            provinces,
            districts,
        })
    }

    async fn fetch(&self, script: &str) -> Result<String, ExtractError> {
        let url = format!("{}/{script}", self.base_url);
        Ok(get_text(&self.client, &url).await?)
    }

    async fn labelled(&self, script: &str) -> Result<Vec<LabelledValue>, ExtractError> {
        let document = self.fetch(script).await?;
        let values = LabelledArray.extract(&document)?;
        log::debug!(target: LOG_TARGET, "Found {} entries in '{script}'", values.len());
        Ok(values)
    }

    /// Confirmed cases per district, keyed by district name.
    pub async fn district_values(&self) -> Result<Vec<LabelledValue>, ExtractError> {
        self.labelled("Bezirke.js").await
    }

    /// Confirmed cases per province, with labels resolved to full province names.
    pub async fn province_values(&self) -> Result<Vec<LabelledValue>, ExtractError> {
        let values = self.labelled("Bundesland.js").await?;
        Ok(values
            .into_iter()
            .map(|value| LabelledValue {
                label: province_name(&value.label),
                y: value.y,
            })
            .collect())
    }

    /// Confirmed cases per age group.
    pub async fn age_distribution(&self) -> Result<Vec<LabelledValue>, ExtractError> {
        self.labelled("Altersverteilung.js").await
    }

    /// Confirmed cases per sex.
    pub async fn sex_distribution(&self) -> Result<Vec<LabelledValue>, ExtractError> {
        self.labelled("Geschlechtsverteilung.js").await
    }

    /// The national confirmed count.
    pub async fn confirmed(&self) -> Result<u64, ExtractError> {
        let document = self.fetch("SimpleData.js").await?;
        Ok(JsVariable(CONFIRMED_VARIABLE).extract(&document)?)
    }

    /// The district registry this source joins against.
    #[must_use]
    pub fn district_metadata(&self) -> &MetadataRegistry {
        &self.districts
    }

    async fn district_metrics(&self) -> Result<Metrics, ExtractError> {
        let stats: Vec<_> = self
            .district_values()
            .await?
            .into_iter()
            .map(|value| RawStat::infected(value.label.trim(), value.y))
            .collect();

        Ok(MetricFamily::DISTRICTS.build(&stats, self.districts.as_ref()).into())
    }

    async fn province_metrics(&self) -> Result<Metrics, ExtractError> {
        let stats: Vec<_> = self
            .province_values()
            .await?
            .into_iter()
            .map(|value| RawStat::infected(value.label, value.y))
            .collect();

        Ok(MetricFamily::PROVINCES.build(&stats, self.provinces.as_ref()).into())
    }

    async fn age_metrics(&self) -> Result<Metrics, ExtractError> {
        let values = self.age_distribution().await?;
        Ok(distribution("cov19_age_distribution", "group", values.into_iter().map(|v| (v.label, v.y))).into())
    }

    async fn sex_metrics(&self) -> Result<Metrics, ExtractError> {
        let values = self.sex_distribution().await?;
        Ok(distribution("cov19_sex_distribution", "sex", values.into_iter().map(|v| (v.label, v.y))).into())
    }

    async fn confirmed_metrics(&self) -> Result<Metrics, ExtractError> {
        #[expect(clippy::cast_precision_loss, reason = "case counts are far below 2^52")]
        let confirmed = self.confirmed().await? as f64;
        Ok(vec![Metric::new("cov19_confirmed", confirmed)].into())
    }

    async fn parts(&self) -> Parts {
        let (confirmed, ages, sexes, provinces, districts) = futures::join!(
            self.confirmed_metrics(),
            self.age_metrics(),
            self.sex_metrics(),
            self.province_metrics(),
            self.district_metrics(),
        );

        Parts {
            confirmed,
            ages,
            sexes,
            provinces,
            districts,
        }
    }

    fn check(&self, parts: Parts) -> Vec<String> {
        let thresholds = self.thresholds;
        let mut messages = Vec::new();

        match parts.districts {
            Ok(metrics) => {
                if metrics.len() < thresholds.min_districts {
                    messages.push(format!(
                        "not enough district results: {} (expected at least {})",
                        metrics.len(),
                        thresholds.min_districts
                    ));
                }
                messages.extend(metrics.tag_completeness(4, "bezirk").iter().map(ToString::to_string));
            }
            Err(e) => messages.push(format!("districts: {e}")),
        }

        match parts.provinces {
            Ok(metrics) => {
                if metrics.len() != thresholds.province_metrics {
                    messages.push(format!(
                        "unexpected number of province metrics: {} (expected {})",
                        metrics.len(),
                        thresholds.province_metrics
                    ));
                }
                messages.extend(metrics.tag_completeness(4, "province").iter().map(ToString::to_string));
            }
            Err(e) => messages.push(format!("provinces: {e}")),
        }

        match parts.ages {
            Ok(metrics) if metrics.len() < thresholds.min_age_groups => messages.push(format!(
                "missing age distribution: {} groups (expected at least {})",
                metrics.len(),
                thresholds.min_age_groups
            )),
            Ok(_) => {}
            Err(e) => messages.push(format!("age distribution: {e}")),
        }

        match parts.sexes {
            Ok(metrics) if metrics.len() != thresholds.sex_groups => messages.push(format!(
                "unexpected sex distribution: {} groups (expected {})",
                metrics.len(),
                thresholds.sex_groups
            )),
            Ok(_) => {}
            Err(e) => messages.push(format!("sex distribution: {e}")),
        }

        if let Err(e) = parts.confirmed {
            messages.push(format!("confirmed cases: {e}"));
        }

        messages
    }
}

impl Exporter for Provider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
        async move {
            let parts = self.parts().await;

            let mut metrics = Metrics::new();
            let mut errors = Vec::new();
            for part in [parts.confirmed, parts.ages, parts.sexes, parts.provinces, parts.districts] {
                match part {
                    Ok(part) => metrics.extend(part),
                    Err(e) => errors.push(e),
                }
            }

            settle_parts(LOG_TARGET, NAME, metrics, errors)
        }
        .boxed()
    }

    fn health(&self) -> BoxFuture<'_, Vec<String>> {
        async move {
            let parts = self.parts().await;
            self.check(parts)
        }
        .boxed()
    }
}
