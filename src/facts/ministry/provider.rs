use super::{HospitalStats, HospitalTable, ProvinceTable, SummaryFigures};
use crate::Result;
use crate::config::MinistryConfig;
use crate::facts::http::{build_client, get_text};
use crate::facts::{ExtractError, Extraction, MetadataRegistry, RawStats};
use crate::health::{Exporter, settle_parts};
use crate::metrics::{Metric, MetricFamily, Metrics};
use core::time::Duration;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;

const LOG_TARGET: &str = "  ministry";

pub const NAME: &str = "ministry";

/// The social ministry's situation page and hospitalization dashboard.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Arc<reqwest::Client>,
    url: String,
    hospitalization_url: String,
    min_metrics: usize,
    metadata: Arc<MetadataRegistry>,
}

impl Provider {
    pub fn new(config: &MinistryConfig, metadata: Arc<MetadataRegistry>) -> Result<Self> {
        Ok(Self {
            client: Arc::new(build_client(Duration::from_secs(config.timeout_secs))?),
            url: config.url.clone(),
            hospitalization_url: config.hospitalization_url.clone(),
            min_metrics: config.min_metrics,
            metadata,
        })
    }

    /// Infections and deaths per province.
    pub async fn province_stats(&self) -> Result<RawStats, ExtractError> {
        let document = get_text(&self.client, &self.url).await?;
        Ok(ProvinceTable.extract(&document)?)
    }

    /// Hospital occupancy per province and in total.
    pub async fn hospital_stats(&self) -> Result<HospitalStats, ExtractError> {
        let document = get_text(&self.client, &self.hospitalization_url).await?;
        Ok(HospitalTable.extract(&document)?)
    }

    /// Every metric this source yields, along with the failures of the parts that did not work.
    async fn collect(&self) -> (Metrics, Vec<ExtractError>) {
        let (page, hospitals) = futures::join!(get_text(&self.client, &self.url), self.hospital_stats());

        let mut metrics = Metrics::new();
        let mut errors: Vec<ExtractError> = Vec::new();

        match page {
            Ok(document) => {
                match SummaryFigures.extract(&document) {
                    Ok(summary) => metrics.extend(summary),
                    Err(e) => errors.push(e.into()),
                }

                match ProvinceTable.extract(&document) {
                    Ok(stats) => {
                        log::debug!(target: LOG_TARGET, "Found {} provinces on '{}'", stats.len(), self.url);
                        metrics.extend(MetricFamily::PROVINCES.build(stats.iter(), self.metadata.as_ref()));
                    }
                    Err(e) => errors.push(e.into()),
                }
            }
            Err(e) => errors.push(e.into()),
        }

        match hospitals {
            Ok(stats) => metrics.extend(self.hospital_metrics(&stats)),
            Err(e) => errors.push(e),
        }

        (metrics, errors)
    }

    fn hospital_metrics(&self, stats: &HospitalStats) -> Vec<Metric> {
        let mut metrics = MetricFamily::HOSPITALS.build(stats.provinces.iter(), self.metadata.as_ref());

        #[expect(clippy::cast_precision_loss, reason = "bed counts are far below 2^52")]
        let totals = [
            Metric::new("cov19_hospitalized", stats.total.hospitalized as f64),
            Metric::new("cov19_intensive_care", stats.total.intensive_care as f64),
        ];
        metrics.extend(totals);

        metrics
    }
}

impl Exporter for Provider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
        async move {
            let (metrics, errors) = self.collect().await;
            settle_parts(LOG_TARGET, NAME, metrics, errors)
        }
        .boxed()
    }

    fn health(&self) -> BoxFuture<'_, Vec<String>> {
        async move {
            let (metrics, errors) = self.collect().await;

            let mut messages: Vec<_> = errors.iter().map(ToString::to_string).collect();
            if metrics.len() < self.min_metrics {
                messages.push(format!(
                    "missing ministry stats: found {} metrics, expected at least {}",
                    metrics.len(),
                    self.min_metrics
                ));
            }

            messages
        }
        .boxed()
    }
}
