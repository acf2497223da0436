use super::{DistrictRows, QueryRequest};
use crate::Result;
use crate::config::GrafanaConfig;
use crate::facts::http::{build_client, post_json};
use crate::facts::{ExtractError, Extraction, MetadataRegistry, RawStat};
use crate::health::Exporter;
use crate::metrics::{MetricFamily, Metrics};
use chrono::Utc;
use core::time::Duration;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;

const LOG_TARGET: &str = "   grafana";

pub const NAME: &str = "grafana";

/// The health ministry's dashboard query endpoint.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Arc<reqwest::Client>,
    url: String,
    min_rows: usize,
    districts: Arc<MetadataRegistry>,
}

impl Provider {
    pub fn new(config: &GrafanaConfig, districts: Arc<MetadataRegistry>) -> Result<Self> {
        Ok(Self {
            client: Arc::new(build_client(Duration::from_secs(config.timeout_secs))?),
            url: config.url.clone(),
            min_rows: config.min_rows,
            districts,
        })
    }

    /// Confirmed cases per district.
    pub async fn district_stats(&self) -> Result<Vec<RawStat>, ExtractError> {
        let document = post_json(&self.client, &self.url, &QueryRequest::districts(Utc::now())).await?;
        let stats = DistrictRows.extract(&document)?;
        log::debug!(target: LOG_TARGET, "Found {} districts", stats.len());
        Ok(stats)
    }

    async fn district_metrics(&self) -> Result<Metrics, ExtractError> {
        let stats = self.district_stats().await?;
        Ok(MetricFamily::DISTRICTS.build(&stats, self.districts.as_ref()).into())
    }
}

impl Exporter for Provider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
        self.district_metrics().boxed()
    }

    fn health(&self) -> BoxFuture<'_, Vec<String>> {
        async move {
            match self.district_stats().await {
                Ok(stats) if stats.len() < self.min_rows => vec![format!(
                    "not enough district rows: {} (expected at least {})",
                    stats.len(),
                    self.min_rows
                )],
                Ok(_) => Vec::new(),
                Err(e) => vec![e.to_string()],
            }
        }
        .boxed()
    }
}
