use super::{WorldStat, WorldTable};
use crate::Result;
use crate::config::EcdcConfig;
use crate::facts::http::{build_client, get_text};
use crate::facts::{ExtractError, Extraction, MetadataLookup, MetadataRegistry};
use crate::health::Exporter;
use crate::metrics::{MetricFamily, Metrics};
use core::time::Duration;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;

const LOG_TARGET: &str = "      ecdc";

pub const NAME: &str = "ecdc";

/// The ECDC's geographical distribution table.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Arc<reqwest::Client>,
    url: String,
    min_metrics: usize,
    metadata: Arc<MetadataRegistry>,
}

impl Provider {
    pub fn new(config: &EcdcConfig, metadata: Arc<MetadataRegistry>) -> Result<Self> {
        Ok(Self {
            client: Arc::new(build_client(Duration::from_secs(config.timeout_secs))?),
            url: config.url.clone(),
            min_metrics: config.min_metrics,
            metadata,
        })
    }

    /// Cases and deaths per country.
    pub async fn world_stats(&self) -> Result<Vec<WorldStat>, ExtractError> {
        let document = get_text(&self.client, &self.url).await?;
        let stats = WorldTable.extract(&document)?;
        log::debug!(target: LOG_TARGET, "Found {} countries on '{}'", stats.len(), self.url);
        Ok(stats)
    }

    async fn world_metrics(&self) -> Result<Metrics, ExtractError> {
        let family = MetricFamily::WORLD;

        Ok(self
            .world_stats()
            .await?
            .iter()
            .flat_map(|world| {
                let base = family.base_tags(&world.stat.location_key).with("continent", world.continent.as_str());
                family.build_entity(&world.stat, base, self.metadata.as_ref())
            })
            .collect())
    }
}

impl Exporter for Provider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
        self.world_metrics().boxed()
    }

    fn health(&self) -> BoxFuture<'_, Vec<String>> {
        async move {
            let metrics = match self.world_metrics().await {
                Ok(metrics) => metrics,
                Err(e) => return vec![e.to_string()],
            };

            let mut messages = Vec::new();
            if metrics.len() < self.min_metrics {
                messages.push(format!(
                    "world stats are failing: found {} metrics, expected at least {}",
                    metrics.len(),
                    self.min_metrics
                ));
            }

            let mut unresolved: Vec<&str> = Vec::new();
            for country in metrics.iter().filter_map(|metric| metric.tag("country")) {
                if self.metadata.lookup(country).is_none() && !unresolved.contains(&country) {
                    unresolved.push(country);
                }
            }
            messages.extend(unresolved.iter().map(|country| format!("could not find location for country: {country}")));

            messages
        }
        .boxed()
    }
}
