use super::{RecoveredList, RecoveredStat};
use crate::Result;
use crate::config::MathdroConfig;
use crate::facts::http::{build_client, get_text};
use crate::facts::{ExtractError, Extraction};
use crate::health::Exporter;
use crate::metrics::Metrics;
use core::time::Duration;
use futures::FutureExt;
use futures::future::BoxFuture;
use std::sync::Arc;

const LOG_TARGET: &str = "   mathdro";

pub const NAME: &str = "mathdro";

/// The community-run COVID-19 API serving recovered counts.
#[derive(Debug, Clone)]
pub struct Provider {
    client: Arc<reqwest::Client>,
    base_url: String,
}

impl Provider {
    pub fn new(config: &MathdroConfig) -> Result<Self> {
        Ok(Self {
            client: Arc::new(build_client(Duration::from_secs(config.timeout_secs))?),
            base_url: config.url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn recovered(&self) -> Result<Vec<RecoveredStat>, ExtractError> {
        let url = format!("{}/recovered", self.base_url);
        let document = get_text(&self.client, &url).await?;
        let stats = RecoveredList.extract(&document)?;
        log::debug!(target: LOG_TARGET, "Found {} recovered entries", stats.len());
        Ok(stats)
    }

    async fn recovered_metrics(&self) -> Result<Metrics, ExtractError> {
        Ok(self.recovered().await?.iter().map(RecoveredStat::to_metric).collect())
    }
}

impl Exporter for Provider {
    fn name(&self) -> &'static str {
        NAME
    }

    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
        self.recovered_metrics().boxed()
    }

    fn health(&self) -> BoxFuture<'_, Vec<String>> {
        async move {
            match self.recovered().await {
                Ok(_) => Vec::new(),
                Err(e) => vec![e.to_string()],
            }
        }
        .boxed()
    }
}
