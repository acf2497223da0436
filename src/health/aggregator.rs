use super::Exporter;
use crate::metrics::Metrics;
use futures::future::join_all;
use std::sync::Arc;

const LOG_TARGET: &str = "    health";

/// Outcome of a health check over all sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Verdict {
    Healthy,

    /// One message per violated postcondition, each prefixed with its source's name.
    Unhealthy(Vec<String>),
}

impl Verdict {
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        matches!(self, Self::Healthy)
    }

    #[must_use]
    pub fn messages(&self) -> &[String] {
        match self {
            Self::Healthy => &[],
            Self::Unhealthy(messages) => messages,
        }
    }
}

/// Runs every registered exporter and combines what they report.
///
/// Exporters run concurrently and independently: a failing or slow source never keeps the
/// others from being evaluated.
#[derive(Debug, Clone, Default)]
pub struct HealthAggregator {
    exporters: Vec<Arc<dyn Exporter>>,
}

impl HealthAggregator {
    #[must_use]
    pub const fn new(exporters: Vec<Arc<dyn Exporter>>) -> Self {
        Self { exporters }
    }

    pub fn register(&mut self, exporter: Arc<dyn Exporter>) {
        self.exporters.push(exporter);
    }

    #[must_use]
    pub fn exporters(&self) -> &[Arc<dyn Exporter>] {
        &self.exporters
    }

    /// Check every exporter and collect all of their messages.
    pub async fn check(&self) -> Verdict {
        let reports = join_all(self.exporters.iter().map(|exporter| async move {
            let messages = exporter.health().await;
            log::debug!(target: LOG_TARGET, "{} reported {} problem(s)", exporter.name(), messages.len());
            (exporter.name(), messages)
        }))
        .await;

        let messages: Vec<_> = reports
            .into_iter()
            .flat_map(|(name, messages)| messages.into_iter().map(move |message| format!("{name}: {message}")))
            .collect();

        if messages.is_empty() {
            Verdict::Healthy
        } else {
            Verdict::Unhealthy(messages)
        }
    }

    /// Collect the metrics of every exporter, in registration order.
    ///
    /// Exporters that fail are logged and left out.
    pub async fn collect_metrics(&self) -> Metrics {
        let results = join_all(self.exporters.iter().map(|exporter| exporter.metrics())).await;

        let mut metrics = Metrics::new();
        for (exporter, result) in self.exporters.iter().zip(results) {
            match result {
                Ok(exported) => {
                    log::debug!(target: LOG_TARGET, "{} produced {} metrics", exporter.name(), exported.len());
                    metrics.extend(exported);
                }
                Err(e) => {
                    log::error!(target: LOG_TARGET, "Could not get metrics from {}: {e}", exporter.name());
                }
            }
        }

        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::{ExtractError, FetchError};
    use crate::metrics::Metric;
    use futures::FutureExt;
    use futures::future::BoxFuture;

    #[derive(Debug)]
    struct Fixed {
        name: &'static str,
        messages: Vec<String>,
        fail: bool,
    }

    impl Exporter for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>> {
            async move {
                if self.fail {
                    Err(FetchError::Timeout {
                        url: "http://example.test".into(),
                    }
                    .into())
                } else {
                    Ok(vec![Metric::new(self.name, 1.0)].into())
                }
            }
            .boxed()
        }

        fn health(&self) -> BoxFuture<'_, Vec<String>> {
            let messages = self.messages.clone();
            async move { messages }.boxed()
        }
    }

    fn exporter(name: &'static str, messages: &[&str], fail: bool) -> Arc<dyn Exporter> {
        Arc::new(Fixed {
            name,
            messages: messages.iter().map(ToString::to_string).collect(),
            fail,
        })
    }

    #[tokio::test]
    async fn test_all_healthy() {
        let aggregator = HealthAggregator::new(vec![exporter("a", &[], false), exporter("b", &[], false)]);
        assert_eq!(aggregator.check().await, Verdict::Healthy);
    }

    #[tokio::test]
    async fn test_messages_are_prefixed_and_kept_in_order() {
        let aggregator = HealthAggregator::new(vec![
            exporter("a", &["first"], false),
            exporter("b", &[], false),
            exporter("c", &["second", "third"], false),
        ]);

        let verdict = aggregator.check().await;
        assert!(!verdict.is_healthy());
        assert_eq!(verdict.messages(), ["a: first", "c: second", "c: third"]);
    }

    #[tokio::test]
    async fn test_collect_metrics_skips_failures() {
        let mut aggregator = HealthAggregator::default();
        aggregator.register(exporter("a", &[], false));
        aggregator.register(exporter("b", &[], true));
        aggregator.register(exporter("c", &[], false));

        let metrics = aggregator.collect_metrics().await;
        let names: Vec<_> = metrics.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["a", "c"]);
    }
}
