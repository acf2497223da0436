use crate::facts::{AggregationError, ExtractError};
use crate::metrics::Metrics;
use core::fmt::Debug;
use futures::future::BoxFuture;

/// A source that can produce metrics and judge its own health.
pub trait Exporter: Send + Sync + Debug {
    /// Short, stable name used to prefix health messages.
    fn name(&self) -> &'static str;

    /// Fetch and build this source's metrics.
    fn metrics(&self) -> BoxFuture<'_, Result<Metrics, ExtractError>>;

    /// Run this source's postconditions; every violated one yields a message.
    ///
    /// An empty list means healthy.
    fn health(&self) -> BoxFuture<'_, Vec<String>>;
}

/// Settle the outcome of an exporter made of independent parts.
///
/// Parts that worked are returned even if others failed; the failures are only logged here,
/// since [`Exporter::health`] reports them. When nothing at all was produced, the failures are
/// returned combined.
pub fn settle_parts(log_target: &str, source: &str, metrics: Metrics, errors: Vec<ExtractError>) -> Result<Metrics, ExtractError> {
    if metrics.is_empty() {
        return AggregationError::combine(errors).map_or(Ok(metrics), Err);
    }

    for error in &errors {
        log::warn!(target: log_target, "Skipping part of {source}: {error}");
    }

    Ok(metrics)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::facts::ParseError;
    use crate::metrics::Metric;

    #[test]
    fn test_settle_parts_keeps_partial_results() {
        let metrics: Metrics = vec![Metric::new("cov19_confirmed", 1.0)].into();
        let settled = settle_parts("test", "test", metrics, vec![ParseError::NoMatches("rows").into()]).unwrap();
        assert_eq!(settled.len(), 1);
    }

    #[test]
    fn test_settle_parts_nothing_produced_and_nothing_failed() {
        let settled = settle_parts("test", "test", Metrics::new(), Vec::new()).unwrap();
        assert!(settled.is_empty());
    }

    #[test]
    fn test_settle_parts_combines_total_failure() {
        let err = settle_parts(
            "test",
            "test",
            Metrics::new(),
            vec![ParseError::NoMatches("rows").into(), ParseError::MissingVariable("Erkrankungen".into()).into()],
        )
        .unwrap_err();

        assert!(matches!(err, ExtractError::Aggregate(_)));
    }
}
