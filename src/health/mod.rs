//! Source health.
//!
//! Each source implements [`Exporter`]: it can produce its metrics and check its own
//! postconditions (minimum result counts, tag completeness, expected values). The
//! [`HealthAggregator`] fans out over all registered exporters, never stops at the first failure
//! and turns the collected messages into a [`Verdict`].

mod aggregator;
mod exporter;

pub use aggregator::{HealthAggregator, Verdict};
pub use exporter::{Exporter, settle_parts};
