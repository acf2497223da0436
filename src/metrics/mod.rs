//! The metric data model and everything that produces or renders it.
//!
//! A [`Metric`] is a name, an optional [`Tags`] set and a floating-point value. Metrics are
//! gathered in an insertion-ordered [`Metrics`] collection that supports first-match lookup by
//! name and `key=value` tag pair, plus value and tag-completeness checks that report
//! [`ValidationError`]s.
//!
//! [`MetricFamily`] describes the metric names derived for one kind of entity and builds them
//! from raw facts joined with place metadata. The [`exposition`] module renders a collection in
//! the line format scraped by monitoring systems.

mod builder;
mod collection;
pub mod exposition;
mod metric;
mod tags;
mod validation_error;

pub use builder::{AUSTRIA, MetricFamily, distribution};
pub use collection::Metrics;
pub use metric::Metric;
pub use tags::Tags;
pub use validation_error::ValidationError;
