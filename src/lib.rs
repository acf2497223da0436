//! cov19-exporter crate
//!
//! Collects COVID-19 figures from a handful of loosely structured public sources and turns them
//! into a flat collection of tagged metrics, plus a health verdict telling which sources still
//! parse the way we expect.
//!
//! # Module Organization
//!
//! - [`facts`]: Source extractors, name normalization and the metadata registry
//! - [`metrics`]: The metric record, metric collection, builder and line exposition
//! - [`health`]: The exporter capability trait and the health aggregator
//! - [`api`]: JSON projections over the extracted facts
//! - [`config`]: Configuration loading and validation
//! - [`commands`]: Command-line interface and composition root

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

pub mod api;
pub mod commands;
pub mod config;
pub mod facts;
pub mod health;
pub mod metrics;

pub use crate::commands::{Host, run};
