//! Fact extraction from the upstream sources.
//!
//! Every source lives in its own module with a `Provider` that fetches documents over HTTP and
//! hands them to one [`Extraction`] strategy per document shape:
//!
//! - [`ministry`]: the social ministry's HTML page (summary figures and the two-phase province
//!   table) plus its hospitalization table
//! - [`health_ministry`]: the health ministry's script endpoints carrying JSON arrays and JS
//!   variables (districts, provinces, age and sex distribution, confirmed cases)
//! - [`grafana`]: the tabular JSON query endpoint with per-district counts
//! - [`ecdc`]: the international HTML case table
//! - [`mathdro`]: the recovered-cases JSON API
//!
//! Raw figures come out as [`RawStat`] records keyed by the source's own spelling of a place.
//! The [`MetadataRegistry`] joins them with population and coordinates through [`normalize`].
//!
//! Fetch failures and shape changes are kept apart by [`ExtractError`], so health diagnostics can
//! tell a source that is down from one that changed its layout.

pub mod ecdc;
mod error;
mod extraction;
pub mod grafana;
pub mod health_ministry;
mod html;
mod http;
pub mod mathdro;
mod metadata;
pub mod ministry;
mod normalize;
pub mod numeric;
mod raw_stat;

pub use error::{AggregationError, ExtractError, FetchError, ParseError};
pub use extraction::Extraction;
pub use metadata::{Location, MetadataLookup, MetadataRecord, MetadataRegistry};
pub use normalize::{country_display_name, normalize};
pub use raw_stat::{RawStat, RawStats};
