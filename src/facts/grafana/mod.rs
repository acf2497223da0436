//! The health ministry's dashboard query endpoint.
//!
//! A POSTed SQL query returns `{"results":{"A":{"tables":[{"rows":[[district, count], ...]}]}}}`.

mod provider;
mod query;

pub use provider::{NAME, Provider};
pub use query::{DistrictRows, QueryRequest};
