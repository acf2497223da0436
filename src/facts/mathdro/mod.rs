//! Recovered cases from the mathdro COVID-19 API.

mod provider;
mod recovered;

pub use provider::{NAME, Provider};
pub use recovered::{RecoveredList, RecoveredStat};
