//! The social ministry's situation page.
//!
//! One HTML page carries the national totals (confirmed, tests, healed, dead) and the per-province
//! confirmed and deaths lines; a second page carries the hospitalization table.

mod hospitals;
mod provider;
mod provinces;
mod summary;

pub use hospitals::{HospitalStats, HospitalTable};
pub use provider::{NAME, Provider};
pub use provinces::{ProvinceTable, death_pairs};
pub use summary::SummaryFigures;
