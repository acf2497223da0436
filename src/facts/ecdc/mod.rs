//! The ECDC's international case table.

mod provider;
mod table;

pub use provider::{NAME, Provider};
pub use table::{WorldStat, WorldTable};
