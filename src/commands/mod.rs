//! Command-line interface and composition root
//!
//! Every command that talks to the sources loads the configuration, reads the metadata
//! registries once and builds the enabled providers before doing its work:
//!
//! - **metrics**: print every metric in line exposition format
//! - **health**: run each source's postconditions and exit with status 1 on any failure
//! - **api**: print one of the JSON views (`bundesland`, `bezirk`, `total`)
//! - **init**: write the default configuration
//! - **validate**: check a configuration file

mod api;
mod common;
mod health;
mod host;
mod init;
mod metrics;
mod run;
mod validate;

pub use api::{ApiArgs, View, print_view};
pub use common::{ColorMode, CommonArgs, LogLevel, Sources};
pub use health::{HealthArgs, check_health};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use metrics::{MetricsArgs, print_metrics};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
