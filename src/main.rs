//! Scrapes COVID-19 figures into tagged metrics and reports which sources are healthy.
//!
//! # Quick Start
//!
//! Print all metrics in line exposition format:
//!
//! ```bash
//! cov19-exporter metrics
//! ```
//!
//! Check every source and exit non-zero if any of them is failing:
//!
//! ```bash
//! cov19-exporter health
//! ```
//!
//! Print the per-province JSON projection:
//!
//! ```bash
//! cov19-exporter api bundesland
//! ```
//!
//! # Configuration
//!
//! Source URLs, timeouts, metadata files and health thresholds come from `cov19.toml`,
//! `cov19.yml`, `cov19.yaml` or `cov19.json` in the current directory, or from the file given
//! with `--config`. Run `cov19-exporter init` to write the defaults to a file.

use cov19_exporter::{Host, run};
use std::io::Write;
use std::io::{stderr, stdout};

/// Default host writing to the real terminal.
#[derive(Debug, Clone, Default)]
pub struct RealHost;

impl Host for RealHost {
    fn output(&mut self) -> impl Write {
        stdout()
    }

    fn error(&mut self) -> impl Write {
        stderr()
    }

    fn exit(&mut self, code: i32) {
        std::process::exit(code);
    }
}

#[tokio::main]
async fn main() -> Result<(), ohno::AppError> {
    run(&mut RealHost, std::env::args()).await
}
