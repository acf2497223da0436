//! Command dispatch logic for cov19-exporter

use super::{
    ApiArgs, HealthArgs, InitArgs, MetricsArgs, ValidateArgs, check_health, init_config, print_metrics, print_view, validate_config,
};
use crate::{Host, Result};
use clap::builder::Styles;
use clap::builder::styling::{AnsiColor, Effects};
use clap::{Parser, Subcommand};

const CLAP_STYLES: Styles = Styles::styled()
    .header(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .usage(AnsiColor::Green.on_default().effects(Effects::BOLD))
    .literal(AnsiColor::Cyan.on_default().effects(Effects::BOLD))
    .placeholder(AnsiColor::Cyan.on_default());

#[derive(Parser, Debug)]
#[command(name = "cov19-exporter", version, author)]
#[command(about = "Scrape COVID-19 figures into tagged metrics and check source health")]
#[command(styles = CLAP_STYLES)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the metrics of every enabled source
    Metrics(MetricsArgs),
    /// Check every enabled source and exit with status 1 if any is unhealthy
    Health(HealthArgs),
    /// Print a JSON view of the Austrian figures
    Api(ApiArgs),
    /// Generate a default configuration file
    Init(InitArgs),
    /// Validate a configuration file
    Validate(ValidateArgs),
}

/// Dispatch command-line arguments to the appropriate handler
///
/// # Arguments
///
/// * `args` - An iterator of command-line arguments (typically from `std::env::args()`)
///
/// # Errors
///
/// Returns an error if the executed command fails
pub async fn run<I, T, H>(host: &mut H, args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
    H: Host,
{
    match &Cli::parse_from(args).command {
        Command::Metrics(args) => print_metrics(host, args).await,
        Command::Health(args) => check_health(host, args).await,
        Command::Api(args) => print_view(host, args).await,
        Command::Init(args) => init_config(host, args),
        Command::Validate(args) => validate_config(host, args),
    }
}
