use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::health::Verdict;
use clap::Parser;
use owo_colors::OwoColorize;
use std::io::Write;

#[derive(Parser, Debug)]
pub struct HealthArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Run every enabled source's health check; exit with status 1 if any of them fails.
pub async fn check_health<H: Host>(host: &mut H, args: &HealthArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let aggregator = common.sources.aggregator();
    let verdict = aggregator.check().await;
    let use_colors = common.use_colors;

    match &verdict {
        Verdict::Healthy => {
            let status = "healthy";
            let status = if use_colors { status.green().bold().to_string() } else { status.to_string() };
            let _ = writeln!(common.host().output(), "{} sources checked, {status}", aggregator.exporters().len());
        }
        Verdict::Unhealthy(messages) => {
            let status = "unhealthy";
            let status = if use_colors { status.red().bold().to_string() } else { status.to_string() };
            let _ = writeln!(common.host().output(), "{} sources checked, {status}", aggregator.exporters().len());
            for message in messages {
                let _ = writeln!(common.host().output(), "  🗙 {message}");
            }
            common.host().exit(1);
        }
    }

    Ok(())
}
