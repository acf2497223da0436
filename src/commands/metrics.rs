use super::Host;
use super::common::{Common, CommonArgs};
use crate::Result;
use crate::metrics::exposition::write_metrics;
use clap::Parser;
use ohno::IntoAppError;

#[derive(Parser, Debug)]
pub struct MetricsArgs {
    #[command(flatten)]
    pub common: CommonArgs,
}

/// Print every metric of every enabled source in line exposition format.
///
/// Sources that fail are skipped; `health` reports why.
pub async fn print_metrics<H: Host>(host: &mut H, args: &MetricsArgs) -> Result<()> {
    let mut common = Common::new(host, &args.common)?;
    let metrics = common.sources.aggregator().collect_metrics().await;

    write_metrics(&metrics, common.host().output()).into_app_err("writing metrics")?;
    Ok(())
}
